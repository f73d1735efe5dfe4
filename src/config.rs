use anyhow::{Context, Result};
use clap::Parser;
use std::{env, path::PathBuf, sync::Arc};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 512 * 1024 * 1024;

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub bucket: String,
    pub region: String,
    pub upload_prefix: String,
    pub players_prefix: String,
    pub max_upload_bytes: usize,
    pub cors_origins: Vec<String>,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "Upload and catalog gateway for an S3 bucket")]
pub struct Args {
    /// Host to bind to (overrides GATEWAY_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides GATEWAY_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Bucket name (overrides GATEWAY_BUCKET)
    #[arg(long)]
    pub bucket: Option<String>,

    /// Bucket region (overrides GATEWAY_REGION)
    #[arg(long)]
    pub region: Option<String>,
}

/// The bucket layout shared read-only by the catalog and upload services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageSettings {
    pub bucket: String,
    pub region: String,
    pub upload_prefix: String,
    pub players_prefix: String,
}

impl StorageSettings {
    /// Virtual-hosted style URL of `key`: `https://{bucket}.s3.{region}.amazonaws.com/{key}`.
    ///
    /// Each `/`-separated key segment is percent-encoded, so spaces, `#` and
    /// `?` in client filenames stay part of the path.
    pub fn public_url(&self, key: &str) -> String {
        let path = key
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            self.bucket, self.region, path
        )
    }
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig.
    pub fn from_env_and_args() -> Result<Self> {
        load_dotenv(dotenvy::dotenv())?;

        let args = Args::parse();

        // --- Environment fallback ---
        let env_host = env::var("GATEWAY_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let env_port = parse_env("GATEWAY_PORT", 3000u16)?;
        let env_bucket = env::var("GATEWAY_BUCKET").unwrap_or_else(|_| "metama-sg-cloud".into());
        let env_region = env::var("GATEWAY_REGION").unwrap_or_else(|_| "ap-southeast-1".into());
        let upload_prefix =
            env::var("GATEWAY_UPLOAD_PREFIX").unwrap_or_else(|_| "uploads/".into());
        let players_prefix =
            env::var("GATEWAY_PLAYERS_PREFIX").unwrap_or_else(|_| "players/".into());
        let max_upload_bytes = parse_env("GATEWAY_MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?;
        let cors_origins = env::var("GATEWAY_CORS_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_else(|_| vec!["*".to_string()]);

        // --- Merge ---
        Ok(Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            bucket: args.bucket.unwrap_or(env_bucket),
            region: args.region.unwrap_or(env_region),
            upload_prefix,
            players_prefix,
            max_upload_bytes,
            cors_origins,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn storage_settings(&self) -> Arc<StorageSettings> {
        Arc::new(StorageSettings {
            bucket: self.bucket.clone(),
            region: self.region.clone(),
            upload_prefix: self.upload_prefix.clone(),
            players_prefix: self.players_prefix.clone(),
        })
    }
}

fn parse_env<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .parse::<T>()
            .with_context(|| format!("parsing {} value `{}`", name, value)),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(err) => Err(err).with_context(|| format!("reading {}", name)),
    }
}

/// A missing `.env` is normal in deployed environments; an unreadable or
/// malformed one is a startup error.
fn load_dotenv(outcome: dotenvy::Result<PathBuf>) -> Result<()> {
    match outcome {
        Ok(_) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(err).context("loading .env file"),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if origins.is_empty() {
        vec!["*".to_string()]
    } else {
        origins
    }
}

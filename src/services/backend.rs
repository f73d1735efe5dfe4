//! Object storage backend abstraction.
//!
//! The gateway talks to the bucket through [`ObjectBackend`] so the catalog
//! and upload services can be exercised without AWS. [`S3Backend`] is the
//! production implementation built on `aws-sdk-s3`.

use crate::{config::StorageSettings, models::object::StoredObject};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, retry::RetryConfig};
use aws_sdk_s3::{Client, error::DisplayErrorContext, primitives::ByteStream};
use bytes::Bytes;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("listing objects under `{prefix}` failed: {detail}")]
    List { prefix: String, detail: String },
    #[error("writing object `{key}` failed: {detail}")]
    Put { key: String, detail: String },
}

pub type BackendResult<T> = Result<T, BackendError>;

/// The two bucket operations the gateway needs.
#[async_trait]
pub trait ObjectBackend: Send + Sync {
    /// List objects under `prefix` with a single request. A truncated page
    /// is returned as is; no continuation request is issued.
    async fn list_by_prefix(&self, prefix: &str) -> BackendResult<Vec<StoredObject>>;

    /// Write `body` under `key` and return the object's location URL.
    /// An existing object with the same key is overwritten.
    async fn put_object(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> BackendResult<String>;
}

/// S3 backend implementation
#[derive(Clone)]
pub struct S3Backend {
    client: Client,
    settings: Arc<StorageSettings>,
}

impl S3Backend {
    /// Build a client pinned to the configured region. Credentials come from
    /// the SDK default provider chain (environment, profile, instance role).
    /// SDK retries are disabled: one failed call fails the request.
    pub async fn new(settings: Arc<StorageSettings>) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(settings.region.clone()))
            .retry_config(RetryConfig::disabled())
            .load()
            .await;

        Self {
            client: Client::new(&config),
            settings,
        }
    }
}

#[async_trait]
impl ObjectBackend for S3Backend {
    async fn list_by_prefix(&self, prefix: &str) -> BackendResult<Vec<StoredObject>> {
        let start = std::time::Instant::now();

        let output = self
            .client
            .list_objects_v2()
            .bucket(&self.settings.bucket)
            .prefix(prefix)
            .send()
            .await
            .map_err(|e| BackendError::List {
                prefix: prefix.to_string(),
                detail: DisplayErrorContext(&e).to_string(),
            })?;

        if output.is_truncated().unwrap_or(false) {
            tracing::warn!(
                bucket = %self.settings.bucket,
                prefix,
                returned = output.contents().len(),
                "listing truncated by the backend; remaining keys are not returned"
            );
        }

        let objects: Vec<StoredObject> = output
            .contents()
            .iter()
            .filter_map(|entry| {
                let object = StoredObject::from_listing_entry(entry);
                if object.is_none() {
                    tracing::debug!(?entry, "skipping incomplete listing entry");
                }
                object
            })
            .collect();

        tracing::debug!(
            bucket = %self.settings.bucket,
            prefix,
            count = objects.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 listing complete"
        );

        Ok(objects)
    }

    async fn put_object(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> BackendResult<String> {
        let size = body.len();
        let start = std::time::Instant::now();

        self.client
            .put_object()
            .bucket(&self.settings.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| BackendError::Put {
                key: key.to_string(),
                detail: DisplayErrorContext(&e).to_string(),
            })?;

        tracing::debug!(
            bucket = %self.settings.bucket,
            key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 put complete"
        );

        Ok(self.settings.public_url(key))
    }
}

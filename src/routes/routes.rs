//! Defines the gateway's HTTP routes.
//!
//! ## Structure
//! - `GET  /ping`         — liveness, plain `pong`
//! - `POST /upload`       — multipart upload, field `file`
//! - `GET  /list-files`   — videos under the upload prefix
//! - `GET  /list-players` — player PNGs under the players prefix

use crate::{
    handlers::{
        health_handlers::ping,
        object_handlers::{list_files, list_players, upload_file},
    },
    services::AppState,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build and return the router for all gateway routes.
///
/// `max_upload_bytes` replaces the default request body limit on `/upload`
/// only. The router carries shared state (`AppState`) to all handlers.
pub fn routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/ping", get(ping))
        .route(
            "/upload",
            post(upload_file).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/list-files", get(list_files))
        .route("/list-players", get(list_players))
}

/// CORS for browser clients. `*` allows every origin; otherwise only the
/// listed origins are allowed and unparsable entries are skipped.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(origin = %origin, error = %err, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(allowed)
}

//! Liveness handler.
//!
//! - GET /ping -> "pong"

/// `GET /ping`
///
/// Always 200 with a fixed plain-text body. Never touches the bucket.
pub async fn ping() -> &'static str {
    "pong"
}

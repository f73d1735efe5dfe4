//! Read-only views of stored objects presented to API callers.
//!
//! Descriptors are rebuilt on every listing and never persisted. Field names
//! on the wire follow the JSON contract existing clients already consume.

use serde::Serialize;

/// A recorded video under the upload prefix.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VideoDescriptor {
    /// Object key, including the upload prefix.
    pub key: String,

    /// Public location of the object.
    #[serde(rename = "url")]
    pub public_url: String,

    /// Last-modified instant rendered in the display timezone.
    #[serde(rename = "lastModified")]
    pub last_modified_formatted: String,

    /// Last-modified instant as an RFC 3339 UTC string with milliseconds.
    pub last_modified_raw: String,
}

/// A per-player PNG stored as `players/<folder>/<game>_<user>.png`.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerAssetDescriptor {
    pub key: String,

    #[serde(rename = "url")]
    pub public_url: String,

    /// Group segment, e.g. `g0`.
    pub folder: String,

    /// Two-digit game number.
    pub game_number: String,

    /// Three-character user code.
    pub user_code: String,
}

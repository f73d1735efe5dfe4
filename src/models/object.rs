//! Represents an object (file) as reported by a bucket listing.

use aws_sdk_s3::types::Object as ListingEntry;
use chrono::{DateTime, Utc};

/// A snapshot of a single object taken at listing time.
///
/// The `StoredObject` struct carries listing metadata only, never the content bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredObject {
    /// Object key (path-like identifier within the bucket).
    pub key: String,

    /// Timestamp when object was last modified.
    pub last_modified: DateTime<Utc>,

    /// Content type (MIME type), when the backend reports one.
    pub content_type: Option<String>,

    /// Size in bytes.
    pub size: i64,
}

impl StoredObject {
    pub fn new(key: impl Into<String>, last_modified: DateTime<Utc>) -> Self {
        Self {
            key: key.into(),
            last_modified,
            content_type: None,
            size: 0,
        }
    }

    /// Normalize one `ListObjectsV2` entry.
    ///
    /// Entries without a key or a last-modified instant cannot be classified
    /// and are dropped. Listings never carry a content type.
    pub fn from_listing_entry(entry: &ListingEntry) -> Option<Self> {
        let key = entry.key()?;
        let modified = entry.last_modified()?;
        let Some(last_modified) = DateTime::from_timestamp(modified.secs(), modified.subsec_nanos())
        else {
            tracing::debug!(key, "listing entry has an out-of-range last-modified instant");
            return None;
        };

        Some(Self {
            size: entry.size().unwrap_or(0),
            ..Self::new(key, last_modified)
        })
    }
}

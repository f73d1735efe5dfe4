//! An inbound file upload as decoded from the multipart form.

use bytes::Bytes;

/// Raw upload parts. Any of them may be absent when the client sends an
/// incomplete form; the upload service rejects such requests before
/// touching the bucket.
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    pub original_filename: Option<String>,
    pub mime_type: Option<String>,
    pub payload: Option<Bytes>,
}

impl UploadRequest {
    pub fn new(
        original_filename: impl Into<String>,
        mime_type: impl Into<String>,
        payload: impl Into<Bytes>,
    ) -> Self {
        Self {
            original_filename: Some(original_filename.into()),
            mime_type: Some(mime_type.into()),
            payload: Some(payload.into()),
        }
    }
}

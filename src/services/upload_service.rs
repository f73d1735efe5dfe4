//! UploadService — places inbound files under the upload prefix.
//!
//! The stored key is `{upload_prefix}{original_filename}` verbatim. Uploading
//! the same filename twice overwrites the earlier object (last write wins).

use crate::{
    config::StorageSettings,
    models::upload::UploadRequest,
    services::backend::{BackendError, ObjectBackend},
};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("upload request is missing {0}")]
    Validation(&'static str),
    #[error("upload failed: {0}")]
    UploadFailure(#[source] BackendError),
}

pub type UploadResult<T> = Result<T, UploadError>;

#[derive(Clone)]
pub struct UploadService {
    backend: Arc<dyn ObjectBackend>,
    settings: Arc<StorageSettings>,
}

impl UploadService {
    pub fn new(backend: Arc<dyn ObjectBackend>, settings: Arc<StorageSettings>) -> Self {
        Self { backend, settings }
    }

    /// Validate `request`, write it to the bucket and return its location.
    ///
    /// Validation happens before any backend call. Backend failures are not
    /// retried.
    pub async fn upload(&self, request: UploadRequest) -> UploadResult<String> {
        let filename = request
            .original_filename
            .filter(|name| !name.is_empty())
            .ok_or(UploadError::Validation("filename"))?;
        let mime_type = request
            .mime_type
            .filter(|mime| !mime.is_empty())
            .ok_or(UploadError::Validation("mime type"))?;
        let payload = request
            .payload
            .filter(|bytes| !bytes.is_empty())
            .ok_or(UploadError::Validation("payload"))?;

        let key = self.object_key(&filename);
        let size = payload.len();

        let location = self
            .backend
            .put_object(&key, payload, &mime_type)
            .await
            .map_err(UploadError::UploadFailure)?;

        tracing::info!(key = %key, size_bytes = size, location = %location, "upload stored");
        Ok(location)
    }

    fn object_key(&self, filename: &str) -> String {
        format!("{}{}", self.settings.upload_prefix, filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::backend::test_support::{MemoryBackend, PutCall, settings};
    use bytes::Bytes;

    fn service(backend: MemoryBackend) -> (UploadService, Arc<MemoryBackend>) {
        let backend = Arc::new(backend);
        (UploadService::new(backend.clone(), settings()), backend)
    }

    #[tokio::test]
    async fn stores_under_upload_prefix_with_content_type() {
        let (uploads, backend) = service(MemoryBackend::default());

        let url = uploads
            .upload(UploadRequest::new("clip1.mp4", "video/mp4", &b"frames"[..]))
            .await
            .unwrap();

        assert!(url.ends_with("uploads/clip1.mp4"), "{url}");
        assert_eq!(
            backend.put_calls(),
            vec![PutCall {
                key: "uploads/clip1.mp4".into(),
                body: Bytes::from_static(b"frames"),
                content_type: "video/mp4".into(),
            }]
        );
    }

    #[tokio::test]
    async fn filename_is_used_verbatim() {
        let (uploads, backend) = service(MemoryBackend::default());

        uploads
            .upload(UploadRequest::new("../odd name.MOV", "video/quicktime", &b"x"[..]))
            .await
            .unwrap();

        assert_eq!(backend.put_calls()[0].key, "uploads/../odd name.MOV");
    }

    #[tokio::test]
    async fn same_filename_is_written_again() {
        let (uploads, backend) = service(MemoryBackend::default());

        for body in [&b"first"[..], &b"second"[..]] {
            uploads
                .upload(UploadRequest::new("clip.mp4", "video/mp4", body))
                .await
                .unwrap();
        }

        let keys: Vec<String> = backend.put_calls().into_iter().map(|c| c.key).collect();
        assert_eq!(keys, vec!["uploads/clip.mp4", "uploads/clip.mp4"]);
    }

    #[tokio::test]
    async fn incomplete_requests_never_reach_the_backend() {
        let (uploads, backend) = service(MemoryBackend::default());

        let cases = [
            UploadRequest {
                mime_type: None,
                ..UploadRequest::new("clip.mp4", "video/mp4", &b"x"[..])
            },
            UploadRequest {
                original_filename: Some(String::new()),
                ..UploadRequest::new("clip.mp4", "video/mp4", &b"x"[..])
            },
            UploadRequest {
                payload: Some(Bytes::new()),
                ..UploadRequest::new("clip.mp4", "video/mp4", &b"x"[..])
            },
            UploadRequest::default(),
        ];

        for request in cases {
            let err = uploads.upload(request).await.unwrap_err();
            assert!(matches!(err, UploadError::Validation(_)), "{err}");
        }
        assert!(backend.put_calls().is_empty());
    }

    #[tokio::test]
    async fn backend_failure_is_reported_once() {
        let (uploads, backend) = service(MemoryBackend::failing());

        let err = uploads
            .upload(UploadRequest::new("clip.mp4", "video/mp4", &b"x"[..]))
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::UploadFailure(BackendError::Put { .. })));
        assert_eq!(backend.put_calls().len(), 1);
    }
}

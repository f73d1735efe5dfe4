//! Bucket-facing services and the shared state handed to every handler.

pub mod backend;
pub mod catalog_service;
pub mod key_matcher;
pub mod timestamp;
pub mod upload_service;

use crate::config::StorageSettings;
use backend::ObjectBackend;
use catalog_service::CatalogService;
use std::sync::Arc;
use upload_service::UploadService;

/// Router state. Cloned per request; everything inside is read-only.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    pub uploads: UploadService,
}

impl AppState {
    pub fn new(backend: Arc<dyn ObjectBackend>, settings: Arc<StorageSettings>) -> Self {
        Self {
            catalog: CatalogService::new(backend.clone(), settings.clone()),
            uploads: UploadService::new(backend, settings),
        }
    }
}

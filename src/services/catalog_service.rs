//! CatalogService — lists the bucket and classifies what it finds.
//!
//! Each listing is one backend call. Entries that do not follow the expected
//! naming convention are dropped silently; a backend failure fails the whole
//! listing and no partial result is returned.

use crate::{
    config::StorageSettings,
    models::{
        descriptor::{PlayerAssetDescriptor, VideoDescriptor},
        object::StoredObject,
    },
    services::{
        backend::{BackendError, ObjectBackend},
        key_matcher::{is_video_key, match_player_asset},
        timestamp::format_timestamp,
    },
};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("listing failed: {0}")]
    ListingFailure(#[source] BackendError),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Clone)]
pub struct CatalogService {
    backend: Arc<dyn ObjectBackend>,
    settings: Arc<StorageSettings>,
}

impl CatalogService {
    pub fn new(backend: Arc<dyn ObjectBackend>, settings: Arc<StorageSettings>) -> Self {
        Self { backend, settings }
    }

    /// Videos stored under the upload prefix, in backend order.
    pub async fn list_videos(&self) -> CatalogResult<Vec<VideoDescriptor>> {
        self.list(&self.settings.upload_prefix, |object| {
            if !is_video_key(&object.key) {
                return None;
            }
            let timestamp = format_timestamp(object.last_modified);
            Some(VideoDescriptor {
                public_url: self.settings.public_url(&object.key),
                key: object.key.clone(),
                last_modified_formatted: timestamp.display,
                last_modified_raw: timestamp.raw,
            })
        })
        .await
    }

    /// Player PNGs stored under the players prefix, in backend order.
    pub async fn list_player_assets(&self) -> CatalogResult<Vec<PlayerAssetDescriptor>> {
        self.list(&self.settings.players_prefix, |object| {
            let parsed = match_player_asset(&object.key, &self.settings.players_prefix)?;
            Some(PlayerAssetDescriptor {
                key: object.key.clone(),
                public_url: self.settings.public_url(&object.key),
                folder: parsed.folder.to_string(),
                game_number: parsed.game_number.to_string(),
                user_code: parsed.user_code.to_string(),
            })
        })
        .await
    }

    async fn list<D>(
        &self,
        prefix: &str,
        classify: impl Fn(&StoredObject) -> Option<D>,
    ) -> CatalogResult<Vec<D>> {
        let objects = self
            .backend
            .list_by_prefix(prefix)
            .await
            .map_err(CatalogError::ListingFailure)?;

        let listed = objects.len();
        let listed_bytes: i64 = objects.iter().map(|o| o.size).sum();
        let descriptors: Vec<D> = objects.iter().filter_map(classify).collect();

        tracing::debug!(
            prefix,
            listed,
            listed_bytes,
            kept = descriptors.len(),
            "catalog listing"
        );
        Ok(descriptors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::backend::test_support::{MemoryBackend, settings};
    use chrono::{TimeZone, Utc};

    fn object(key: &str) -> StoredObject {
        StoredObject::new(key, Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap())
    }

    fn service(backend: MemoryBackend) -> (CatalogService, Arc<MemoryBackend>) {
        let backend = Arc::new(backend);
        (CatalogService::new(backend.clone(), settings()), backend)
    }

    #[tokio::test]
    async fn videos_get_urls_and_both_timestamps() {
        let (catalog, backend) = service(MemoryBackend::with_objects(vec![object(
            "uploads/a.mp4",
        )]));

        let files = catalog.list_videos().await.unwrap();

        assert_eq!(backend.listed_prefixes(), vec!["uploads/"]);
        assert_eq!(
            files,
            vec![VideoDescriptor {
                key: "uploads/a.mp4".into(),
                public_url: "https://test-bucket.s3.ap-southeast-1.amazonaws.com/uploads/a.mp4"
                    .into(),
                last_modified_formatted: "January 15, 2024 • 06:00:00 PM +08".into(),
                last_modified_raw: "2024-01-15T10:00:00.000Z".into(),
            }]
        );
    }

    #[tokio::test]
    async fn non_video_uploads_are_skipped_and_order_is_kept() {
        let (catalog, _) = service(MemoryBackend::with_objects(vec![
            object("uploads/z.webm"),
            object("uploads/notes.txt"),
            object("uploads/b.MOV"),
            object("uploads/"),
        ]));

        let keys: Vec<String> = catalog
            .list_videos()
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.key)
            .collect();

        assert_eq!(keys, vec!["uploads/z.webm", "uploads/b.MOV"]);
    }

    #[tokio::test]
    async fn only_well_formed_player_assets_are_listed() {
        let (catalog, backend) = service(MemoryBackend::with_objects(vec![
            object("players/g1/01_xyz.png"),
            object("players/g1/notmatching.png"),
        ]));

        let files = catalog.list_player_assets().await.unwrap();

        assert_eq!(backend.listed_prefixes(), vec!["players/"]);
        assert_eq!(
            files,
            vec![PlayerAssetDescriptor {
                key: "players/g1/01_xyz.png".into(),
                public_url:
                    "https://test-bucket.s3.ap-southeast-1.amazonaws.com/players/g1/01_xyz.png"
                        .into(),
                folder: "g1".into(),
                game_number: "01".into(),
                user_code: "xyz".into(),
            }]
        );
    }

    #[tokio::test]
    async fn empty_bucket_lists_nothing() {
        let (catalog, _) = service(MemoryBackend::default());
        assert!(catalog.list_videos().await.unwrap().is_empty());
        assert!(catalog.list_player_assets().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn backend_failure_fails_the_whole_listing() {
        let (catalog, _) = service(MemoryBackend::failing());

        let err = catalog.list_videos().await.unwrap_err();
        assert!(matches!(
            err,
            CatalogError::ListingFailure(BackendError::List { .. })
        ));
        assert!(catalog.list_player_assets().await.is_err());
    }

    #[tokio::test]
    async fn player_assets_follow_the_configured_prefix() {
        let mut custom = (*settings()).clone();
        custom.players_prefix = "assets/players/".into();
        let backend = Arc::new(MemoryBackend::with_objects(vec![
            object("assets/players/g1/01_xyz.png"),
            object("players/g1/02_abc.png"),
        ]));
        let catalog = CatalogService::new(backend.clone(), Arc::new(custom));

        let files = catalog.list_player_assets().await.unwrap();

        assert_eq!(backend.listed_prefixes(), vec!["assets/players/"]);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].key, "assets/players/g1/01_xyz.png");
        assert_eq!(files[0].folder, "g1");
        assert_eq!(files[0].game_number, "01");
    }
}

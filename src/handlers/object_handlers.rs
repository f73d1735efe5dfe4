//! HTTP handlers for uploads and bucket listings.
//! Decodes the multipart form and delegates bucket work to the services in
//! `AppState`.

use crate::{
    errors::{AppError, MISSING_FILE_DATA},
    models::{
        descriptor::{PlayerAssetDescriptor, VideoDescriptor},
        upload::UploadRequest,
    },
    services::AppState,
};
use axum::{
    Json,
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
};
use serde::Serialize;

/// Multipart field carrying the uploaded file.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct FileList<T> {
    pub files: Vec<T>,
}

/// `POST /upload` — store the `file` field under the upload prefix.
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let mut multipart = multipart.map_err(|rejection| {
        tracing::debug!(%rejection, "upload body is not a multipart form");
        AppError::bad_request(MISSING_FILE_DATA)
    })?;

    let request = read_file_field(&mut multipart).await?;
    let url = state.uploads.upload(request).await?;

    Ok(Json(UploadResponse { url }))
}

/// `GET /list-files` — videos under the upload prefix.
pub async fn list_files(
    State(state): State<AppState>,
) -> Result<Json<FileList<VideoDescriptor>>, AppError> {
    let files = state
        .catalog
        .list_videos()
        .await
        .map_err(|err| AppError::listing(err, "Could not list files"))?;

    Ok(Json(FileList { files }))
}

/// `GET /list-players` — player PNGs under the players prefix.
pub async fn list_players(
    State(state): State<AppState>,
) -> Result<Json<FileList<PlayerAssetDescriptor>>, AppError> {
    let files = state
        .catalog
        .list_player_assets()
        .await
        .map_err(|err| AppError::listing(err, "Could not list player PNGs"))?;

    Ok(Json(FileList { files }))
}

/// Pull filename, MIME type and bytes out of the first `file` field.
/// Other fields are skipped. A form without a `file` field yields an empty
/// request, which the upload service rejects.
async fn read_file_field(multipart: &mut Multipart) -> Result<UploadRequest, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let original_filename = field.file_name().map(str::to_string);
        let mime_type = field.content_type().map(str::to_string);
        let payload = field.bytes().await.map_err(multipart_error)?;

        return Ok(UploadRequest {
            original_filename,
            mime_type,
            payload: Some(payload),
        });
    }

    Ok(UploadRequest::default())
}

fn multipart_error(err: MultipartError) -> AppError {
    tracing::debug!(error = %err, "could not read multipart form");
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::new(StatusCode::PAYLOAD_TOO_LARGE, "File too large.")
    } else {
        AppError::bad_request(MISSING_FILE_DATA)
    }
}

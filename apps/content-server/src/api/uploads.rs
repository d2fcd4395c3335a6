// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use utoipa::ToSchema;

use crate::{
    error::ApiError,
    models::{DeleteAssetResponse, FileUploadResponse, ImageUploadResponse, StoredAsset},
    state::AppState,
    storage::assets::{UploadRequest, FILE_EXTENSIONS, IMAGE_EXTENSIONS},
};

/// Multipart field carrying the file.
pub const FILE_FIELD: &str = "file";

/// Multipart form accepted by the upload endpoints.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

struct FilePart {
    filename: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

async fn read_file_part(mut multipart: Multipart) -> Result<FilePart, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;
        return Ok(FilePart {
            filename,
            content_type,
            bytes: bytes.to_vec(),
        });
    }
    Err(ApiError::bad_request(format!(
        "Missing multipart field `{FILE_FIELD}`"
    )))
}

async fn store(
    state: &AppState,
    multipart: Multipart,
    folder: &str,
    allowed_extensions: &[&str],
) -> Result<StoredAsset, ApiError> {
    let part = read_file_part(multipart).await?;
    let stored = state
        .assets
        .upload(UploadRequest {
            bytes: part.bytes,
            filename: &part.filename,
            content_type: part.content_type.as_deref(),
            allowed_extensions,
            folder,
        })
        .await?;
    Ok(stored)
}

/// Upload a project cover image.
#[utoipa::path(
    post,
    path = "/api/v1/projects/upload-image",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    tag = "Assets",
    responses(
        (status = 200, body = ImageUploadResponse),
        (status = 400, description = "Missing file or unsupported extension"),
        (status = 502, description = "Remote object store rejected the upload")
    )
)]
pub async fn upload_project_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ImageUploadResponse>, ApiError> {
    let stored = store(&state, multipart, "projects", IMAGE_EXTENSIONS).await?;
    Ok(Json(ImageUploadResponse {
        image_url: stored.public_url,
        storage_path: stored.storage_path,
    }))
}

/// Upload an image or PDF (profile picture, CV, blog media).
#[utoipa::path(
    post,
    path = "/api/v1/resources/upload",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    tag = "Assets",
    responses(
        (status = 200, body = FileUploadResponse),
        (status = 400, description = "Missing file or unsupported extension"),
        (status = 502, description = "Remote object store rejected the upload")
    )
)]
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<FileUploadResponse>, ApiError> {
    let stored = store(&state, multipart, "files", FILE_EXTENSIONS).await?;
    Ok(Json(FileUploadResponse {
        url: stored.public_url,
        storage_path: stored.storage_path,
    }))
}

/// Best-effort delete of a stored asset.
#[utoipa::path(
    delete,
    path = "/api/v1/resources/assets/{path}",
    params(("path" = String, Path, description = "Storage path returned by an upload")),
    tag = "Assets",
    responses((status = 200, body = DeleteAssetResponse))
)]
pub async fn delete_asset(
    Path(path): Path<String>,
    State(state): State<AppState>,
) -> Json<DeleteAssetResponse> {
    let deleted = state.assets.delete(&path).await;
    Json(DeleteAssetResponse { deleted })
}

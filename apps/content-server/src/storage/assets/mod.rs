// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Asset Storage Gateway
//!
//! Uploads and deletes binary assets against one of two interchangeable
//! backends, picked from configuration at startup:
//!
//! - [`LocalDiskBackend`] writes under a fixed upload directory
//! - [`ObjectStoreBackend`] talks to a remote bucket API over HTTP
//!
//! Extension validation and name generation live here, once, in front of
//! both backends. An upload is rejected before any disk or network I/O when
//! its extension is not allowed, and it is always stored under a fresh
//! `{folder}/{uuid}.{ext}` name: the client-supplied file name is never used
//! as a path.

pub mod local;
pub mod remote;

use std::path::{Component, Path};
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

pub use local::LocalDiskBackend;
pub use remote::ObjectStoreBackend;

use crate::config::StorageConfig;
use crate::models::StoredAsset;

/// Extensions accepted for image fields.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

/// Extensions accepted by the general upload endpoint.
pub const FILE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "pdf"];

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("{0}")]
    ValidationFailed(String),

    #[error("failed to write {path}: {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("upload failed{}: {detail}", status_suffix(.status))]
    UploadFailed { status: Option<u16>, detail: String },
}

fn status_suffix(status: &Option<u16>) -> String {
    status
        .map(|code| format!(" with status {code}"))
        .unwrap_or_default()
}

pub type AssetResult<T> = Result<T, AssetError>;

/// A storage backend. Paths handed to it are already validated and unique.
#[async_trait]
pub trait AssetBackend: Send + Sync {
    /// Short backend name for logs and health output.
    fn name(&self) -> &'static str;

    /// Store `bytes` at `storage_path`.
    async fn put(&self, storage_path: &str, bytes: Vec<u8>, content_type: &str) -> AssetResult<()>;

    /// Best-effort removal; `true` only if the backend confirmed it.
    async fn remove(&self, storage_path: &str) -> bool;

    /// URL under which `storage_path` is served.
    fn public_url(&self, storage_path: &str) -> String;
}

/// One upload handed to the gateway.
pub struct UploadRequest<'a> {
    pub bytes: Vec<u8>,
    /// Client-supplied name; only its extension is used.
    pub filename: &'a str,
    /// Client-supplied MIME type, derived from the extension when absent.
    pub content_type: Option<&'a str>,
    pub allowed_extensions: &'a [&'a str],
    /// Folder inside the backend, e.g. `projects`.
    pub folder: &'a str,
}

#[derive(Clone)]
pub struct AssetGateway {
    backend: Arc<dyn AssetBackend>,
}

impl AssetGateway {
    pub fn new(backend: Arc<dyn AssetBackend>) -> Self {
        Self { backend }
    }

    /// Build the gateway for the configured backend.
    pub fn from_config(config: &StorageConfig) -> AssetResult<Self> {
        let backend: Arc<dyn AssetBackend> = match config {
            StorageConfig::Local { upload_dir } => Arc::new(LocalDiskBackend::new(upload_dir)),
            StorageConfig::Remote(remote) => Arc::new(ObjectStoreBackend::new(remote)?),
        };
        tracing::info!(backend = backend.name(), "Asset storage configured");
        Ok(Self::new(backend))
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Validate and store one file.
    pub async fn upload(&self, request: UploadRequest<'_>) -> AssetResult<StoredAsset> {
        let extension = extension_of(request.filename).unwrap_or_default();
        if !request
            .allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&extension))
        {
            return Err(AssetError::ValidationFailed(format!(
                "Unsupported file type. Allowed: {}",
                request.allowed_extensions.join(", ")
            )));
        }
        if !is_valid_folder(request.folder) {
            return Err(AssetError::ValidationFailed(format!(
                "Invalid folder `{}`",
                request.folder
            )));
        }

        let storage_path = format!("{}/{}.{}", request.folder, Uuid::new_v4(), extension);
        let content_type = request
            .content_type
            .filter(|ct| !ct.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| content_type_for(&extension).to_string());
        let size = request.bytes.len();

        self.backend
            .put(&storage_path, request.bytes, &content_type)
            .await?;

        tracing::info!(
            backend = self.backend.name(),
            path = %storage_path,
            size,
            content_type = %content_type,
            "Asset uploaded"
        );
        Ok(StoredAsset {
            public_url: self.backend.public_url(&storage_path),
            storage_path,
        })
    }

    /// Best-effort delete; callers must check the result.
    pub async fn delete(&self, storage_path: &str) -> bool {
        if !is_safe_storage_path(storage_path) {
            tracing::warn!(path = %storage_path, "Refusing to delete unsafe asset path");
            return false;
        }
        let deleted = self.backend.remove(storage_path).await;
        if deleted {
            tracing::info!(backend = self.backend.name(), path = %storage_path, "Asset deleted");
        } else {
            tracing::warn!(backend = self.backend.name(), path = %storage_path, "Asset delete failed");
        }
        deleted
    }
}

/// Lower-cased text after the last `.` of the file name, if any.
pub fn extension_of(filename: &str) -> Option<String> {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let (_, extension) = name.rsplit_once('.')?;
    if extension.is_empty() {
        return None;
    }
    Some(extension.to_ascii_lowercase())
}

/// MIME type for a known extension.
pub fn content_type_for(extension: &str) -> &'static str {
    match extension {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

fn is_valid_folder(folder: &str) -> bool {
    !folder.is_empty()
        && folder.split('/').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        })
}

/// Relative path made only of normal components.
fn is_safe_storage_path(path: &str) -> bool {
    !path.is_empty()
        && !path.contains('\\')
        && Path::new(path)
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
}

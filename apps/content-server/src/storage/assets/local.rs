// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Local disk backend. Files are written below the upload directory and
//! served by the HTTP layer under [`LOCAL_UPLOADS_ROUTE`].

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{AssetBackend, AssetError, AssetResult};
use crate::config::LOCAL_UPLOADS_ROUTE;

pub struct LocalDiskBackend {
    root: PathBuf,
}

impl LocalDiskBackend {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn full_path(&self, storage_path: &str) -> PathBuf {
        self.root.join(storage_path)
    }
}

#[async_trait]
impl AssetBackend for LocalDiskBackend {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn put(&self, storage_path: &str, bytes: Vec<u8>, _content_type: &str) -> AssetResult<()> {
        let path = self.full_path(storage_path);
        let write_failed = |source| AssetError::WriteFailed {
            path: storage_path.to_string(),
            source,
        };

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(write_failed)?;
        }
        tokio::fs::write(&path, bytes).await.map_err(write_failed)
    }

    async fn remove(&self, storage_path: &str) -> bool {
        match tokio::fs::remove_file(self.full_path(storage_path)).await {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(path = %storage_path, error = %e, "Local asset not removed");
                false
            }
        }
    }

    fn public_url(&self, storage_path: &str) -> String {
        format!("{LOCAL_UPLOADS_ROUTE}/{storage_path}")
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DATA_DIR` | Directory holding the content database | `./data` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8000` |
//! | `ALLOWED_ORIGINS` | Comma-separated CORS origins | `http://localhost:3000,http://127.0.0.1:3000` |
//! | `STORAGE_BACKEND` | Asset backend (`local` or `remote`) | `local` |
//! | `UPLOAD_DIR` | Root directory of the local asset backend | `./uploads` |
//! | `OBJECT_STORE_URL` | Base URL of the remote object store | Required for `remote` |
//! | `OBJECT_STORE_KEY` | Service key of the remote object store | Required for `remote` |
//! | `OBJECT_STORE_BUCKET` | Bucket receiving uploads | `uploads` |
//! | `OBJECT_STORE_TIMEOUT_SECS` | Upper bound for one object store request | `30` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

pub const DATA_DIR_ENV: &str = "DATA_DIR";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const ALLOWED_ORIGINS_ENV: &str = "ALLOWED_ORIGINS";
pub const STORAGE_BACKEND_ENV: &str = "STORAGE_BACKEND";
pub const UPLOAD_DIR_ENV: &str = "UPLOAD_DIR";
pub const OBJECT_STORE_URL_ENV: &str = "OBJECT_STORE_URL";
pub const OBJECT_STORE_KEY_ENV: &str = "OBJECT_STORE_KEY";
pub const OBJECT_STORE_BUCKET_ENV: &str = "OBJECT_STORE_BUCKET";
pub const OBJECT_STORE_TIMEOUT_ENV: &str = "OBJECT_STORE_TIMEOUT_SECS";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";
const DEFAULT_UPLOAD_DIR: &str = "./uploads";
const DEFAULT_BUCKET: &str = "uploads";
const DEFAULT_OBJECT_STORE_TIMEOUT_SECS: u64 = 30;

/// File name of the embedded database inside `DATA_DIR`.
pub const DATABASE_FILE: &str = "content.redb";

/// URL prefix under which the local backend's files are served.
pub const LOCAL_UPLOADS_ROUTE: &str = "/uploads";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is required when STORAGE_BACKEND=remote")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Connection settings for the remote object store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectStoreConfig {
    pub base_url: String,
    pub api_key: String,
    pub bucket: String,
    pub timeout: Duration,
}

/// Which asset backend the gateway is wired to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    Local { upload_dir: PathBuf },
    Remote(ObjectStoreConfig),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub storage: StorageConfig,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let port = match var(PORT_ENV) {
            Some(raw) => raw.trim().parse().map_err(|e| ConfigError::Invalid {
                name: PORT_ENV,
                reason: format!("{e}"),
            })?,
            None => DEFAULT_PORT,
        };

        let allowed_origins = var(ALLOWED_ORIGINS_ENV)
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().trim_end_matches('/'))
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let backend = var(STORAGE_BACKEND_ENV).unwrap_or_else(|| "local".to_string());
        let storage = match backend.trim().to_ascii_lowercase().as_str() {
            "local" => StorageConfig::Local {
                upload_dir: PathBuf::from(
                    var(UPLOAD_DIR_ENV).unwrap_or_else(|| DEFAULT_UPLOAD_DIR.to_string()),
                ),
            },
            "remote" => StorageConfig::Remote(object_store_config(&var)?),
            other => {
                return Err(ConfigError::Invalid {
                    name: STORAGE_BACKEND_ENV,
                    reason: format!("expected `local` or `remote`, got `{other}`"),
                })
            }
        };

        let log_format = match var(LOG_FORMAT_ENV).as_deref().map(str::trim) {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: LOG_FORMAT_ENV,
                    reason: format!("expected `json` or `pretty`, got `{other}`"),
                })
            }
        };

        Ok(Self {
            data_dir: PathBuf::from(var(DATA_DIR_ENV).unwrap_or_else(|| DEFAULT_DATA_DIR.to_string())),
            host: var(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            allowed_origins,
            storage,
            log_format,
        })
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::Invalid {
                name: HOST_ENV,
                reason: format!("{e}"),
            })
    }
}

fn object_store_config(
    var: &impl Fn(&str) -> Option<String>,
) -> Result<ObjectStoreConfig, ConfigError> {
    let raw_url = var(OBJECT_STORE_URL_ENV).ok_or(ConfigError::Missing(OBJECT_STORE_URL_ENV))?;
    let parsed = Url::parse(raw_url.trim()).map_err(|e| ConfigError::Invalid {
        name: OBJECT_STORE_URL_ENV,
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid {
            name: OBJECT_STORE_URL_ENV,
            reason: format!("unsupported scheme `{}`", parsed.scheme()),
        });
    }

    let api_key = var(OBJECT_STORE_KEY_ENV).ok_or(ConfigError::Missing(OBJECT_STORE_KEY_ENV))?;

    let timeout_secs = match var(OBJECT_STORE_TIMEOUT_ENV) {
        Some(raw) => raw.trim().parse().map_err(|e| ConfigError::Invalid {
            name: OBJECT_STORE_TIMEOUT_ENV,
            reason: format!("{e}"),
        })?,
        None => DEFAULT_OBJECT_STORE_TIMEOUT_SECS,
    };

    Ok(ObjectStoreConfig {
        base_url: raw_url.trim().trim_end_matches('/').to_string(),
        api_key: api_key.trim().to_string(),
        bucket: var(OBJECT_STORE_BUCKET_ENV).unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
        timeout: Duration::from_secs(timeout_secs),
    })
}

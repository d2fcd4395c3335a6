// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Content Storage Module
//!
//! Persistence for portfolio content and uploaded assets.
//!
//! ## Layout
//!
//! ```text
//! {DATA_DIR}/
//!   content.redb        # one table per content kind, plus id sequences
//! {UPLOAD_DIR}/         # local asset backend only
//!   projects/{uuid}.{ext}
//!   files/{uuid}.{ext}
//! ```
//!
//! Records are stored as JSON under a `u64` key. Ids come from a
//! per-table sequence and are never reused, even after deletes.
//!
//! ## Layers
//!
//! - [`database`]: redb handle, table definitions and transactions
//! - [`entity`]: the traits every content kind implements
//! - [`merge`]: whitelisted partial updates
//! - [`repository`]: generic CRUD, ordering and singleton access
//! - [`assets`]: upload gateway over local or remote backends

pub mod assets;
pub mod database;
pub mod entity;
pub mod merge;
pub mod repository;

pub use assets::{AssetBackend, AssetError, AssetGateway, UploadRequest};
pub use database::{ContentDatabase, DbError, DbResult};
pub use entity::{Entity, FieldMap, Orderable, SingletonEntity, SINGLETON_ID};
pub use merge::{merge_patch, MergeError, Merged};
pub use repository::{RepoError, RepoResult, Repository, SingletonStore};

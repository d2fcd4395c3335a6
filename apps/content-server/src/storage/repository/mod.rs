// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository layer providing typed access to the content database.
//!
//! A single generic [`Repository`] serves every collection kind; orderable
//! kinds additionally get `reorder`, and single-record kinds go through
//! [`SingletonStore`].

pub mod content;
pub mod ordering;
pub mod singleton;

pub use content::Repository;
pub use singleton::SingletonStore;

use super::database::DbError;
use super::merge::MergeError;

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: u64 },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Database(#[from] DbError),
}

pub type RepoResult<T> = Result<T, RepoError>;

impl From<MergeError> for RepoError {
    fn from(e: MergeError) -> Self {
        RepoError::Validation(e.to_string())
    }
}

macro_rules! database_error_from {
    ($($source:ty),+ $(,)?) => {
        $(
            impl From<$source> for RepoError {
                fn from(e: $source) -> Self {
                    RepoError::Database(DbError::from(e))
                }
            }
        )+
    };
}

database_error_from!(
    redb::TableError,
    redb::StorageError,
    redb::TransactionError,
    redb::CommitError,
    serde_json::Error,
);

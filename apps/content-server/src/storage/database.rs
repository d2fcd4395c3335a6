// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded content database backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - one table per content kind: id (`u64`) → serialized record (JSON bytes)
//! - `sequences`: table name → last identifier handed out
//!
//! Every call opens its own transaction. A write transaction that is not
//! committed is aborted when it is dropped, so every exit path releases it.

use std::path::Path;

use redb::{
    Database, ReadTransaction, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction,
};

// =============================================================================
// Table Definitions
// =============================================================================

pub const PROJECTS: &str = "projects";
pub const SERVICES: &str = "services";
pub const TIMELINE_ITEMS: &str = "timeline_items";
pub const MESSAGES: &str = "messages";
pub const BLOG_POSTS: &str = "blog_posts";
pub const ABOUT: &str = "about";
pub const SETTINGS: &str = "settings";

const CONTENT_TABLES: [&str; 7] = [
    PROJECTS,
    SERVICES,
    TIMELINE_ITEMS,
    MESSAGES,
    BLOG_POSTS,
    ABOUT,
    SETTINGS,
];

/// Identifier allocation: table name → last id handed out.
const SEQUENCES: TableDefinition<&str, u64> = TableDefinition::new("sequences");

/// Table holding the records of one content kind.
pub fn content_table(name: &'static str) -> TableDefinition<'static, u64, &'static [u8]> {
    TableDefinition::new(name)
}

// =============================================================================
// Error Type
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// ContentDatabase
// =============================================================================

pub struct ContentDatabase {
    db: Database,
}

impl ContentDatabase {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> DbResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let db = Database::create(path)?;

        // Pre-create all tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            for name in CONTENT_TABLES {
                let _ = write_txn.open_table(content_table(name))?;
            }
            let _ = write_txn.open_table(SEQUENCES)?;
        }
        write_txn.commit()?;

        tracing::info!(path = %path.display(), "Content database opened");
        Ok(Self { db })
    }

    /// Run `f` inside a read transaction.
    pub fn read<T, E>(&self, f: impl FnOnce(&ReadTransaction) -> Result<T, E>) -> Result<T, E>
    where
        E: From<DbError>,
    {
        let txn = self.db.begin_read().map_err(DbError::from)?;
        f(&txn)
    }

    /// Run `f` inside a write transaction and commit only if it succeeds.
    ///
    /// redb admits a single writer at a time, so concurrent callers are
    /// applied one after another in commit order.
    pub fn write<T, E>(&self, f: impl FnOnce(&WriteTransaction) -> Result<T, E>) -> Result<T, E>
    where
        E: From<DbError>,
    {
        let txn = self.db.begin_write().map_err(DbError::from)?;
        let value = f(&txn)?;
        txn.commit().map_err(DbError::from)?;
        Ok(value)
    }

    /// Verify that a read transaction can be opened on every content table.
    pub fn health_check(&self) -> DbResult<()> {
        let txn = self.db.begin_read()?;
        for name in CONTENT_TABLES {
            txn.open_table(content_table(name))?;
        }
        Ok(())
    }
}

/// Allocate the next identifier for `table` within an open write transaction.
///
/// Identifiers start at 1 and are never handed out twice, even after the
/// record holding the highest id is removed.
pub fn next_id(txn: &WriteTransaction, table: &str) -> DbResult<u64> {
    let mut sequences = txn.open_table(SEQUENCES)?;
    let last = sequences.get(table)?.map(|v| v.value()).unwrap_or(0);
    let next = last + 1;
    sequences.insert(table, next)?;
    Ok(next)
}

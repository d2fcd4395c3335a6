// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Store for single-record kinds (profile, site settings).
//!
//! The record lives under the fixed key [`SINGLETON_ID`]. Both the
//! get-or-create read and the upsert run inside one write transaction, so two
//! first requests can never create two rows.

use std::marker::PhantomData;

use chrono::Utc;
use serde_json::Value;

use super::content::{read_row, write_row};
use super::RepoResult;
use crate::storage::database::{content_table, ContentDatabase};
use crate::storage::entity::{SingletonEntity, SINGLETON_ID};
use crate::storage::merge::merge_patch;

pub struct SingletonStore<'a, E> {
    db: &'a ContentDatabase,
    _kind: PhantomData<E>,
}

impl<'a, E: SingletonEntity> SingletonStore<'a, E> {
    pub fn new(db: &'a ContentDatabase) -> Self {
        Self {
            db,
            _kind: PhantomData,
        }
    }

    /// Return the record, creating it from the placeholder on first read.
    pub fn get_or_create(&self) -> RepoResult<E> {
        let (record, created) = self.db.write(|txn| -> RepoResult<(E, bool)> {
            let mut table = txn.open_table(content_table(E::TABLE))?;
            if let Some(existing) = read_row::<E>(&table, SINGLETON_ID)? {
                return Ok((existing, false));
            }

            let mut record = E::placeholder();
            record.set_id(SINGLETON_ID);
            record.touch(Utc::now());
            write_row(&mut table, &record)?;
            Ok((record, true))
        })?;

        if created {
            tracing::info!(kind = E::KIND, "Singleton created with defaults");
        }
        Ok(record)
    }

    /// Merge `patch` into the record, seeding it from schema defaults if absent.
    pub fn upsert(&self, patch: &Value) -> RepoResult<E> {
        let (record, applied) = self.db.write(|txn| -> RepoResult<(E, Vec<String>)> {
            let mut table = txn.open_table(content_table(E::TABLE))?;
            let base = match read_row::<E>(&table, SINGLETON_ID)? {
                Some(existing) => existing,
                None => {
                    let mut seed = E::default();
                    seed.set_id(SINGLETON_ID);
                    seed
                }
            };

            let merged = merge_patch(&base, patch)?;
            let mut record = merged.entity;
            record.touch(Utc::now());
            write_row(&mut table, &record)?;
            Ok((record, merged.applied))
        })?;

        tracing::info!(kind = E::KIND, fields = ?applied, "Singleton updated");
        Ok(record)
    }
}

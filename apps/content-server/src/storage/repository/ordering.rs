// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ordering coordinator for orderable collections.
//!
//! `reorder` assigns `order = index` to each listed id and commits all writes
//! as one batch. Ids that do not exist are skipped. Records that are not
//! listed keep their previous index, so gaps and duplicate indexes can remain.
//!
//! The read-then-write runs inside a single write transaction, and redb
//! serializes writers, so one call is never interleaved with another. There is
//! no version check: overlapping calls apply in commit order and the last one
//! wins for every record it lists.

use chrono::Utc;

use super::content::{read_row, write_row, Repository};
use super::RepoResult;
use crate::storage::database::content_table;
use crate::storage::entity::{sort_by_order, Orderable};

impl<'a, E: Orderable> Repository<'a, E> {
    /// Reassign display indexes from the given id sequence.
    ///
    /// Returns the reindexed records in input order, unknown ids omitted.
    pub fn reorder(&self, ordered_ids: &[u64]) -> RepoResult<Vec<E>> {
        let now = Utc::now();
        let (reindexed, skipped) = self.db.write(|txn| -> RepoResult<(Vec<E>, Vec<u64>)> {
            let mut table = txn.open_table(content_table(E::TABLE))?;
            let mut reindexed = Vec::with_capacity(ordered_ids.len());
            let mut skipped = Vec::new();

            for (index, &id) in ordered_ids.iter().enumerate() {
                let Some(mut entity) = read_row::<E>(&table, id)? else {
                    skipped.push(id);
                    continue;
                };
                entity.set_order(index as i64);
                entity.touch(now);
                write_row(&mut table, &entity)?;
                reindexed.push(entity);
            }

            Ok((reindexed, skipped))
        })?;

        tracing::info!(
            kind = E::KIND,
            reindexed = reindexed.len(),
            skipped = ?skipped,
            "Collection reordered"
        );
        Ok(reindexed)
    }

    /// List a window of records sorted by ascending `order`.
    pub fn list_by_order(&self, offset: usize, limit: usize) -> RepoResult<Vec<E>> {
        let mut records = self.list_all()?;
        sort_by_order(&mut records);
        Ok(records.into_iter().skip(offset).take(limit).collect())
    }
}

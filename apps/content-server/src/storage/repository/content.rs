// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Generic repository over one content table.
//!
//! Each operation runs in its own transaction and commits independently.
//! Records are stored as JSON documents keyed by their numeric id.

use std::marker::PhantomData;

use chrono::Utc;
use redb::{ReadableTable, ReadableTableMetadata, Table};
use serde_json::Value;

use super::{RepoError, RepoResult};
use crate::storage::database::{content_table, next_id, ContentDatabase, DbResult};
use crate::storage::entity::Entity;
use crate::storage::merge::merge_patch;

pub(crate) type ContentTable<'txn> = Table<'txn, u64, &'static [u8]>;

/// Typed CRUD access to the table of kind `E`.
pub struct Repository<'a, E> {
    pub(super) db: &'a ContentDatabase,
    _kind: PhantomData<E>,
}

impl<'a, E: Entity> Repository<'a, E> {
    /// Create a new Repository.
    pub fn new(db: &'a ContentDatabase) -> Self {
        Self {
            db,
            _kind: PhantomData,
        }
    }

    /// Get a record by id.
    pub fn get(&self, id: u64) -> RepoResult<E> {
        self.find(id)?.ok_or(RepoError::NotFound { kind: E::KIND, id })
    }

    /// Get a record by id, `None` when it does not exist.
    pub fn find(&self, id: u64) -> RepoResult<Option<E>> {
        let found = self.db.read(|txn| -> DbResult<Option<E>> {
            let table = txn.open_table(content_table(E::TABLE))?;
            read_row(&table, id)
        })?;
        Ok(found)
    }

    /// List a window of records.
    ///
    /// The order of the result is not part of the contract. Callers that
    /// need a display order sort explicitly.
    pub fn list(&self, offset: usize, limit: usize) -> RepoResult<Vec<E>> {
        let records = self.db.read(|txn| -> DbResult<Vec<E>> {
            let table = txn.open_table(content_table(E::TABLE))?;
            let mut records = Vec::new();
            for entry in table.iter()?.skip(offset).take(limit) {
                let (_, value) = entry?;
                records.push(serde_json::from_slice(value.value())?);
            }
            Ok(records)
        })?;
        Ok(records)
    }

    /// List every record.
    pub fn list_all(&self) -> RepoResult<Vec<E>> {
        self.list(0, usize::MAX)
    }

    /// Number of stored records.
    pub fn count(&self) -> RepoResult<u64> {
        let count = self.db.read(|txn| -> DbResult<u64> {
            let table = txn.open_table(content_table(E::TABLE))?;
            Ok(table.len()?)
        })?;
        Ok(count)
    }

    /// Create a record from a fully specified payload.
    ///
    /// Assigns the id and server-managed timestamps and returns the stored form.
    pub fn create(&self, payload: E::Create) -> RepoResult<E> {
        let entity = self.db.write(|txn| -> RepoResult<E> {
            let id = next_id(txn, E::TABLE)?;
            let entity = E::from_create(id, payload, Utc::now());
            let mut table = txn.open_table(content_table(E::TABLE))?;
            ensure_unique(&table, &entity)?;
            write_row(&mut table, &entity)?;
            Ok(entity)
        })?;

        tracing::info!(kind = E::KIND, id = entity.id(), "Record created");
        Ok(entity)
    }

    /// Apply a partial update to `existing`.
    ///
    /// Only whitelisted keys present in `patch` are written; other keys are
    /// ignored. Fails with `NotFound` if the record was removed meanwhile.
    pub fn update(&self, existing: &E, patch: &Value) -> RepoResult<E> {
        let merged = merge_patch(existing, patch)?;
        let mut entity = merged.entity;
        entity.touch(Utc::now());

        self.db.write(|txn| -> RepoResult<()> {
            let mut table = txn.open_table(content_table(E::TABLE))?;
            if table.get(entity.id())?.is_none() {
                return Err(RepoError::NotFound {
                    kind: E::KIND,
                    id: entity.id(),
                });
            }
            ensure_unique(&table, &entity)?;
            write_row(&mut table, &entity)?;
            Ok(())
        })?;

        tracing::info!(
            kind = E::KIND,
            id = entity.id(),
            fields = ?merged.applied,
            ignored = ?merged.ignored,
            "Record updated"
        );
        Ok(entity)
    }

    /// Look up a record and apply a partial update in one commit.
    pub fn update_by_id(&self, id: u64, patch: &Value) -> RepoResult<E> {
        let (entity, applied) = self.db.write(|txn| -> RepoResult<(E, Vec<String>)> {
            let mut table = txn.open_table(content_table(E::TABLE))?;
            let existing: E =
                read_row(&table, id)?.ok_or(RepoError::NotFound { kind: E::KIND, id })?;
            let merged = merge_patch(&existing, patch)?;
            let mut entity = merged.entity;
            entity.touch(Utc::now());
            ensure_unique(&table, &entity)?;
            write_row(&mut table, &entity)?;
            Ok((entity, merged.applied))
        })?;

        tracing::info!(kind = E::KIND, id, fields = ?applied, "Record updated");
        Ok(entity)
    }

    /// Delete a record.
    ///
    /// Removing an id that does not exist is a no-op returning `None`, so
    /// callers do not need to check existence first.
    pub fn remove(&self, id: u64) -> RepoResult<Option<E>> {
        let removed = self.db.write(|txn| -> RepoResult<Option<E>> {
            let mut table = txn.open_table(content_table(E::TABLE))?;
            let removed = match table.remove(id)? {
                Some(value) => Some(serde_json::from_slice(value.value())?),
                None => None,
            };
            Ok(removed)
        })?;

        match &removed {
            Some(_) => tracing::info!(kind = E::KIND, id, "Record removed"),
            None => tracing::debug!(kind = E::KIND, id, "Remove skipped, record absent"),
        }
        Ok(removed)
    }
}

/// Read and decode one row.
pub(crate) fn read_row<E: Entity>(
    table: &impl ReadableTable<u64, &'static [u8]>,
    id: u64,
) -> DbResult<Option<E>> {
    let row = match table.get(id)? {
        Some(value) => Some(serde_json::from_slice(value.value())?),
        None => None,
    };
    Ok(row)
}

/// Encode and store one row under its id.
pub(crate) fn write_row<E: Entity>(table: &mut ContentTable<'_>, entity: &E) -> DbResult<()> {
    let json = serde_json::to_vec(entity)?;
    table.insert(entity.id(), json.as_slice())?;
    Ok(())
}

/// Reject `entity` if another row already holds its unique key.
fn ensure_unique<E: Entity>(
    table: &impl ReadableTable<u64, &'static [u8]>,
    entity: &E,
) -> RepoResult<()> {
    let Some((field, value)) = entity.unique_key() else {
        return Ok(());
    };

    for entry in table.iter()? {
        let (key, row) = entry?;
        if key.value() == entity.id() {
            continue;
        }
        let other: E = serde_json::from_slice(row.value())?;
        if other.unique_key().map(|(_, v)| v) == Some(value) {
            return Err(RepoError::Conflict(format!(
                "{} with {field} `{value}` already exists",
                E::KIND
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlogPost, BlogPostCreate, Message, MessageCreate, Project, ProjectCreate};
    use serde_json::json;

    fn test_db() -> (tempfile::TempDir, ContentDatabase) {
        let dir = tempfile::tempdir().unwrap();
        let db = ContentDatabase::open(&dir.path().join("content.redb")).unwrap();
        (dir, db)
    }

    fn project_payload(title: &str) -> ProjectCreate {
        ProjectCreate {
            title: title.to_string(),
            description: format!("{title} description"),
            image_url: None,
            github_url: Some("https://github.com/me/repo".into()),
            live_url: None,
            technologies: vec!["rust".into(), "axum".into()],
            is_featured: true,
            is_published: true,
            order: 0,
        }
    }

    fn blog_payload(slug: &str) -> BlogPostCreate {
        BlogPostCreate {
            title: "Post".into(),
            slug: slug.into(),
            content: "Body".into(),
            image_url: None,
            external_url: None,
            tags: vec![],
            is_published: false,
            order: 0,
        }
    }

    #[test]
    fn create_then_get_round_trips() {
        let (_dir, db) = test_db();
        let repo = Repository::<Project>::new(&db);

        let payload = project_payload("Compiler");
        let created = repo.create(payload.clone()).unwrap();
        let loaded = repo.get(created.id).unwrap();

        assert_eq!(loaded, created);
        assert_eq!(loaded.title, payload.title);
        assert_eq!(loaded.description, payload.description);
        assert_eq!(loaded.github_url, payload.github_url);
        assert_eq!(loaded.technologies, payload.technologies);
        assert_eq!(loaded.is_featured, payload.is_featured);
        assert_eq!(loaded.order, 0);
        assert!(loaded.updated_at.is_none());
    }

    #[test]
    fn ids_are_unique_and_not_reused() {
        let (_dir, db) = test_db();
        let repo = Repository::<Project>::new(&db);

        let first = repo.create(project_payload("a")).unwrap();
        let second = repo.create(project_payload("b")).unwrap();
        assert_ne!(first.id, second.id);

        repo.remove(second.id).unwrap();
        let third = repo.create(project_payload("c")).unwrap();
        assert!(third.id > second.id);
    }

    #[test]
    fn get_missing_is_not_found() {
        let (_dir, db) = test_db();
        let repo = Repository::<Project>::new(&db);

        let err = repo.get(42).unwrap_err();
        assert!(matches!(err, RepoError::NotFound { id: 42, .. }));
        assert!(repo.find(42).unwrap().is_none());
    }

    #[test]
    fn update_changes_only_patched_fields() {
        let (_dir, db) = test_db();
        let repo = Repository::<Project>::new(&db);
        let created = repo.create(project_payload("Compiler")).unwrap();

        let updated = repo
            .update(&created, &json!({ "title": "Linker", "live_url": "https://demo", "bogus": 1 }))
            .unwrap();

        assert_eq!(updated.title, "Linker");
        assert_eq!(updated.live_url.as_deref(), Some("https://demo"));
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.technologies, created.technologies);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at.is_some());
        assert_eq!(repo.get(created.id).unwrap(), updated);
    }

    #[test]
    fn update_of_removed_record_is_not_found() {
        let (_dir, db) = test_db();
        let repo = Repository::<Project>::new(&db);
        let created = repo.create(project_payload("Gone")).unwrap();
        repo.remove(created.id).unwrap();

        let err = repo.update(&created, &json!({ "title": "Back" })).unwrap_err();
        assert!(matches!(err, RepoError::NotFound { .. }));
        assert!(repo.find(created.id).unwrap().is_none());

        let err = repo.update_by_id(created.id, &json!({ "title": "Back" })).unwrap_err();
        assert!(matches!(err, RepoError::NotFound { .. }));
    }

    #[test]
    fn invalid_patch_is_validation_error() {
        let (_dir, db) = test_db();
        let repo = Repository::<Project>::new(&db);
        let created = repo.create(project_payload("Typed")).unwrap();

        let err = repo
            .update_by_id(created.id, &json!({ "is_featured": "yes" }))
            .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
        assert_eq!(repo.get(created.id).unwrap(), created);
    }

    #[test]
    fn message_update_only_flips_read_flag() {
        let (_dir, db) = test_db();
        let repo = Repository::<Message>::new(&db);
        let message = repo
            .create(MessageCreate {
                sender_name: "Grace".into(),
                sender_email: "grace@example.com".into(),
                subject: "Hello".into(),
                content: "Nice site".into(),
            })
            .unwrap();
        assert!(!message.is_read);

        let updated = repo
            .update_by_id(message.id, &json!({ "is_read": true, "subject": "changed" }))
            .unwrap();
        assert!(updated.is_read);
        assert_eq!(updated.subject, "Hello");
        assert_eq!(updated.created_at, message.created_at);
    }

    #[test]
    fn remove_missing_is_a_noop() {
        let (_dir, db) = test_db();
        let repo = Repository::<Project>::new(&db);
        repo.create(project_payload("Keep")).unwrap();

        let removed = repo.remove(999).unwrap();
        assert!(removed.is_none());
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn remove_returns_deleted_record() {
        let (_dir, db) = test_db();
        let repo = Repository::<Project>::new(&db);
        let created = repo.create(project_payload("Temp")).unwrap();

        let removed = repo.remove(created.id).unwrap();
        assert_eq!(removed, Some(created.clone()));
        assert!(repo.find(created.id).unwrap().is_none());
    }

    #[test]
    fn list_windows_with_offset_and_limit() {
        let (_dir, db) = test_db();
        let repo = Repository::<Project>::new(&db);
        for i in 0..5 {
            repo.create(project_payload(&format!("p{i}"))).unwrap();
        }

        assert_eq!(repo.list_all().unwrap().len(), 5);
        assert_eq!(repo.list(1, 2).unwrap().len(), 2);
        assert_eq!(repo.list(4, 10).unwrap().len(), 1);
        assert!(repo.list(10, 10).unwrap().is_empty());
        assert_eq!(repo.count().unwrap(), 5);
    }

    #[test]
    fn duplicate_slug_is_conflict() {
        let (_dir, db) = test_db();
        let repo = Repository::<BlogPost>::new(&db);

        let first = repo.create(blog_payload("hello-world")).unwrap();
        let err = repo.create(blog_payload("hello-world")).unwrap_err();
        assert!(matches!(err, RepoError::Conflict(_)));
        assert_eq!(repo.count().unwrap(), 1);

        let second = repo.create(blog_payload("second")).unwrap();
        let err = repo
            .update_by_id(second.id, &json!({ "slug": "hello-world" }))
            .unwrap_err();
        assert!(matches!(err, RepoError::Conflict(_)));

        // Re-saving a post with its own slug is fine.
        repo.update_by_id(first.id, &json!({ "slug": "hello-world", "is_published": true }))
            .unwrap();
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Sparse merge of a partial update into an existing record.
//!
//! Only keys present in the patch are written. A key that is present with
//! `null` or an empty value still overwrites. Keys outside the kind's
//! settable whitelist are dropped without error.

use serde_json::Value;

use super::entity::Entity;

#[derive(Debug, thiserror::Error)]
#[error("invalid {kind} update: {reason}")]
pub struct MergeError {
    pub kind: &'static str,
    pub reason: String,
}

impl MergeError {
    fn new<E: Entity>(reason: impl Into<String>) -> Self {
        Self {
            kind: E::KIND,
            reason: reason.into(),
        }
    }
}

/// Result of a merge: the new record and the keys that were applied.
#[derive(Debug, Clone)]
pub struct Merged<E> {
    pub entity: E,
    pub applied: Vec<String>,
    pub ignored: Vec<String>,
}

/// Merge `patch` into `existing`, returning the merged record.
///
/// Fails when `patch` is not a JSON object or when a present value does not
/// fit the field's type (for instance `null` for a required string).
pub fn merge_patch<E: Entity>(existing: &E, patch: &Value) -> Result<Merged<E>, MergeError> {
    let Value::Object(updates) = patch else {
        return Err(MergeError::new::<E>("expected a JSON object"));
    };

    let mut fields = existing
        .to_fields()
        .map_err(|e| MergeError::new::<E>(e.to_string()))?;

    let mut applied = Vec::new();
    let mut ignored = Vec::new();
    for (key, value) in updates {
        if E::SETTABLE_FIELDS.contains(&key.as_str()) {
            fields.insert(key.clone(), value.clone());
            applied.push(key.clone());
        } else {
            ignored.push(key.clone());
        }
    }

    let entity = E::from_fields(fields).map_err(|e| MergeError::new::<E>(e.to_string()))?;
    Ok(Merged {
        entity,
        applied,
        ignored,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Message, Project, ProjectCreate};
    use chrono::Utc;
    use serde_json::json;

    fn project() -> Project {
        Project::from_create(
            4,
            ProjectCreate {
                title: "Compiler".into(),
                description: "A toy compiler".into(),
                image_url: Some("https://cdn/img.png".into()),
                github_url: None,
                live_url: None,
                technologies: vec!["rust".into()],
                is_featured: false,
                is_published: true,
                order: 2,
            },
            Utc::now(),
        )
    }

    #[test]
    fn absent_fields_are_untouched() {
        let base = project();
        let merged = merge_patch(&base, &json!({ "title": "Interpreter" })).unwrap();

        assert_eq!(merged.entity.title, "Interpreter");
        assert_eq!(merged.entity.description, base.description);
        assert_eq!(merged.entity.image_url, base.image_url);
        assert_eq!(merged.entity.technologies, base.technologies);
        assert_eq!(merged.entity.order, base.order);
        assert_eq!(merged.applied, vec!["title"]);
    }

    #[test]
    fn explicit_null_and_empty_values_overwrite() {
        let base = project();
        let merged = merge_patch(
            &base,
            &json!({ "image_url": null, "technologies": [], "description": "" }),
        )
        .unwrap();

        assert_eq!(merged.entity.image_url, None);
        assert!(merged.entity.technologies.is_empty());
        assert_eq!(merged.entity.description, "");
    }

    #[test]
    fn unknown_and_server_managed_keys_are_ignored() {
        let base = project();
        let merged = merge_patch(
            &base,
            &json!({ "id": 99, "created_at": "2001-01-01T00:00:00Z", "owner": "x", "is_featured": true }),
        )
        .unwrap();

        assert_eq!(merged.entity.id, base.id);
        assert_eq!(merged.entity.created_at, base.created_at);
        assert!(merged.entity.is_featured);
        assert_eq!(merged.applied, vec!["is_featured"]);
        assert_eq!(merged.ignored.len(), 3);
    }

    #[test]
    fn message_only_accepts_read_flag() {
        let message = Message::from_create(
            1,
            crate::models::MessageCreate {
                sender_name: "Ada".into(),
                sender_email: "ada@example.com".into(),
                subject: "Hi".into(),
                content: "Hello".into(),
            },
            Utc::now(),
        );

        let merged = merge_patch(&message, &json!({ "is_read": true, "content": "edited" })).unwrap();
        assert!(merged.entity.is_read);
        assert_eq!(merged.entity.content, "Hello");
    }

    #[test]
    fn type_mismatch_is_rejected() {
        let base = project();
        let err = merge_patch(&base, &json!({ "title": null })).unwrap_err();
        assert_eq!(err.kind, "Project");

        assert!(merge_patch(&base, &json!({ "order": "first" })).is_err());
        assert!(merge_patch(&base, &json!(["title"])).is_err());
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Traits describing a persisted content kind.
//!
//! A kind declares its table, its creation payload and the whitelist of
//! fields a partial update may touch. The whitelist is produced by
//! [`settable_fields!`], which refuses to compile if a listed name is not a
//! field of the entity struct.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

/// Field map view of a record, keyed by serialized field name.
pub type FieldMap = Map<String, Value>;

pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Fully specified payload accepted by `create`.
    type Create: DeserializeOwned + Send + 'static;

    /// Human-readable kind name used in errors and logs.
    const KIND: &'static str;

    /// Backing table name.
    const TABLE: &'static str;

    /// Fields a partial update is allowed to overwrite.
    const SETTABLE_FIELDS: &'static [&'static str];

    fn id(&self) -> u64;

    /// Build the stored form from a creation payload.
    fn from_create(id: u64, payload: Self::Create, now: DateTime<Utc>) -> Self;

    /// Refresh server-managed modification timestamps.
    fn touch(&mut self, _now: DateTime<Utc>) {}

    /// A `(field, value)` pair that must be unique within the table.
    fn unique_key(&self) -> Option<(&'static str, &str)> {
        None
    }

    fn to_fields(&self) -> Result<FieldMap, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(fields) => Ok(fields),
            _ => Err(<serde_json::Error as serde::ser::Error>::custom(format!(
                "{} does not serialize to an object",
                Self::KIND
            ))),
        }
    }

    fn from_fields(fields: FieldMap) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(fields))
    }
}

/// A kind whose records carry a display `order` index.
pub trait Orderable: Entity {
    fn order(&self) -> i64;
    fn set_order(&mut self, order: i64);
}

/// A kind with at most one record, stored under [`SINGLETON_ID`].
///
/// `Default` yields the schema defaults a first upsert is seeded from.
pub trait SingletonEntity: Entity + Default {
    /// Record created when the singleton is read before it was ever written.
    fn placeholder() -> Self {
        Self::default()
    }

    fn set_id(&mut self, id: u64);
}

/// Fixed key of every singleton row.
pub const SINGLETON_ID: u64 = 1;

/// Build the settable-field whitelist of an entity struct.
///
/// ```rust,ignore
/// const SETTABLE_FIELDS: &'static [&'static str] =
///     settable_fields!(Project { title, description });
/// ```
#[macro_export]
macro_rules! settable_fields {
    ($entity:ty { $($field:ident),+ $(,)? }) => {{
        #[allow(dead_code)]
        fn fields_exist(entity: &$entity) {
            $( let _ = &entity.$field; )+
        }
        &[$(stringify!($field)),+]
    }};
}

/// Sort orderable records by ascending `order`, ties broken by id.
pub fn sort_by_order<E: Orderable>(items: &mut [E]) {
    items.sort_by_key(|item| (item.order(), item.id()));
}

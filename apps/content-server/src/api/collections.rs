// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Handlers shared by every collection kind.
//!
//! Each handler is generic over the entity. The per-kind modules wrap them
//! in documented handlers, e.g. `projects::list_projects` calls
//! `list_ordered::<Project>`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::{
    error::ApiError,
    models::PageQuery,
    state::AppState,
    storage::{Entity, Orderable, Repository},
};

/// List records sorted by display order.
pub async fn list_ordered<E: Orderable>(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<E>>, ApiError> {
    let records = Repository::<E>::new(&state.db).list_by_order(page.offset, page.limit)?;
    Ok(Json(records))
}

pub async fn create<E: Entity>(
    State(state): State<AppState>,
    Json(payload): Json<E::Create>,
) -> Result<(StatusCode, Json<E>), ApiError> {
    let record = Repository::<E>::new(&state.db).create(payload)?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn get_one<E: Entity>(
    Path(id): Path<u64>,
    State(state): State<AppState>,
) -> Result<Json<E>, ApiError> {
    Ok(Json(Repository::<E>::new(&state.db).get(id)?))
}

/// Partial update: only keys present in the body and settable on `E` change.
pub async fn update<E: Entity>(
    Path(id): Path<u64>,
    State(state): State<AppState>,
    Json(patch): Json<Value>,
) -> Result<Json<E>, ApiError> {
    Ok(Json(Repository::<E>::new(&state.db).update_by_id(id, &patch)?))
}

/// Delete a record and return it.
pub async fn remove<E: Entity>(
    Path(id): Path<u64>,
    State(state): State<AppState>,
) -> Result<Json<E>, ApiError> {
    match Repository::<E>::new(&state.db).remove(id)? {
        Some(record) => Ok(Json(record)),
        None => Err(ApiError::not_found(format!("{} {id} not found", E::KIND))),
    }
}

/// Reassign display order from a JSON array of ids.
pub async fn reorder<E: Orderable>(
    State(state): State<AppState>,
    Json(ordered_ids): Json<Vec<u64>>,
) -> Result<Json<Vec<E>>, ApiError> {
    Ok(Json(Repository::<E>::new(&state.db).reorder(&ordered_ids)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlogPost, BlogPostCreate, Project, ProjectCreate, Service};
    use crate::state::test_support::temp_state;
    use serde_json::json;

    fn project(title: &str) -> ProjectCreate {
        serde_json::from_value(json!({ "title": title, "description": "about it" })).unwrap()
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let (_dir, state) = temp_state();

        let (status, Json(created)) = create::<Project>(State(state.clone()), Json(project("Site")))
            .await
            .expect("project creation succeeds");
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.title, "Site");
        assert!(created.is_published);

        let Json(fetched) = get_one::<Project>(Path(created.id), State(state))
            .await
            .expect("project lookup succeeds");
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn missing_record_is_404() {
        let (_dir, state) = temp_state();

        let err = get_one::<Service>(Path(42), State(state.clone())).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err = remove::<Service>(Path(42), State(state.clone())).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err = update::<Service>(Path(42), State(state), Json(json!({ "title": "x" })))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_ignores_server_managed_fields() {
        let (_dir, state) = temp_state();
        let (_, Json(created)) = create::<Project>(State(state.clone()), Json(project("Old")))
            .await
            .unwrap();

        let Json(updated) = update::<Project>(
            Path(created.id),
            State(state),
            Json(json!({ "title": "New", "id": 999, "created_at": "2000-01-01T00:00:00Z" })),
        )
        .await
        .expect("partial update succeeds");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "New");
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at.is_some());
    }

    #[tokio::test]
    async fn mistyped_patch_is_unprocessable() {
        let (_dir, state) = temp_state();
        let (_, Json(created)) = create::<Project>(State(state.clone()), Json(project("P")))
            .await
            .unwrap();

        let err = update::<Project>(Path(created.id), State(state), Json(json!({ "order": "first" })))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn duplicate_slug_is_conflict() {
        let (_dir, state) = temp_state();
        let post = |title: &str| -> BlogPostCreate {
            serde_json::from_value(json!({ "title": title, "slug": "hello", "content": "" }))
                .unwrap()
        };

        let _ = create::<BlogPost>(State(state.clone()), Json(post("First")))
            .await
            .unwrap();
        let err = create::<BlogPost>(State(state), Json(post("Second")))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn reorder_then_list_follows_new_order() {
        let (_dir, state) = temp_state();
        for title in ["a", "b", "c"] {
            let _ = create::<Project>(State(state.clone()), Json(project(title)))
                .await
                .unwrap();
        }

        let Json(reordered) = reorder::<Project>(State(state.clone()), Json(vec![3, 1, 2, 77]))
            .await
            .expect("reorder succeeds");
        assert_eq!(reordered.iter().map(|p| p.id).collect::<Vec<_>>(), vec![3, 1, 2]);

        let Json(listed) = list_ordered::<Project>(State(state), Query(PageQuery::default()))
            .await
            .unwrap();
        let titles: Vec<&str> = listed.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn remove_returns_deleted_record() {
        let (_dir, state) = temp_state();
        let (_, Json(created)) = create::<Project>(State(state.clone()), Json(project("Gone")))
            .await
            .unwrap();

        let Json(removed) = remove::<Project>(Path(created.id), State(state.clone()))
            .await
            .expect("removal succeeds");
        assert_eq!(removed, created);

        let Json(listed) = list_ordered::<Project>(State(state), Query(PageQuery::default()))
            .await
            .unwrap();
        assert!(listed.is_empty());
    }
}

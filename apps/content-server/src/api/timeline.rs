// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Career timeline entries.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::{
    api::collections,
    error::ApiError,
    models::{PageQuery, TimelineCreate, TimelineItem},
    state::AppState,
};

/// Timeline entries in display order.
#[utoipa::path(
    get,
    path = "/api/v1/resources/timeline",
    params(PageQuery),
    tag = "Timeline",
    responses((status = 200, body = [TimelineItem]))
)]
pub async fn list_timeline(
    state: State<AppState>,
    page: Query<PageQuery>,
) -> Result<Json<Vec<TimelineItem>>, ApiError> {
    collections::list_ordered::<TimelineItem>(state, page).await
}

#[utoipa::path(
    post,
    path = "/api/v1/resources/timeline",
    request_body = TimelineCreate,
    tag = "Timeline",
    responses((status = 201, body = TimelineItem))
)]
pub async fn create_timeline_item(
    state: State<AppState>,
    payload: Json<TimelineCreate>,
) -> Result<(StatusCode, Json<TimelineItem>), ApiError> {
    collections::create::<TimelineItem>(state, payload).await
}

#[utoipa::path(
    get,
    path = "/api/v1/resources/timeline/{id}",
    params(("id" = u64, Path, description = "Timeline item identifier")),
    tag = "Timeline",
    responses(
        (status = 200, body = TimelineItem),
        (status = 404, description = "No such timeline item")
    )
)]
pub async fn get_timeline_item(
    id: Path<u64>,
    state: State<AppState>,
) -> Result<Json<TimelineItem>, ApiError> {
    collections::get_one::<TimelineItem>(id, state).await
}

#[utoipa::path(
    put,
    path = "/api/v1/resources/timeline/{id}",
    params(("id" = u64, Path, description = "Timeline item identifier")),
    tag = "Timeline",
    responses(
        (status = 200, body = TimelineItem),
        (status = 404, description = "No such timeline item"),
        (status = 422, description = "Mistyped field value")
    )
)]
pub async fn update_timeline_item(
    id: Path<u64>,
    state: State<AppState>,
    patch: Json<Value>,
) -> Result<Json<TimelineItem>, ApiError> {
    collections::update::<TimelineItem>(id, state, patch).await
}

/// Delete an entry and return it.
#[utoipa::path(
    delete,
    path = "/api/v1/resources/timeline/{id}",
    params(("id" = u64, Path, description = "Timeline item identifier")),
    tag = "Timeline",
    responses(
        (status = 200, body = TimelineItem),
        (status = 404, description = "No such timeline item")
    )
)]
pub async fn delete_timeline_item(
    id: Path<u64>,
    state: State<AppState>,
) -> Result<Json<TimelineItem>, ApiError> {
    collections::remove::<TimelineItem>(id, state).await
}

#[utoipa::path(
    post,
    path = "/api/v1/resources/timeline/reorder",
    request_body = Vec<u64>,
    tag = "Timeline",
    responses((status = 200, body = [TimelineItem]))
)]
pub async fn reorder_timeline(
    state: State<AppState>,
    ordered_ids: Json<Vec<u64>>,
) -> Result<Json<Vec<TimelineItem>>, ApiError> {
    collections::reorder::<TimelineItem>(state, ordered_ids).await
}

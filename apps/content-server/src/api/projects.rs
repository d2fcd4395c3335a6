// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Portfolio projects.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::{
    api::collections,
    error::ApiError,
    models::{PageQuery, Project, ProjectCreate},
    state::AppState,
};

/// Projects in display order.
#[utoipa::path(
    get,
    path = "/api/v1/projects",
    params(PageQuery),
    tag = "Projects",
    responses((status = 200, body = [Project]))
)]
pub async fn list_projects(
    state: State<AppState>,
    page: Query<PageQuery>,
) -> Result<Json<Vec<Project>>, ApiError> {
    collections::list_ordered::<Project>(state, page).await
}

#[utoipa::path(
    post,
    path = "/api/v1/projects",
    request_body = ProjectCreate,
    tag = "Projects",
    responses((status = 201, body = Project))
)]
pub async fn create_project(
    state: State<AppState>,
    payload: Json<ProjectCreate>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    collections::create::<Project>(state, payload).await
}

#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}",
    params(("id" = u64, Path, description = "Project identifier")),
    tag = "Projects",
    responses(
        (status = 200, body = Project),
        (status = 404, description = "No such project")
    )
)]
pub async fn get_project(
    id: Path<u64>,
    state: State<AppState>,
) -> Result<Json<Project>, ApiError> {
    collections::get_one::<Project>(id, state).await
}

/// Partial update. Unknown and server-managed keys are ignored.
#[utoipa::path(
    put,
    path = "/api/v1/projects/{id}",
    params(("id" = u64, Path, description = "Project identifier")),
    tag = "Projects",
    responses(
        (status = 200, body = Project),
        (status = 404, description = "No such project"),
        (status = 422, description = "Mistyped field value")
    )
)]
pub async fn update_project(
    id: Path<u64>,
    state: State<AppState>,
    patch: Json<Value>,
) -> Result<Json<Project>, ApiError> {
    collections::update::<Project>(id, state, patch).await
}

#[utoipa::path(
    delete,
    path = "/api/v1/projects/{id}",
    params(("id" = u64, Path, description = "Project identifier")),
    tag = "Projects",
    responses(
        (status = 200, body = Project),
        (status = 404, description = "No such project")
    )
)]
pub async fn delete_project(
    id: Path<u64>,
    state: State<AppState>,
) -> Result<Json<Project>, ApiError> {
    collections::remove::<Project>(id, state).await
}

/// Reassign display order from an array of project ids. Unknown ids are skipped.
#[utoipa::path(
    post,
    path = "/api/v1/projects/reorder",
    request_body = Vec<u64>,
    tag = "Projects",
    responses((status = 200, body = [Project]))
)]
pub async fn reorder_projects(
    state: State<AppState>,
    ordered_ids: Json<Vec<u64>>,
) -> Result<Json<Vec<Project>>, ApiError> {
    collections::reorder::<Project>(state, ordered_ids).await
}

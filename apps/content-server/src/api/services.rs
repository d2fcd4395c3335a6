// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::{
    api::collections,
    error::ApiError,
    models::{PageQuery, Service, ServiceCreate},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/api/v1/resources/services",
    params(PageQuery),
    tag = "Services",
    responses((status = 200, body = [Service]))
)]
pub async fn list_services(
    state: State<AppState>,
    page: Query<PageQuery>,
) -> Result<Json<Vec<Service>>, ApiError> {
    collections::list_ordered::<Service>(state, page).await
}

#[utoipa::path(
    post,
    path = "/api/v1/resources/services",
    request_body = ServiceCreate,
    tag = "Services",
    responses((status = 201, body = Service))
)]
pub async fn create_service(
    state: State<AppState>,
    payload: Json<ServiceCreate>,
) -> Result<(StatusCode, Json<Service>), ApiError> {
    collections::create::<Service>(state, payload).await
}

#[utoipa::path(
    get,
    path = "/api/v1/resources/services/{id}",
    params(("id" = u64, Path, description = "Service identifier")),
    tag = "Services",
    responses(
        (status = 200, body = Service),
        (status = 404, description = "No such service")
    )
)]
pub async fn get_service(
    id: Path<u64>,
    state: State<AppState>,
) -> Result<Json<Service>, ApiError> {
    collections::get_one::<Service>(id, state).await
}

#[utoipa::path(
    put,
    path = "/api/v1/resources/services/{id}",
    params(("id" = u64, Path, description = "Service identifier")),
    tag = "Services",
    responses(
        (status = 200, body = Service),
        (status = 404, description = "No such service"),
        (status = 422, description = "Mistyped field value")
    )
)]
pub async fn update_service(
    id: Path<u64>,
    state: State<AppState>,
    patch: Json<Value>,
) -> Result<Json<Service>, ApiError> {
    collections::update::<Service>(id, state, patch).await
}

#[utoipa::path(
    delete,
    path = "/api/v1/resources/services/{id}",
    params(("id" = u64, Path, description = "Service identifier")),
    tag = "Services",
    responses(
        (status = 200, body = Service),
        (status = 404, description = "No such service")
    )
)]
pub async fn delete_service(
    id: Path<u64>,
    state: State<AppState>,
) -> Result<Json<Service>, ApiError> {
    collections::remove::<Service>(id, state).await
}

/// Reassign display order from an array of service ids.
#[utoipa::path(
    post,
    path = "/api/v1/resources/services/reorder",
    request_body = Vec<u64>,
    tag = "Services",
    responses((status = 200, body = [Service]))
)]
pub async fn reorder_services(
    state: State<AppState>,
    ordered_ids: Json<Vec<u64>>,
) -> Result<Json<Vec<Service>>, ApiError> {
    collections::reorder::<Service>(state, ordered_ids).await
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};
use serde_json::Value;

use crate::{
    error::ApiError,
    models::{About, SiteSettings},
    state::AppState,
    storage::{SingletonEntity, SingletonStore},
};

async fn get_or_create<E: SingletonEntity>(state: &AppState) -> Result<Json<E>, ApiError> {
    Ok(Json(SingletonStore::<E>::new(&state.db).get_or_create()?))
}

async fn upsert<E: SingletonEntity>(state: &AppState, patch: &Value) -> Result<Json<E>, ApiError> {
    Ok(Json(SingletonStore::<E>::new(&state.db).upsert(patch)?))
}

/// Profile shown on the about page; created with placeholders on first read.
#[utoipa::path(
    get,
    path = "/api/v1/resources/about",
    tag = "Profile",
    responses((status = 200, body = About))
)]
pub async fn get_about(State(state): State<AppState>) -> Result<Json<About>, ApiError> {
    get_or_create(&state).await
}

/// Partially update the profile, creating it if needed.
#[utoipa::path(
    post,
    path = "/api/v1/resources/about",
    tag = "Profile",
    responses(
        (status = 200, body = About),
        (status = 422, description = "A field has the wrong type")
    )
)]
pub async fn update_about(
    State(state): State<AppState>,
    Json(patch): Json<Value>,
) -> Result<Json<About>, ApiError> {
    upsert(&state, &patch).await
}

#[utoipa::path(
    get,
    path = "/api/v1/resources/settings",
    tag = "Settings",
    responses((status = 200, body = SiteSettings))
)]
pub async fn get_settings(State(state): State<AppState>) -> Result<Json<SiteSettings>, ApiError> {
    get_or_create(&state).await
}

#[utoipa::path(
    post,
    path = "/api/v1/resources/settings",
    tag = "Settings",
    responses(
        (status = 200, body = SiteSettings),
        (status = 422, description = "A field has the wrong type")
    )
)]
pub async fn update_settings(
    State(state): State<AppState>,
    Json(patch): Json<Value>,
) -> Result<Json<SiteSettings>, ApiError> {
    upsert(&state, &patch).await
}

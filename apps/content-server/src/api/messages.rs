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
    models::{newest_first, Message, MessageCreate, PageQuery},
    state::AppState,
    storage::Repository,
};

#[utoipa::path(
    get,
    path = "/api/v1/resources/messages",
    params(PageQuery),
    tag = "Messages",
    responses((status = 200, body = [Message]))
)]
pub async fn list_messages(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let mut messages = Repository::<Message>::new(&state.db).list_all()?;
    newest_first(&mut messages);
    Ok(Json(
        messages
            .into_iter()
            .skip(page.offset)
            .take(page.limit)
            .collect(),
    ))
}

/// Public contact form submission.
#[utoipa::path(
    post,
    path = "/api/v1/resources/messages",
    request_body = MessageCreate,
    tag = "Messages",
    responses((status = 201, body = Message))
)]
pub async fn create_message(
    state: State<AppState>,
    payload: Json<MessageCreate>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    collections::create::<Message>(state, payload).await
}

/// Flip the read flag. Other keys in the body are ignored.
#[utoipa::path(
    put,
    path = "/api/v1/resources/messages/{id}",
    params(("id" = u64, Path, description = "Message identifier")),
    tag = "Messages",
    responses(
        (status = 200, body = Message),
        (status = 404, description = "No such message")
    )
)]
pub async fn update_message(
    id: Path<u64>,
    state: State<AppState>,
    patch: Json<Value>,
) -> Result<Json<Message>, ApiError> {
    collections::update::<Message>(id, state, patch).await
}

#[utoipa::path(
    delete,
    path = "/api/v1/resources/messages/{id}",
    params(("id" = u64, Path, description = "Message identifier")),
    tag = "Messages",
    responses(
        (status = 200, body = Message),
        (status = 404, description = "No such message")
    )
)]
pub async fn delete_message(
    id: Path<u64>,
    state: State<AppState>,
) -> Result<Json<Message>, ApiError> {
    collections::remove::<Message>(id, state).await
}

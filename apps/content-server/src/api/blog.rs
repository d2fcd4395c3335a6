// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blog posts. Slugs are unique across posts.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::{
    api::collections,
    error::ApiError,
    models::{BlogPost, BlogPostCreate, PageQuery},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/api/v1/resources/blog",
    params(PageQuery),
    tag = "Blog",
    responses((status = 200, body = [BlogPost]))
)]
pub async fn list_blog_posts(
    state: State<AppState>,
    page: Query<PageQuery>,
) -> Result<Json<Vec<BlogPost>>, ApiError> {
    collections::list_ordered::<BlogPost>(state, page).await
}

/// Create a post. A slug already in use is a conflict.
#[utoipa::path(
    post,
    path = "/api/v1/resources/blog",
    request_body = BlogPostCreate,
    tag = "Blog",
    responses(
        (status = 201, body = BlogPost),
        (status = 409, description = "Slug already in use")
    )
)]
pub async fn create_blog_post(
    state: State<AppState>,
    payload: Json<BlogPostCreate>,
) -> Result<(StatusCode, Json<BlogPost>), ApiError> {
    collections::create::<BlogPost>(state, payload).await
}

#[utoipa::path(
    get,
    path = "/api/v1/resources/blog/{id}",
    params(("id" = u64, Path, description = "Blog post identifier")),
    tag = "Blog",
    responses(
        (status = 200, body = BlogPost),
        (status = 404, description = "No such blog post")
    )
)]
pub async fn get_blog_post(
    id: Path<u64>,
    state: State<AppState>,
) -> Result<Json<BlogPost>, ApiError> {
    collections::get_one::<BlogPost>(id, state).await
}

/// Partial update. Changing the slug to one in use is a conflict.
#[utoipa::path(
    put,
    path = "/api/v1/resources/blog/{id}",
    params(("id" = u64, Path, description = "Blog post identifier")),
    tag = "Blog",
    responses(
        (status = 200, body = BlogPost),
        (status = 404, description = "No such blog post"),
        (status = 422, description = "Mistyped field value"),
        (status = 409, description = "Slug already in use")
    )
)]
pub async fn update_blog_post(
    id: Path<u64>,
    state: State<AppState>,
    patch: Json<Value>,
) -> Result<Json<BlogPost>, ApiError> {
    collections::update::<BlogPost>(id, state, patch).await
}

#[utoipa::path(
    delete,
    path = "/api/v1/resources/blog/{id}",
    params(("id" = u64, Path, description = "Blog post identifier")),
    tag = "Blog",
    responses(
        (status = 200, body = BlogPost),
        (status = 404, description = "No such blog post")
    )
)]
pub async fn delete_blog_post(
    id: Path<u64>,
    state: State<AppState>,
) -> Result<Json<BlogPost>, ApiError> {
    collections::remove::<BlogPost>(id, state).await
}

#[utoipa::path(
    post,
    path = "/api/v1/resources/blog/reorder",
    request_body = Vec<u64>,
    tag = "Blog",
    responses((status = 200, body = [BlogPost]))
)]
pub async fn reorder_blog_posts(
    state: State<AppState>,
    ordered_ids: Json<Vec<u64>>,
) -> Result<Json<Vec<BlogPost>>, ApiError> {
    collections::reorder::<BlogPost>(state, ordered_ids).await
}

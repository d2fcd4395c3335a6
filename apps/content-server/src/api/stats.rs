// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};

use crate::{
    error::ApiError,
    models::{BlogPost, ContentStats, Message, Project, Service, TimelineItem},
    state::AppState,
    storage::Repository,
};

/// Record counts for the admin dashboard.
#[utoipa::path(
    get,
    path = "/api/v1/resources/stats",
    tag = "Dashboard",
    responses((status = 200, body = ContentStats))
)]
pub async fn content_stats(State(state): State<AppState>) -> Result<Json<ContentStats>, ApiError> {
    let messages = Repository::<Message>::new(&state.db).list_all()?;
    let unread_messages = messages.iter().filter(|m| !m.is_read).count() as u64;

    Ok(Json(ContentStats {
        projects: Repository::<Project>::new(&state.db).count()?,
        services: Repository::<Service>::new(&state.db).count()?,
        timeline_items: Repository::<TimelineItem>::new(&state.db).count()?,
        blog_posts: Repository::<BlogPost>::new(&state.db).count()?,
        messages: messages.len() as u64,
        unread_messages,
    }))
}

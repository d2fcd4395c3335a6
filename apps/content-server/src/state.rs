// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::storage::{AssetGateway, ContentDatabase};

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<ContentDatabase>,
    pub assets: AssetGateway,
}

impl AppState {
    pub fn new(db: ContentDatabase, assets: AssetGateway) -> Self {
        Self {
            db: Arc::new(db),
            assets,
        }
    }
}

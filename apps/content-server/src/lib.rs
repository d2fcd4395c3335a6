// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Portfolio Content Server - admin-managed content backend
//!
//! Typed content collections (projects, services, timeline, blog, messages)
//! and singleton records (profile, site settings) persisted in an embedded
//! redb database, with explicit reordering and pluggable asset storage.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `config` - Environment-driven configuration
//! - `logging` - Tracing subscriber setup
//! - `models` - Stored records and request/response types
//! - `storage` - Database, repositories, partial updates and asset gateway

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod state;
pub mod storage;

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use content_server::{
    api::router,
    config::AppConfig,
    logging::init_tracing,
    state::AppState,
    storage::{AssetGateway, ContentDatabase},
};

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env().expect("Invalid configuration");
    init_tracing(config.log_format).expect("Failed to install tracing subscriber");

    let db = ContentDatabase::open(&config.database_path()).expect("Failed to open content database");
    let assets = AssetGateway::from_config(&config.storage).expect("Failed to configure asset storage");

    let app = router(AppState::new(db, assets), &config);

    let addr = config.bind_addr().expect("Failed to parse bind address");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");

    tracing::info!(%addr, "Portfolio content server listening (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");

    tracing::info!("Server stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::{AppConfig, StorageConfig, LOCAL_UPLOADS_ROUTE},
    models::{
        About, BlogPost, BlogPostCreate, ContentStats, DeleteAssetResponse, FileUploadResponse,
        ImageUploadResponse, Message, MessageCreate, Project, ProjectCreate, Service,
        ServiceCreate, SiteSettings, TimelineCreate, TimelineItem,
    },
    state::AppState,
};

pub mod blog;
pub mod collections;
pub mod health;
pub mod messages;
pub mod projects;
pub mod services;
pub mod singletons;
pub mod stats;
pub mod timeline;
pub mod uploads;

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if allowed_origins.iter().any(|origin| origin == "*") {
        return base.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(origins))
}

pub fn router(state: AppState, config: &AppConfig) -> Router {
    let v1_routes = Router::new()
        .route(
            "/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route("/projects/reorder", post(projects::reorder_projects))
        .route(
            "/projects/upload-image",
            post(uploads::upload_project_image).layer(DefaultBodyLimit::disable()),
        )
        .route(
            "/projects/{id}",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        .route(
            "/resources/services",
            get(services::list_services).post(services::create_service),
        )
        .route("/resources/services/reorder", post(services::reorder_services))
        .route(
            "/resources/services/{id}",
            get(services::get_service)
                .put(services::update_service)
                .delete(services::delete_service),
        )
        .route(
            "/resources/timeline",
            get(timeline::list_timeline).post(timeline::create_timeline_item),
        )
        .route("/resources/timeline/reorder", post(timeline::reorder_timeline))
        .route(
            "/resources/timeline/{id}",
            get(timeline::get_timeline_item)
                .put(timeline::update_timeline_item)
                .delete(timeline::delete_timeline_item),
        )
        .route(
            "/resources/blog",
            get(blog::list_blog_posts).post(blog::create_blog_post),
        )
        .route("/resources/blog/reorder", post(blog::reorder_blog_posts))
        .route(
            "/resources/blog/{id}",
            get(blog::get_blog_post)
                .put(blog::update_blog_post)
                .delete(blog::delete_blog_post),
        )
        .route(
            "/resources/messages",
            get(messages::list_messages).post(messages::create_message),
        )
        .route(
            "/resources/messages/{id}",
            delete(messages::delete_message).put(messages::update_message),
        )
        .route(
            "/resources/about",
            get(singletons::get_about).post(singletons::update_about),
        )
        .route(
            "/resources/settings",
            get(singletons::get_settings).post(singletons::update_settings),
        )
        .route(
            "/resources/upload",
            post(uploads::upload_file).layer(DefaultBodyLimit::disable()),
        )
        .route("/resources/assets/{*path}", delete(uploads::delete_asset))
        .route("/resources/stats", get(stats::content_stats));

    let mut app = Router::new()
        .nest("/api/v1", v1_routes)
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .with_state(state);

    if let StorageConfig::Local { upload_dir } = &config.storage {
        app = app.nest_service(LOCAL_UPLOADS_ROUTE, ServeDir::new(upload_dir));
    }

    app.merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(cors_layer(&config.allowed_origins))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        projects::list_projects,
        projects::create_project,
        projects::get_project,
        projects::update_project,
        projects::delete_project,
        projects::reorder_projects,
        services::list_services,
        services::create_service,
        services::get_service,
        services::update_service,
        services::delete_service,
        services::reorder_services,
        timeline::list_timeline,
        timeline::create_timeline_item,
        timeline::get_timeline_item,
        timeline::update_timeline_item,
        timeline::delete_timeline_item,
        timeline::reorder_timeline,
        blog::list_blog_posts,
        blog::create_blog_post,
        blog::get_blog_post,
        blog::update_blog_post,
        blog::delete_blog_post,
        blog::reorder_blog_posts,
        messages::list_messages,
        messages::create_message,
        messages::update_message,
        messages::delete_message,
        singletons::get_about,
        singletons::update_about,
        singletons::get_settings,
        singletons::update_settings,
        uploads::upload_project_image,
        uploads::upload_file,
        uploads::delete_asset,
        stats::content_stats,
        health::health,
        health::liveness
    ),
    components(
        schemas(
            Project,
            ProjectCreate,
            Service,
            ServiceCreate,
            TimelineItem,
            TimelineCreate,
            BlogPost,
            BlogPostCreate,
            Message,
            MessageCreate,
            About,
            SiteSettings,
            ContentStats,
            ImageUploadResponse,
            FileUploadResponse,
            DeleteAssetResponse,
            uploads::UploadForm,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Projects", description = "Portfolio projects"),
        (name = "Services", description = "Offered services"),
        (name = "Timeline", description = "Career timeline"),
        (name = "Blog", description = "Blog posts"),
        (name = "Messages", description = "Contact form messages"),
        (name = "Profile", description = "About page profile"),
        (name = "Settings", description = "Site-wide settings"),
        (name = "Assets", description = "Image and file uploads"),
        (name = "Dashboard", description = "Admin dashboard figures"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;

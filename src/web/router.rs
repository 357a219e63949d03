//! Router configuration for Web API.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use super::dto::{
    BreadcrumbResponse, ConnectionStatusResponse, CreateFolderRequest, CreateShareRequest,
    DeletedResponse, EntryResponse, ShareResponse,
};
use super::handlers::{self, AppState};
use super::middleware::create_cors_layer;

/// Room for multipart framing on top of the largest accepted file.
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// OpenAPI document for the API.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_shares,
        handlers::create_share,
        handlers::get_share,
        handlers::connect_share,
        handlers::disconnect_share,
        handlers::delete_share,
        handlers::browse,
        handlers::search,
        handlers::breadcrumb,
        handlers::create_folder,
        handlers::delete_entry,
        handlers::upload,
        handlers::download,
    ),
    components(schemas(
        ShareResponse,
        EntryResponse,
        BreadcrumbResponse,
        ConnectionStatusResponse,
        DeletedResponse,
        CreateShareRequest,
        CreateFolderRequest,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "shares", description = "Share management and connections"),
        (name = "browse", description = "Virtual tree navigation and changes"),
        (name = "transfer", description = "File upload and download")
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let body_limit = app_state.max_upload_size.saturating_add(MULTIPART_OVERHEAD);

    let share_routes = Router::new()
        .route(
            "/",
            get(handlers::list_shares).post(handlers::create_share),
        )
        .route(
            "/:id",
            get(handlers::get_share).delete(handlers::delete_share),
        )
        .route("/:id/connect", post(handlers::connect_share))
        .route("/:id/disconnect", post(handlers::disconnect_share))
        .route("/:id/browse", get(handlers::browse))
        .route("/:id/search", get(handlers::search))
        .route("/:id/breadcrumb", get(handlers::breadcrumb))
        .route("/:id/folder", post(handlers::create_folder))
        .route("/:id/entries", axum::routing::delete(handlers::delete_entry))
        .route("/:id/upload", post(handlers::upload))
        .route("/:id/download", get(handlers::download));

    let api_routes = Router::new().nest("/shares", share_routes);

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

/// Create the Swagger UI router serving the OpenAPI document.
pub fn create_swagger_router() -> Router {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}

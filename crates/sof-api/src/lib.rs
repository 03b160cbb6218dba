//! SOF API - REST server
//!
//! HTTP surface for the SOF Timeline pipeline: a multipart document
//! processing endpoint plus health, readiness, metrics, and Swagger UI.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use sof_core::config::ServerConfig;
use state::AppState;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "SOF Timeline API",
        description = "Statement of Facts processing: document to event timeline and laytime/demurrage result"
    ),
    paths(
        handlers::health::health_check,
        handlers::health::readiness_check,
        handlers::process::process_documents,
    ),
    components(schemas(
        handlers::health::HealthResponse,
        handlers::health::ReadinessResponse,
        handlers::health::ReadinessChecks,
        handlers::health::MetricsResponse,
        handlers::process::ProcessResponse,
        sof_core::TimelineResult,
        sof_core::Event,
        error::ApiError,
    ))
)]
pub struct ApiDoc;

/// Build the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.server);
    let body_limit = state.config.server.max_body_size;
    let timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    Router::new()
        .merge(routes::ops_routes())
        .nest("/api/v1", routes::api_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Router with default configuration for integration tests
pub fn create_router_for_testing() -> Router {
    let config = sof_core::AppConfig::default();
    let state = AppState::new(config).expect("recognition model must load for tests");
    create_router(Arc::new(state))
}

/// CORS policy from configured origins; empty list allows none
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE])
}

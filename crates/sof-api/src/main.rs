//! SOF Timeline API server
//!
//! Loads configuration, builds the recognition model once, and serves
//! the processing endpoint. A model load failure is fatal: the process
//! must not accept requests without it.

use sof_api::{create_router, state::AppState};
use sof_core::AppConfig;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sof_api=debug,tower_http=debug".into()),
        )
        .init();

    // Load configuration: optional TOML file, env vars otherwise
    let config = match std::env::var("SOF_CONFIG") {
        Ok(path) => AppConfig::from_file(path)?,
        Err(_) => AppConfig::from_env()?,
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);

    // Create application state; builds the recognition model
    let state = Arc::new(AppState::new(config)?);

    // Create router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("SOF Timeline API starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

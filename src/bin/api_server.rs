// src/bin/api_server.rs

use anyhow::Context;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracklog::infra::config;
use tracklog::transport;
use tracklog::TrackTypeRegistry;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    config::init_tracing();

    // --- Track Type Registry Initialization ---
    // Built once; every request shares it read-only.
    let track_types_path = config::track_types_path();
    let registry = TrackTypeRegistry::load(track_types_path.as_deref())
        .context("failed to load track type registry")?;
    let app_state = transport::http::AppState::new(Arc::new(registry));

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);

    let bind_addr = config::api_bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("API server listening on http://{}", bind_addr);
    tracing::info!("Swagger UI available at /swagger-ui");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => tracing::info!("shutdown signal received"),
                Err(err) => {
                    tracing::error!(error = %err, "failed to listen for shutdown signal");
                    std::future::pending::<()>().await;
                }
            }
        })
        .await?;

    tracing::info!("graceful shutdown complete");
    Ok(())
}

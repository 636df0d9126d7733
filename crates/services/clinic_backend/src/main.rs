// File: services/clinic_backend/src/main.rs
use clinic_backend::{build_router, AppState};
use clinic_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    clinic_common::logging::init();

    let config = Arc::new(load_config().map_err(|e| {
        error!("🚨 Failed to load config: {}", e);
        e
    })?);

    let state = AppState::new(config.clone()).await?;
    let app = build_router(&state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

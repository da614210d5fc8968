//! HTTP surface for the Figma-to-React bridge.
//!
//! Exposes the workflow operations as JSON endpoints over a shared
//! [`AppState`]; configuration comes from the environment once at boot.

pub mod core;
pub mod error_handler;
mod middleware_layer;
mod routes;

use std::sync::Arc;

use axum::{Router, middleware, routing::post};
use tokio::signal;
use tracing::info;

use crate::core::app_state::{AppState, ServerConfig};
use crate::error_handler::AppError;
use crate::middleware_layer::json_extractor::json_error_mapper;
use crate::routes::{
    design_data::design_data_route::design_data_route,
    export_images::export_images_route::export_images_route,
    generate_component::generate_component_route::generate_component_route,
    workflow::run_workflow_route::run_workflow_route,
};

/// Starts the HTTP server and blocks until shutdown.
pub async fn start() -> Result<(), AppError> {
    let config = ServerConfig::from_env()?;
    let port = config.port;
    let skip_images = config.skip_image_downloads;
    let state = Arc::new(AppState::new(config)?);

    let mut router = Router::new()
        .route("/workflow", post(run_workflow_route))
        .route("/design_data", post(design_data_route))
        .route("/generate_component", post(generate_component_route));

    if skip_images {
        info!("SKIP_IMAGE_DOWNLOADS set; /export_images not registered");
    } else {
        router = router.route("/export_images", post(export_images_route));
    }

    let app = router
        .layer(middleware::from_fn(json_error_mapper))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .map_err(AppError::Bind)?;
    info!(port, "figma-bridge listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
}

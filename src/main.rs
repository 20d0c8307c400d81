//! Insurance Charge Prediction Service - Main Entry Point
//!
//! Loads the trained model and training-derived preprocessing artifacts,
//! then serves predictions over HTTP.

use anyhow::Result;
use insurance_prediction_service::{
    config::AppConfig, metrics::MetricsReporter, server, state::AppState,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("insurance_prediction_service=info".parse()?),
        )
        .init();

    info!("Starting Insurance Charge Prediction Service");

    // Load configuration
    let config = AppConfig::load()?;
    info!(
        model_path = %config.artifacts.model_path,
        dataset_path = %config.artifacts.dataset_path,
        "Configuration loaded successfully"
    );

    // Run the startup sequence; the server binds only after every
    // artifact is loaded
    let state = AppState::initialize(&config)?;
    info!(
        features = state.model.expected_features(),
        "Artifacts ready, accepting traffic"
    );

    // Start metrics reporter (prints summary every 30 seconds)
    let metrics = state.metrics.clone();
    tokio::spawn(async move {
        let reporter = MetricsReporter::new(metrics, 30);
        reporter.start().await;
    });

    let app = server::build_router(state.clone());
    let bind_addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, "Listening for prediction requests");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Print final summary
    info!("Service shutting down...");
    state.metrics.print_summary();

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

//! nestling-analysis - Signal Analysis Microservice
//!
//! **Module Identity:**
//! - Name: nestling-analysis (Signal Analysis)
//! - Port: 5741 (default)
//!
//! **[SA-OV-010]** Turns raw media samples from the Nestling companion app
//! (infant cry clips, diaper photos) into structured, trust-scored verdicts
//! via a generative multimodal inference provider, and records accepted
//! verdicts for the app's history screens.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use nestling_analysis::services::InferenceClient;
use nestling_analysis::{AnalysisSettings, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting nestling-analysis (Signal Analysis) microservice");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Step 1: Load configuration **[SA-CFG-010]**
    let config_path = nestling_common::config::config_file_path();
    let config = nestling_common::config::load_config(&config_path)?;

    // Step 2: Resolve provider API key (ENV -> TOML)
    let api_key = nestling_analysis::config::resolve_provider_api_key(&config)?;

    // Step 3: Open or create database **[SA-DB-010]**
    info!("Database: {}", config.service.database_path.display());
    let db_pool = nestling_analysis::db::init_database_pool(&config.service.database_path).await?;
    info!("Database connection established");

    // Step 4: Build provider client and pipeline settings
    let provider = InferenceClient::new(
        config.provider.base_url.clone(),
        api_key,
        config.provider.request_timeout_ms,
        config.provider.min_request_interval_ms,
    )
    .map_err(|e| anyhow::anyhow!("Failed to create inference client: {}", e))?;

    let settings = AnalysisSettings::from_config(&config.analysis)?;
    info!(
        "Model chains configured (screening: {:?}, extraction: {:?})",
        settings.screening_chain.variants(),
        settings.extraction_chain.variants()
    );

    // Create application state
    let state = AppState::new(db_pool, Arc::new(provider), settings);

    // Build router
    let app = nestling_analysis::build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.service.bind_address).await?;
    info!("Listening on http://{}", config.service.bind_address);
    info!("Health check: http://{}/health", config.service.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}

//! nestling-analysis library interface
//!
//! Exposes public APIs for integration testing

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod types;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;

use nestling_common::config::AnalysisConfig;
use nestling_common::Result;

use crate::services::ModelChain;
use crate::types::InferenceProvider;

/// Pipeline settings resolved once at startup
///
/// **[SA-CFG-010]** Read-only configuration shared across all requests;
/// the fallback chains are injected here, never read at call time.
#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    /// Minimum audio clip length accepted for cry analysis, in seconds
    pub min_clip_seconds: f32,
    /// Ordered variants for the screening prompt
    pub screening_chain: ModelChain,
    /// Ordered variants for the extraction prompt
    pub extraction_chain: ModelChain,
}

impl AnalysisSettings {
    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        Ok(Self {
            min_clip_seconds: config.min_clip_seconds,
            screening_chain: ModelChain::new(config.screening_models.clone())?,
            extraction_chain: ModelChain::new(config.extraction_models.clone())?,
        })
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool **[SA-DB-010]**
    pub db: SqlitePool,
    /// Inference provider boundary **[SA-INF-010]**
    pub provider: Arc<dyn InferenceProvider>,
    /// Resolved pipeline settings **[SA-CFG-010]**
    pub settings: Arc<AnalysisSettings>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        db: SqlitePool,
        provider: Arc<dyn InferenceProvider>,
        settings: AnalysisSettings,
    ) -> Self {
        Self {
            db,
            provider,
            settings: Arc::new(settings),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
///
/// **[SA-API-010]** API endpoint routing
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::analyze_routes())
        .merge(api::health_routes())
        .with_state(state)
}

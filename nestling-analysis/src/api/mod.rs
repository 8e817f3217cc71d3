//! HTTP API handlers for nestling-analysis
//!
//! **[SA-API-010]** Analyze endpoints consumed by the companion app backend

pub mod analyze;
pub mod health;

pub use analyze::analyze_routes;
pub use health::health_routes;

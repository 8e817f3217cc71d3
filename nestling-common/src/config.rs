//! Configuration loading for Nestling services
//!
//! TOML config file with serde defaults, resolved with ENV override:
//! 1. `NESTLING_ANALYSIS_CONFIG` environment variable (explicit path)
//! 2. `~/.config/nestling/analysis.toml` (platform config dir)
//! 3. Compiled defaults (no file present)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file path
pub const CONFIG_PATH_ENV: &str = "NESTLING_ANALYSIS_CONFIG";

/// Top-level TOML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            provider: ProviderConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

/// Service-level settings (bind address, database location)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Address the HTTP listener binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// SQLite database file path
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            database_path: default_database_path(),
        }
    }
}

/// Inference provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the generative inference API
    #[serde(default = "default_provider_base_url")]
    pub base_url: String,
    /// API key; may instead come from `NESTLING_PROVIDER_API_KEY`
    pub api_key: Option<String>,
    /// Per-request timeout in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Minimum interval between outbound requests in milliseconds
    #[serde(default = "default_min_request_interval_ms")]
    pub min_request_interval_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_provider_base_url(),
            api_key: None,
            request_timeout_ms: default_request_timeout_ms(),
            min_request_interval_ms: default_min_request_interval_ms(),
        }
    }
}

/// Analysis pipeline settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Minimum audio clip length accepted for cry analysis, in seconds
    #[serde(default = "default_min_clip_seconds")]
    pub min_clip_seconds: f32,
    /// Ordered model variants tried for the screening prompt
    #[serde(default = "default_screening_models")]
    pub screening_models: Vec<String>,
    /// Ordered model variants tried for the extraction prompt
    #[serde(default = "default_extraction_models")]
    pub extraction_models: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_clip_seconds: default_min_clip_seconds(),
            screening_models: default_screening_models(),
            extraction_models: default_extraction_models(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1:5741".to_string()
}

fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("nestling").join("analysis.db"))
        .unwrap_or_else(|| PathBuf::from("./nestling_data/analysis.db"))
}

fn default_provider_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

fn default_min_request_interval_ms() -> u64 {
    250
}

fn default_min_clip_seconds() -> f32 {
    3.0
}

fn default_screening_models() -> Vec<String> {
    vec![
        "gemini-2.0-flash".to_string(),
        "gemini-1.5-flash".to_string(),
        "gemini-1.5-pro".to_string(),
    ]
}

fn default_extraction_models() -> Vec<String> {
    default_screening_models()
}

/// Resolve the config file path
///
/// Priority: `NESTLING_ANALYSIS_CONFIG` env var, then the platform config
/// directory (`~/.config/nestling/analysis.toml` on Linux).
pub fn config_file_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .map(|d| d.join("nestling").join("analysis.toml"))
        .unwrap_or_else(|| PathBuf::from("./analysis.toml"))
}

/// Load configuration from a TOML file
///
/// A missing file is not an error: compiled defaults apply. A present but
/// unparseable file is an error (silent fallback would mask typos).
pub fn load_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        tracing::info!("No config file at {}, using defaults", path.display());
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read config failed ({}): {}", path.display(), e)))?;
    let config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse config failed ({}): {}", path.display(), e)))?;

    tracing::info!("Configuration loaded from {}", path.display());
    Ok(config)
}

//! Configuration resolution for nestling-analysis
//!
//! **[SA-CFG-010]** Provider API key resolution with ENV → TOML priority.
//! Model variant lists are resolved once at startup and injected into the
//! fallback chains; nothing reads configuration at call time.

use nestling_common::config::TomlConfig;
use nestling_common::{Error, Result};
use tracing::{info, warn};

/// Environment variable carrying the provider API key
pub const API_KEY_ENV: &str = "NESTLING_PROVIDER_API_KEY";

/// Resolve the inference provider API key
///
/// **Priority:** ENV → TOML
pub fn resolve_provider_api_key(toml_config: &TomlConfig) -> Result<String> {
    let env_key = std::env::var(API_KEY_ENV).ok();
    let toml_key = toml_config.provider.api_key.as_ref();

    let mut sources = Vec::new();
    if env_key.as_deref().map(is_valid_key) == Some(true) {
        sources.push("environment");
    }
    if toml_key.map(|k| is_valid_key(k)) == Some(true) {
        sources.push("TOML");
    }

    // Warn if multiple sources (potential misconfiguration)
    if sources.len() > 1 {
        warn!(
            "Provider API key found in multiple sources: {}. Using environment (highest priority).",
            sources.join(", ")
        );
    }

    if let Some(key) = env_key {
        if is_valid_key(&key) {
            info!("Provider API key loaded from environment variable");
            return Ok(key);
        }
    }

    if let Some(key) = toml_key {
        if is_valid_key(key) {
            info!("Provider API key loaded from TOML config");
            return Ok(key.clone());
        }
    }

    Err(Error::Config(format!(
        "Provider API key not configured. Please configure using one of:\n\
         1. Environment: {}=your-key-here\n\
         2. TOML config: ~/.config/nestling/analysis.toml ([provider] api_key = \"your-key\")",
        API_KEY_ENV
    )))
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

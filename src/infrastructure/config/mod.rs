//! Application configuration.
//!
//! Layered with figment: built-in defaults, then an optional `tracecase.toml`,
//! then `TRACECASE_*` environment variables (nested keys split on `__`). The
//! agent credential additionally falls back to `GOOGLE_API_KEY` /
//! `GEMINI_API_KEY` so existing cloud setups keep working.

use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "tracecase.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origin; permissive when unset.
    pub cors_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            cors_origin: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub llm: LLMConfig,
}

impl AppConfig {
    /// Load configuration from defaults, config file, and environment.
    pub fn load() -> Result<Self> {
        let mut config: AppConfig = Figment::new()
            .merge(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed("TRACECASE_").split("__"))
            .extract()
            .map_err(|e| AppError::ConfigError(e.to_string()))?;

        if config.llm.api_key.is_none() {
            config.llm.api_key = std::env::var("GOOGLE_API_KEY")
                .or_else(|_| std::env::var("GEMINI_API_KEY"))
                .ok()
                .filter(|key| !key.trim().is_empty());
        }

        Ok(config)
    }
}

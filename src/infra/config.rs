// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::infra::errors::SalonError;
use crate::infra::paths;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the booking backend.
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".into(),
            timeout_seconds: 30,
        }
    }
}

impl Config {
    /// Load from the default config path, falling back to defaults if no
    /// config.toml exists. The SALON_API_URL environment variable overrides
    /// the configured base URL either way.
    pub fn load() -> Result<Self, SalonError> {
        let path = paths::config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            let mut config = Self::default();
            config.apply_env_overrides();
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, SalonError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)
            .map_err(|e| SalonError::Config(format!("{}: {}", path.display(), e)))?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("SALON_API_URL") {
            if !url.trim().is_empty() {
                self.api.base_url = url.trim().to_string();
            }
        }
    }
}

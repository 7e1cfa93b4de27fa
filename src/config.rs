//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment variable overriding the configured auth service URL
pub const API_URL_ENV: &str = "PASSPORT_API_URL";

/// Fallback auth service base URL
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:3000/api";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Auth service base URL
    pub api_base_url: Option<String>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "passport", "passport-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: TuiConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to file
    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    /// Resolve the auth service base URL.
    ///
    /// Precedence: environment variable, config file, built-in default.
    pub fn resolved_api_base_url(&self) -> String {
        resolve_api_base_url(
            std::env::var(API_URL_ENV).ok(),
            self.api_base_url.as_deref(),
        )
    }
}

fn resolve_api_base_url(env_override: Option<String>, configured: Option<&str>) -> String {
    env_override
        .filter(|url| !url.is_empty())
        .or_else(|| configured.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

//! Configuration handling for the TUI

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use url::Url;

/// Production API
pub const DEFAULT_API_URL: &str = "https://help-life.azurewebsites.net";

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "HELP_LIFE_API_URL";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Base URL of the Help Life API
    pub api_url: Option<String>,
    /// Location of the credential store file
    pub storage_path: Option<PathBuf>,
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("br", "helplife", "help-life-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&content)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            _ => Self::default(),
        };

        config.override_api_url(std::env::var(API_URL_ENV).ok());
        Ok(config)
    }

    /// A non-empty override replaces the configured API URL
    fn override_api_url(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.api_url = Some(url);
        }
    }

    /// Resolved API base URL
    pub fn api_base_url(&self) -> Result<Url> {
        let raw = self.api_url.as_deref().unwrap_or(DEFAULT_API_URL);
        Url::parse(raw).with_context(|| format!("invalid API url {raw:?}"))
    }
}

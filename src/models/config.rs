// src/models/config.rs

//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// REST client settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Report assembly and export settings
    #[serde(default)]
    pub report: ReportConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(AppError::validation("api.base_url is empty"));
        }
        url::Url::parse(&self.api.base_url)
            .map_err(|e| AppError::validation(format!("api.base_url is invalid: {e}")))?;
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::validation("api.user_agent is empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::validation("api.timeout_secs must be > 0"));
        }
        if self.api.page_size == 0 {
            return Err(AppError::validation("api.page_size must be > 0"));
        }
        if self.report.max_concurrent == 0 {
            return Err(AppError::validation("report.max_concurrent must be > 0"));
        }
        Ok(())
    }
}

/// REST client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the grading platform API
    #[serde(default)]
    pub base_url: String,

    /// Bearer token for authenticated endpoints
    #[serde(default)]
    pub token: Option<String>,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Page size for paginated list endpoints
    #[serde(default = "defaults::page_size")]
    pub page_size: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token: None,
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            page_size: defaults::page_size(),
        }
    }
}

/// Report assembly and export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Width of the bounded per-student fetch batch
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// Directory where exported reports are written
    #[serde(default = "defaults::export_dir")]
    pub export_dir: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_concurrent: defaults::max_concurrent(),
            export_dir: defaults::export_dir(),
        }
    }
}

mod defaults {
    pub fn user_agent() -> String {
        format!("gradeview/{}", env!("CARGO_PKG_VERSION"))
    }

    pub fn timeout() -> u64 {
        30
    }

    pub fn page_size() -> u32 {
        1000
    }

    pub fn max_concurrent() -> usize {
        4
    }

    pub fn export_dir() -> String {
        "exports".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.api.page_size, 1000);
        assert_eq!(config.report.max_concurrent, 4);
    }

    #[test]
    fn test_validate_rejects_empty_base_url() {
        let config = Config::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        let mut config = Config::default();
        config.api.base_url = "https://api.example.edu".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [api]
            base_url = "https://api.example.edu"
            token = "secret"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://api.example.edu");
        assert_eq!(config.api.token.as_deref(), Some("secret"));
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.report.export_dir, "exports");
    }
}

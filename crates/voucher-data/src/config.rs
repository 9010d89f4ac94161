//! Backend location configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5001";

/// Environment variable naming the backend base URL.
pub const BASE_URL_ENV: &str = "VOUCHER_API_URL";

/// Environment variable naming a TOML or JSON config file.
pub const CONFIG_PATH_ENV: &str = "VOUCHER_CONFIG";

/// Errors loading client configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid base URL {0:?}: expected http:// or https://")]
    InvalidBaseUrl(String),
}

/// Where the backend lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Scheme, host and port of the backend, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl ApiConfig {
    /// Create a config for an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        Self {
            base_url: base_url.into(),
        }
        .validated()
    }

    /// Resolve the config from the environment.
    ///
    /// In order: the runtime `VOUCHER_API_URL`, the same variable baked in at
    /// compile time (browser builds have no process environment), the file
    /// named by `VOUCHER_CONFIG`, then the default. A source that is set but
    /// invalid is logged and skipped.
    pub fn from_env() -> Self {
        Self::resolve(
            std::env::var(BASE_URL_ENV).ok(),
            option_env!("VOUCHER_API_URL"),
            std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from),
        )
    }

    fn resolve(
        runtime_url: Option<String>,
        baked_url: Option<&str>,
        config_path: Option<PathBuf>,
    ) -> Self {
        let url = runtime_url
            .or_else(|| baked_url.map(String::from))
            .filter(|url| !url.trim().is_empty());
        if let Some(url) = url {
            match Self::new(url) {
                Ok(config) => return config,
                Err(e) => tracing::warn!(error = %e, "ignoring {}", BASE_URL_ENV),
            }
        }

        if let Some(path) = config_path {
            match Self::load(&path) {
                Ok(config) => return config,
                Err(e) => tracing::warn!(error = %e, "ignoring {}", CONFIG_PATH_ENV),
            }
        }

        Self::default()
    }

    /// Load config from a TOML or JSON file (chosen by extension).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;

        let parsed = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str::<Self>(&content).map_err(|e| e.to_string())
        } else {
            toml::from_str::<Self>(&content).map_err(|e| e.to_string())
        };

        parsed
            .map_err(|message| ConfigError::Parse {
                path: display,
                message,
            })?
            .validated()
    }

    /// Parse config from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str::<Self>(content)
            .map_err(|e| ConfigError::Parse {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?
            .validated()
    }

    fn validated(mut self) -> Result<Self, ConfigError> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.base_url));
        }
        self.base_url = trimmed.to_string();
        Ok(self)
    }
}

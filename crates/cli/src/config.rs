//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `ROCKETSHOES_API_URL` - Catalog API base URL (default: `http://localhost:3333/`)
//! - `ROCKETSHOES_DATA_DIR` - Directory holding the persisted cart slot (default: `.rocketshoes`)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::env;
use std::path::PathBuf;

use thiserror::Error;

/// Default catalog API base URL (local json-server style catalog).
pub const DEFAULT_API_URL: &str = "http://localhost:3333/";

/// Default slot directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = ".rocketshoes";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// CLI application configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Catalog API base URL
    pub api_url: String,
    /// Directory holding the persisted cart slot
    pub data_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl CliConfig {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a present variable cannot be read as unicode.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: get_optional_env("ROCKETSHOES_API_URL")?
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            data_dir: get_optional_env("ROCKETSHOES_DATA_DIR")?
                .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from),
            sentry_dsn: get_optional_env("SENTRY_DSN")?,
        })
    }
}

/// Read an optional environment variable; empty values count as unset.
fn get_optional_env(key: &str) -> Result<Option<String>, ConfigError> {
    match env::var(key) {
        Ok(value) if value.is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_usable() {
        assert!(DEFAULT_API_URL.starts_with("http://"));
        assert!(DEFAULT_API_URL.ends_with('/'));
        assert!(!PathBuf::from(DEFAULT_DATA_DIR).is_absolute());
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidEnvVar("ROCKETSHOES_API_URL".to_string(), "bad".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid environment variable ROCKETSHOES_API_URL: bad"
        );
    }
}

//! Server configuration loading and validation

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

/// Access token lifetime used when none (or zero) is configured.
pub const DEFAULT_ACCESS_TOKEN_LIFETIME: u64 = 600;

/// Configuration for the fake authorization server
///
/// Fields are optional at this level so that a partially specified config
/// file can be merged with command-line flags before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Where the authorize endpoint redirects the browser after "login"
    #[serde(default)]
    pub callback_url: Option<Url>,

    /// Access token lifetime in seconds (0 means the default of 10 minutes)
    #[serde(default)]
    pub access_token_lifetime: u64,
}

/// A config that passed validation. Immutable for the lifetime of the router.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub callback_url: Url,
    pub access_token_lifetime: u64,
}

impl ServerConfig {
    /// Load a config file, returning the default (empty) config if it doesn't exist
    pub fn load(config_file: &Path) -> Result<Self> {
        if !config_file.exists() {
            tracing::info!("No config file found at {:?}, using flags only", config_file);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_file)
            .with_context(|| format!("Failed to read config file: {:?}", config_file))?;
        let config: ServerConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_file))?;
        tracing::info!("Loaded configuration from {:?}", config_file);
        Ok(config)
    }

    /// Check required fields and fill in defaults
    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        let callback_url = self.callback_url.ok_or(ConfigError::MissingCallbackUrl)?;

        let access_token_lifetime = match self.access_token_lifetime {
            0 => DEFAULT_ACCESS_TOKEN_LIFETIME,
            secs => secs,
        };

        Ok(ValidatedConfig {
            callback_url,
            access_token_lifetime,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn callback() -> Url {
        Url::parse("http://client/callback").unwrap()
    }

    #[test]
    fn test_missing_callback_url_is_rejected() {
        let err = ServerConfig::default().validate().unwrap_err();
        assert_eq!(err.to_string(), "config.CallbackUrl must be non-nil");
    }

    #[test]
    fn test_zero_lifetime_uses_default() {
        let config = ServerConfig {
            callback_url: Some(callback()),
            access_token_lifetime: 0,
        };
        assert_eq!(config.validate().unwrap().access_token_lifetime, 600);
    }

    #[test]
    fn test_explicit_lifetime_is_kept() {
        let config = ServerConfig {
            callback_url: Some(callback()),
            access_token_lifetime: 30,
        };
        assert_eq!(config.validate().unwrap().access_token_lifetime, 30);
    }

    #[test]
    fn test_load_missing_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig::load(&dir.path().join("config.json")).unwrap();
        assert!(config.callback_url.is_none());
        assert_eq!(config.access_token_lifetime, 0);
    }

    #[test]
    fn test_load_parses_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"callback_url": "http://localhost:8000/auth/callback", "access_token_lifetime": 120}"#,
        )
        .unwrap();

        let config = ServerConfig::load(&path).unwrap();
        assert_eq!(
            config.callback_url.unwrap().as_str(),
            "http://localhost:8000/auth/callback"
        );
        assert_eq!(config.access_token_lifetime, 120);
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(ServerConfig::load(&path).is_err());
    }
}

//! Fake OAuth2 authorization server
//!
//! A stand-in for a real identity provider in client test suites and local
//! development. Provides:
//! - An authorize endpoint that "logs in" as whatever email you give it
//! - A token endpoint for the authorization code and refresh token grants
//! - Signed JWT access tokens with predictable refresh tokens
//!
//! Nothing is persisted; every request is handled from the immutable config alone.

pub mod assets;
pub mod config;
pub mod error;
pub mod form;
pub mod html;
pub mod oauth;
pub mod routes;
pub mod signing;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use crate::config::{ServerConfig, ValidatedConfig};
pub use crate::error::ConfigError;
pub use crate::routes::Route;
pub use crate::signing::{HmacSigner, TokenSigner};

/// Shared application state
pub struct AppState {
    pub config: ValidatedConfig,
    pub signer: Arc<dyn TokenSigner>,
}

/// Build the server's router, signing tokens with the fixed mock key
pub fn server_router(config: Option<ServerConfig>) -> Result<Router, ConfigError> {
    server_router_with_signer(config, Arc::new(HmacSigner::default()))
}

/// Build the server's router with a caller-provided signer
pub fn server_router_with_signer(
    config: Option<ServerConfig>,
    signer: Arc<dyn TokenSigner>,
) -> Result<Router, ConfigError> {
    let config = config.ok_or(ConfigError::MissingConfig)?.validate()?;

    tracing::debug!(
        "Callback URL {}, access tokens live {}s",
        config.callback_url,
        config.access_token_lifetime
    );

    let state = Arc::new(AppState { config, signer });

    let app = Router::new()
        .route(
            Route::Authorize.path(),
            get(oauth::authorize::handler).fallback(assets::not_found),
        )
        .route(
            Route::Token.path(),
            post(oauth::token::handler).fallback(assets::not_found),
        )
        .fallback(assets::fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config() {
        let err = server_router(None).unwrap_err();
        assert_eq!(err.to_string(), "config must be non-nil");
    }

    #[test]
    fn test_missing_callback_url() {
        let err = server_router(Some(ServerConfig {
            callback_url: None,
            access_token_lifetime: 600,
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "config.CallbackUrl must be non-nil");
    }
}

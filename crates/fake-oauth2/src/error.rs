//! Error types
//!
//! The `Display` text of [`ConfigError`] and [`TokenRequestError`] is part of the
//! server's contract: client test suites match on it byte-for-byte.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Errors raised while constructing the server
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("config must be non-nil")]
    MissingConfig,
    #[error("config.CallbackUrl must be non-nil")]
    MissingCallbackUrl,
}

/// Validation failures on `POST /oauth/token`
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenRequestError {
    #[error("'grant_type' must be 'authorization_code' or 'refresh_token'")]
    InvalidGrantType,
    #[error("'code' is missing or empty")]
    MissingCode,
    #[error("'client_id' is missing or empty")]
    MissingClientId,
    #[error("'refresh_token' is missing or malformed")]
    MalformedRefreshToken,
}

impl IntoResponse for TokenRequestError {
    fn into_response(self) -> Response {
        plain_text(StatusCode::BAD_REQUEST, self.to_string())
    }
}

/// A query string or form body that can't be decoded
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("'{field}' is not valid UTF-8")]
    InvalidEncoding { field: String },
}

impl IntoResponse for FormError {
    fn into_response(self) -> Response {
        plain_text(StatusCode::BAD_REQUEST, self.to_string())
    }
}

/// Failures while signing or verifying an access token
#[derive(Debug, Error)]
pub enum SigningError {
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// A `text/plain` response without the charset suffix axum adds to `String` bodies
pub fn plain_text(status: StatusCode, body: impl Into<String>) -> Response {
    (status, [(header::CONTENT_TYPE, "text/plain")], body.into()).into_response()
}

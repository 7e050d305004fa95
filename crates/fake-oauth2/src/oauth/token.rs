//! Token Endpoint
//!
//! Handles:
//! - Authorization code exchange (the code is the email itself)
//! - Refresh token grants (the refresh token is passed through, never rotated)
//!
//! Nothing is stored: both grants resolve an identity from the request alone.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use super::claims::AccessTokenClaims;
use super::refresh_token;
use crate::error::{plain_text, SigningError, TokenRequestError};
use crate::form::FormFields;
use crate::AppState;

/// Token request (form-encoded). Every field is optional at parse time so
/// that missing fields produce our own error messages.
#[derive(Debug, Default)]
pub struct TokenRequest {
    /// "authorization_code" or "refresh_token"
    pub grant_type: Option<String>,

    /// Authorization code (for authorization_code grant)
    pub code: Option<String>,

    pub client_id: Option<String>,

    /// Accepted but never checked
    pub client_secret: Option<String>,

    /// Refresh token (for refresh_token grant)
    pub refresh_token: Option<String>,

    /// Space-delimited scopes, echoed back
    pub scope: Option<String>,
}

impl TokenRequest {
    /// Pick the token request fields out of a form. Repeated fields use the first value.
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            grant_type: fields.first_owned("grant_type"),
            code: fields.first_owned("code"),
            client_id: fields.first_owned("client_id"),
            client_secret: fields.first_owned("client_secret"),
            refresh_token: fields.first_owned("refresh_token"),
            scope: fields.first_owned("scope"),
        }
    }
}

/// Successful token response
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: u64,
    pub jti: String,
    pub refresh_token: String,
    pub scope: String,
    pub token_type: String,
}

/// Who the token is for, and which refresh token goes back to the client
#[derive(Debug, PartialEq, Eq)]
pub struct ResolvedGrant {
    pub identity: String,
    pub refresh_token: String,
}

/// Handler for `POST /oauth/token`
pub async fn handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) if is_form(&headers) => body,
        Ok(_) => {
            tracing::debug!("Token request body is not form-encoded, treating as empty");
            Bytes::new()
        }
        Err(rejection) => {
            tracing::debug!("Unreadable token request body, treating as empty: {}", rejection);
            Bytes::new()
        }
    };

    let request = match FormFields::parse(&body) {
        Ok(fields) => TokenRequest::from_fields(&fields),
        Err(e) => {
            tracing::debug!("Rejected token request: {}", e);
            return e.into_response();
        }
    };

    let grant = match resolve_grant(&request) {
        Ok(grant) => grant,
        Err(e) => {
            tracing::debug!("Rejected token request: {}", e);
            return e.into_response();
        }
    };

    match issue_tokens(&state, &request, grant) {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            tracing::error!("Failed to sign access token: {}", e);
            plain_text(StatusCode::INTERNAL_SERVER_ERROR, "failed to sign access token")
        }
    }
}

/// Validate the request and work out the identity for the chosen grant
pub fn resolve_grant(request: &TokenRequest) -> Result<ResolvedGrant, TokenRequestError> {
    match request.grant_type.as_deref() {
        // Older clients omit grant_type entirely when exchanging a code
        None | Some("authorization_code") => resolve_authorization_code(request),
        Some("refresh_token") => resolve_refresh_token(request),
        Some(_) => Err(TokenRequestError::InvalidGrantType),
    }
}

fn resolve_authorization_code(request: &TokenRequest) -> Result<ResolvedGrant, TokenRequestError> {
    let code = non_empty(&request.code).ok_or(TokenRequestError::MissingCode)?;
    non_empty(&request.client_id).ok_or(TokenRequestError::MissingClientId)?;

    Ok(ResolvedGrant {
        identity: code.to_string(),
        refresh_token: refresh_token::issue(code),
    })
}

fn resolve_refresh_token(request: &TokenRequest) -> Result<ResolvedGrant, TokenRequestError> {
    let token = request
        .refresh_token
        .as_deref()
        .ok_or(TokenRequestError::MalformedRefreshToken)?;
    let identity = refresh_token::identity(token).ok_or(TokenRequestError::MalformedRefreshToken)?;

    Ok(ResolvedGrant {
        identity: identity.to_string(),
        refresh_token: token.to_string(),
    })
}

/// Build, sign and package a fresh access token for a resolved grant
pub fn issue_tokens(
    state: &AppState,
    request: &TokenRequest,
    grant: ResolvedGrant,
) -> Result<TokenResponse, SigningError> {
    let lifetime = state.config.access_token_lifetime;
    let scope = request.scope.clone().unwrap_or_default();

    let claims = AccessTokenClaims::new(
        &grant.identity,
        request.client_id.as_deref(),
        &scope,
        lifetime,
    );
    let access_token = state.signer.sign(&claims)?;

    tracing::info!(
        "Issued access token {} for {} (client {})",
        claims.jti,
        grant.identity,
        request.client_id.as_deref().unwrap_or("<none>")
    );

    Ok(TokenResponse {
        access_token,
        expires_in: lifetime,
        jti: claims.jti,
        refresh_token: grant.refresh_token,
        scope,
        token_type: "bearer".to_string(),
    })
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/x-www-form-urlencoded"))
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(fields: &[(&str, &str)]) -> TokenRequest {
        let mut request = TokenRequest::default();
        for (key, value) in fields {
            let value = Some(value.to_string());
            match *key {
                "grant_type" => request.grant_type = value,
                "code" => request.code = value,
                "client_id" => request.client_id = value,
                "client_secret" => request.client_secret = value,
                "refresh_token" => request.refresh_token = value,
                "scope" => request.scope = value,
                other => panic!("unknown field {other}"),
            }
        }
        request
    }

    #[test]
    fn test_from_fields_takes_first_value() {
        let fields = FormFields::parse(
            b"grant_type=refresh_token&grant_type=authorization_code&refresh_token=fake_oauth2_refresh_token:a&refresh_token=x",
        )
        .unwrap();
        let request = TokenRequest::from_fields(&fields);

        assert_eq!(request.grant_type.as_deref(), Some("refresh_token"));
        assert_eq!(
            request.refresh_token.as_deref(),
            Some("fake_oauth2_refresh_token:a")
        );
        assert_eq!(request.code, None);
    }

    #[test]
    fn test_form_content_type_detection() {
        let mut headers = HeaderMap::new();
        assert!(!is_form(&headers));

        headers.insert(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded; charset=UTF-8".parse().unwrap(),
        );
        assert!(is_form(&headers));

        headers.insert(header::CONTENT_TYPE, "application/json".parse().unwrap());
        assert!(!is_form(&headers));
    }

    #[test]
    fn test_authorization_code_grant() {
        let grant = resolve_grant(&request(&[
            ("grant_type", "authorization_code"),
            ("code", "foo@bar.gov"),
            ("client_id", "baz"),
            ("client_secret", "baz"),
        ]))
        .unwrap();

        assert_eq!(grant.identity, "foo@bar.gov");
        assert_eq!(grant.refresh_token, "fake_oauth2_refresh_token:foo@bar.gov");
    }

    #[test]
    fn test_missing_grant_type_defaults_to_code_exchange() {
        let err = resolve_grant(&request(&[("code", "foo@bar.gov")])).unwrap_err();
        assert_eq!(err, TokenRequestError::MissingClientId);
    }

    #[test]
    fn test_invalid_grant_types() {
        for grant_type in ["", "wut", "client_credentials", "AUTHORIZATION_CODE", "refresh_token "] {
            let err = resolve_grant(&request(&[
                ("grant_type", grant_type),
                ("code", "foo"),
                ("client_id", "baz"),
            ]))
            .unwrap_err();
            assert_eq!(err, TokenRequestError::InvalidGrantType, "grant_type {grant_type:?}");
        }
    }

    #[test]
    fn test_code_checked_before_client_id() {
        let err = resolve_grant(&request(&[("grant_type", "authorization_code")])).unwrap_err();
        assert_eq!(err, TokenRequestError::MissingCode);

        let err = resolve_grant(&request(&[
            ("grant_type", "authorization_code"),
            ("code", ""),
            ("client_id", "baz"),
        ]))
        .unwrap_err();
        assert_eq!(err, TokenRequestError::MissingCode);
    }

    #[test]
    fn test_empty_client_id() {
        let err = resolve_grant(&request(&[
            ("grant_type", "authorization_code"),
            ("code", "foo"),
            ("client_id", ""),
        ]))
        .unwrap_err();
        assert_eq!(err, TokenRequestError::MissingClientId);
    }

    #[test]
    fn test_client_secret_is_not_required() {
        assert!(
            resolve_grant(&request(&[
                ("grant_type", "authorization_code"),
                ("code", "foo"),
                ("client_id", "baz"),
            ]))
            .is_ok()
        );
    }

    #[test]
    fn test_refresh_token_grant_passes_token_through() {
        let grant = resolve_grant(&request(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", "fake_oauth2_refresh_token:foo@bar.com"),
        ]))
        .unwrap();

        assert_eq!(grant.identity, "foo@bar.com");
        assert_eq!(grant.refresh_token, "fake_oauth2_refresh_token:foo@bar.com");
    }

    #[test]
    fn test_refresh_token_malformed() {
        for token in [None, Some(""), Some("blarg:foo@bar.com"), Some("fake_oauth2_refresh_token:")] {
            let mut req = request(&[("grant_type", "refresh_token")]);
            req.refresh_token = token.map(str::to_string);
            assert_eq!(
                resolve_grant(&req).unwrap_err(),
                TokenRequestError::MalformedRefreshToken,
                "refresh_token {token:?}"
            );
        }
    }
}

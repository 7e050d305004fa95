//! Authorization Endpoint
//!
//! Without an email this shows a login form; with one it "logs in" as that
//! email immediately and redirects to the callback with the email as the code.

use std::sync::Arc;

use axum::{
    extract::{RawQuery, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use url::Url;

use crate::form::FormFields;
use crate::html;
use crate::AppState;

/// Authorization request parameters
#[derive(Debug, Default)]
pub struct AuthorizeRequest {
    /// Identity to log in as. Becomes the authorization code.
    pub email: Option<String>,

    /// Client state (passed through to the redirect)
    pub state: Option<String>,
}

impl AuthorizeRequest {
    /// Repeated parameters use the first value
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            email: fields.first_owned("email"),
            state: fields.first_owned("state"),
        }
    }
}

/// Handler for `GET /oauth/authorize`
pub async fn handler(State(state): State<Arc<AppState>>, RawQuery(query): RawQuery) -> Response {
    let params = match FormFields::parse(query.unwrap_or_default().as_bytes()) {
        Ok(fields) => AuthorizeRequest::from_fields(&fields),
        Err(e) => {
            tracing::debug!("Rejected authorize request: {}", e);
            return e.into_response();
        }
    };

    match params.email.as_deref().filter(|email| !email.is_empty()) {
        Some(email) => {
            let location = callback_location(&state.config.callback_url, email, params.state.as_deref());
            tracing::info!("Logged in as {}, redirecting to {}", email, location);
            (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
        }
        None => {
            tracing::debug!("Serving login form");
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/html")],
                html::login_page(params.state.as_deref()),
            )
                .into_response()
        }
    }
}

/// The callback URL with `code` (and `state`, if any) appended to its query
pub fn callback_location(callback_url: &Url, code: &str, state: Option<&str>) -> Url {
    let mut url = callback_url.clone();
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("code", code);
        if let Some(s) = state {
            query.append_pair("state", s);
        }
    }
    url
}

//! Access token claims

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by every issued access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Audience (the requesting client_id, if any)
    pub aud: Vec<String>,

    /// Requested scopes, echoed without enforcement
    pub scope: Vec<String>,

    /// Identity of the "logged in" user
    pub user_name: String,

    /// Same as `user_name`
    pub email: String,

    /// Issued at (unix seconds)
    pub iat: i64,

    /// Expiry (unix seconds)
    pub exp: i64,

    /// Unique token id
    pub jti: String,
}

impl AccessTokenClaims {
    /// Build a fresh set of claims for `identity`, valid for `lifetime_secs`
    pub fn new(identity: &str, client_id: Option<&str>, scope: &str, lifetime_secs: u64) -> Self {
        let iat = Utc::now().timestamp();
        let lifetime = i64::try_from(lifetime_secs).unwrap_or(i64::MAX);

        Self {
            aud: client_id
                .filter(|id| !id.is_empty())
                .map(|id| vec![id.to_string()])
                .unwrap_or_default(),
            scope: split_scope(scope),
            user_name: identity.to_string(),
            email: identity.to_string(),
            iat,
            exp: iat.saturating_add(lifetime),
            jti: Uuid::new_v4().to_string(),
        }
    }
}

/// Split a space-delimited OAuth scope string
pub fn split_scope(scope: &str) -> Vec<String> {
    scope.split_whitespace().map(str::to_string).collect()
}

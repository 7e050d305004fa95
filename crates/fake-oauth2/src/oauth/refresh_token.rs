//! Fake refresh tokens
//!
//! A refresh token is just the identity behind a fixed prefix. Clients' test
//! suites depend on this exact shape, so don't make it random.

pub const REFRESH_TOKEN_PREFIX: &str = "fake_oauth2_refresh_token:";

/// Build the refresh token for `identity`
pub fn issue(identity: &str) -> String {
    format!("{REFRESH_TOKEN_PREFIX}{identity}")
}

/// Recover the identity from a refresh token, if it is well-formed
pub fn identity(token: &str) -> Option<&str> {
    token
        .strip_prefix(REFRESH_TOKEN_PREFIX)
        .filter(|rest| !rest.is_empty())
}

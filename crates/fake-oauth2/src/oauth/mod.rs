//! OAuth2 endpoints
//!
//! Implements just enough of the authorization code and refresh token grants
//! to drive a client through login, redirect and token exchange.

pub mod authorize;
pub mod claims;
pub mod refresh_token;
pub mod token;

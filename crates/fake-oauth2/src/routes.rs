//! Named routes, so paths are spelled out in one place

/// The endpoints the server exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Authorize,
    Token,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Authorize => "/oauth/authorize",
            Route::Token => "/oauth/token",
        }
    }

    /// Absolute URL of this route on a server reachable at `base`
    pub fn url(self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.path())
    }
}

//! Static assets used by the login page

use axum::{
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};

use crate::error::plain_text;

/// A static file and its content type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Asset {
    pub content_type: &'static str,
    pub body: &'static str,
}

const ASSETS: &[(&str, Asset)] = &[
    (
        "/style.css",
        Asset {
            content_type: "text/css",
            body: STYLE_CSS,
        },
    ),
    (
        "/fake-cloud.gov.svg",
        Asset {
            content_type: "image/svg+xml",
            body: LOGO_SVG,
        },
    ),
];

/// Look up the asset served at `path`
pub fn resolve(path: &str) -> Option<Asset> {
    ASSETS
        .iter()
        .find(|(asset_path, _)| *asset_path == path)
        .map(|(_, asset)| *asset)
}

/// Router fallback: static assets on GET and HEAD, 404 for everything else
pub async fn fallback(method: Method, uri: Uri) -> Response {
    if method == Method::GET || method == Method::HEAD {
        if let Some(asset) = resolve(uri.path()) {
            return (
                StatusCode::OK,
                [(header::CONTENT_TYPE, asset.content_type)],
                asset.body,
            )
                .into_response();
        }
    }

    tracing::debug!("No route for {} {}", method, uri.path());
    not_found().await
}

/// Plain-text 404
pub async fn not_found() -> Response {
    plain_text(StatusCode::NOT_FOUND, "Not Found")
}

const STYLE_CSS: &str = r#"
* {
    box-sizing: border-box;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
    background: #f1f1f1;
    color: #212121;
    margin: 0;
    padding: 20px;
    min-height: 100vh;
    display: flex;
    align-items: center;
    justify-content: center;
}

.container {
    background: #fff;
    padding: 40px;
    border-radius: 8px;
    max-width: 400px;
    width: 100%;
    box-shadow: 0 2px 12px rgba(0,0,0,0.15);
}

.logo {
    display: block;
    width: 64px;
    margin: 0 auto 20px auto;
}

h1 {
    margin: 0 0 10px 0;
    font-size: 24px;
}

p {
    color: #5b616b;
    margin: 0 0 20px 0;
    line-height: 1.5;
}

.field {
    margin-bottom: 20px;
}

label {
    display: block;
    margin-bottom: 8px;
    font-size: 14px;
}

input {
    width: 100%;
    padding: 12px;
    border: 1px solid #aeb0b5;
    border-radius: 4px;
    font-size: 16px;
}

input:focus {
    outline: none;
    border-color: #0071bc;
}

button {
    display: block;
    width: 100%;
    padding: 14px;
    background: #0071bc;
    color: #fff;
    border: none;
    border-radius: 4px;
    font-size: 16px;
    cursor: pointer;
}

button:hover {
    background: #205493;
}
"#;

const LOGO_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64" width="64" height="64">
  <path fill="#0071bc" d="M48 26a14 14 0 0 0-27-4 11 11 0 0 0-3 21.6V44h30a9 9 0 0 0 0-18z"/>
  <text x="32" y="40" font-family="sans-serif" font-size="10" fill="#fff" text-anchor="middle">FAKE</text>
</svg>
"##;

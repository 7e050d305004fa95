//! Inline HTML for the login page

use crate::routes::Route;

/// Login page. Submitting it comes back to the authorize endpoint with `email` set.
pub fn login_page(state: Option<&str>) -> String {
    let state_input = state
        .map(|s| format!(r#"<input type="hidden" name="state" value="{}">"#, html_escape(s)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Login - Fake OAuth2</title>
    <link rel="stylesheet" href="/style.css">
</head>
<body>
    <div class="container">
        <img class="logo" src="/fake-cloud.gov.svg" alt="">
        <h1>Fake Login</h1>
        <p>This is a fake authorization server. Enter any email address to log in as that user.</p>

        <form method="get" action="{}">
            {}
            <div class="field">
                <label for="email">Email</label>
                <input type="email" id="email" name="email" required placeholder="you@example.com" autofocus>
            </div>
            <button type="submit">Log in</button>
        </form>
    </div>
</body>
</html>"#,
        Route::Authorize.path(),
        state_input
    )
}

/// Escape HTML special characters
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_is_embedded() {
        let page = login_page(Some("blah"));
        assert!(page.contains(r#"type="hidden" name="state" value="blah""#));
    }

    #[test]
    fn test_no_state_field_without_state() {
        assert!(!login_page(None).contains(r#"name="state""#));
    }

    #[test]
    fn test_state_is_escaped() {
        let page = login_page(Some(r#""><script>"#));
        assert!(page.contains(r#"value="&quot;&gt;&lt;script&gt;""#));
        assert!(!page.contains("<script>"));
    }

    #[test]
    fn test_form_posts_back_to_authorize() {
        assert!(login_page(None).contains(r#"action="/oauth/authorize""#));
    }
}

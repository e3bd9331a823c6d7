//! Authentication helpers for the Twitter web API.
//!
//! The web API is called as a logged-in browser session: a bearer token for
//! the web client plus the session cookies, with the `ct0` cookie echoed
//! back as the `x-csrf-token` header.

use cookie::Cookie;
use log::debug;

/// Name of the cookie that holds the csrf token.
pub const CSRF_COOKIE: &str = "ct0";

/// Builds the Authorization header for OAuth 2.0 Bearer Token authentication.
///
/// # Parameters
///
/// - `bearer_token`: The bearer token of the web client
///
/// # Returns
///
/// A properly formatted Authorization header string.
///
/// # Example
///
/// ```rust
/// use twextract::build_bearer_auth_header;
///
/// let header = build_bearer_auth_header("your_bearer_token");
/// assert_eq!(header, "Bearer your_bearer_token");
/// ```
pub fn build_bearer_auth_header(bearer_token: &str) -> String {
    format!("Bearer {}", bearer_token)
}

/// Reads the csrf token out of a `cookie` header string.
///
/// # Returns
///
/// - `Some(String)`: The value of the `ct0` cookie
/// - `None`: If the cookie string has no non-empty `ct0` cookie
pub fn csrf_token_from_cookie(cookie_header: &str) -> Option<String> {
    Cookie::split_parse(cookie_header)
        .filter_map(|parsed| match parsed {
            Ok(cookie) => Some(cookie),
            Err(e) => {
                debug!("Ignoring malformed cookie pair: {}", e);
                None
            }
        })
        .find(|cookie| cookie.name() == CSRF_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_header() {
        assert_eq!(build_bearer_auth_header("abc"), "Bearer abc");
    }

    #[test]
    fn test_csrf_token_from_cookie() {
        assert_eq!(
            csrf_token_from_cookie("guest_id=v1%3A1; ct0=5f2e; auth_token=aa"),
            Some("5f2e".to_string())
        );
        assert_eq!(csrf_token_from_cookie("auth_token=aa"), None);
        assert_eq!(csrf_token_from_cookie("ct0=; auth_token=aa"), None);
        assert_eq!(csrf_token_from_cookie(""), None);
    }
}

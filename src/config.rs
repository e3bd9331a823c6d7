//! Configuration module for the twextract service.
//!
//! This module contains the credentials needed to call the Twitter web API
//! and the environment variable handling for the HTTP wrapper.

use log::{debug, error, info, warn};
use std::env;

use crate::error::{Error, Result};
use crate::oauth::csrf_token_from_cookie;

/// Default base URL of the Twitter web API.
pub const DEFAULT_API_BASE: &str = "https://twitter.com/i/api";

/// Configuration struct for Twitter web API credentials.
///
/// The web API authenticates a logged-in browser session: a bearer token
/// for the web client, the session cookie string, and the csrf token that
/// must match the `ct0` cookie.
#[derive(Debug, Clone)]
pub struct TwitterConfig {
    /// Bearer token of the web client
    pub auth_token: String,
    /// CSRF token sent as `x-csrf-token`
    pub csrf_token: String,
    /// Full `cookie` header of the logged-in session
    pub cookie: String,
    /// Base URL that request paths are appended to
    pub api_base: String,
}

/// Masks a secret for logging, keeping at most eight leading and trailing
/// characters.
pub(crate) fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    let len = chars.len();
    let prefix: String = chars.iter().take(8).collect();
    if len > 16 {
        let suffix: String = chars[len - 8..].iter().collect();
        format!("{}...{}", prefix, suffix)
    } else {
        format!("{}...", prefix)
    }
}

impl TwitterConfig {
    /// Creates a new `TwitterConfig` instance by loading credentials from environment variables.
    ///
    /// # Required Environment Variables
    ///
    /// - `xapi_auth_token`: Bearer token of the Twitter web client
    /// - `xapi_cookie`: Cookie header of a logged-in session
    ///
    /// # Optional Environment Variables
    ///
    /// - `xapi_csrf_token`: CSRF token; taken from the `ct0` cookie when unset
    /// - `xapi_api_base`: API base URL (defaults to [`DEFAULT_API_BASE`])
    ///
    /// # Returns
    ///
    /// - `Ok(TwitterConfig)`: If all required values are present
    /// - `Err(Error::Config)`: If a required value is missing or empty
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use twextract::TwitterConfig;
    ///
    /// std::env::set_var("xapi_auth_token", "AAAAAAAAAAAAAAAAAAAAA");
    /// std::env::set_var("xapi_cookie", "auth_token=abc; ct0=def");
    ///
    /// let config = TwitterConfig::from_env().unwrap();
    /// assert_eq!(config.csrf_token, "def");
    /// ```
    pub fn from_env() -> Result<Self> {
        info!("Loading Twitter configuration from environment variables");
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            match lookup(key).filter(|value| !value.trim().is_empty()) {
                Some(value) => {
                    info!("Found {} with length: {}", key, value.len());
                    debug!("{} (masked): {}", key, mask_secret(&value));
                    Ok(value)
                }
                None => {
                    error!("Make sure {} environment variable is set", key);
                    Err(Error::Config(format!(
                        "Missing {} environment variable",
                        key
                    )))
                }
            }
        };

        let auth_token = required("xapi_auth_token")?;
        let cookie = required("xapi_cookie")?;

        let csrf_token = match lookup("xapi_csrf_token").filter(|t| !t.is_empty()) {
            Some(token) => {
                debug!("CSRF token (masked): {}", mask_secret(&token));
                token
            }
            None => {
                info!("No xapi_csrf_token set, reading ct0 from the session cookie");
                csrf_token_from_cookie(&cookie).ok_or_else(|| {
                    Error::Config(
                        "xapi_csrf_token is unset and xapi_cookie has no ct0 cookie".to_string(),
                    )
                })?
            }
        };

        let api_base = lookup("xapi_api_base")
            .filter(|base| !base.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        if api_base != DEFAULT_API_BASE {
            warn!("Using non-default API base {}", api_base);
        }

        info!("Twitter configuration loaded successfully");
        Ok(TwitterConfig {
            auth_token,
            csrf_token,
            cookie,
            api_base,
        })
    }
}

/// Gets the server port from environment variables or returns the default.
///
/// This function reads the `PORT` environment variable and parses it as a u16.
/// If the environment variable is not set or cannot be parsed, it defaults to 3000.
///
/// # Returns
///
/// The port number as a u16.
pub fn get_server_port() -> u16 {
    match env::var("PORT") {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("PORT '{}' is not a valid port number, using 3000", raw);
            3000
        }),
        Err(_) => 3000,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_csrf_token_falls_back_to_cookie() {
        let config = TwitterConfig::from_lookup(lookup_from(&[
            ("xapi_auth_token", "bearer"),
            ("xapi_cookie", "guest_id=v1; ct0=abc123; auth_token=zzz"),
        ]))
        .unwrap();
        assert_eq!(config.csrf_token, "abc123");
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_explicit_values_win() {
        let config = TwitterConfig::from_lookup(lookup_from(&[
            ("xapi_auth_token", "bearer"),
            ("xapi_cookie", "ct0=fromcookie"),
            ("xapi_csrf_token", "explicit"),
            ("xapi_api_base", "http://localhost:9000/api/"),
        ]))
        .unwrap();
        assert_eq!(config.csrf_token, "explicit");
        assert_eq!(config.api_base, "http://localhost:9000/api");
    }

    #[test]
    fn test_missing_credentials() {
        let err = TwitterConfig::from_lookup(lookup_from(&[("xapi_cookie", "ct0=a")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = TwitterConfig::from_lookup(lookup_from(&[
            ("xapi_auth_token", "bearer"),
            ("xapi_cookie", "auth_token=zzz"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("ct0"));
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("short"), "short...");
        assert_eq!(mask_secret("0123456789abcdefXYZ"), "01234567...bcdefXYZ");
    }
}

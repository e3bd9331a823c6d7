//! Transport to the Twitter web API.
//!
//! The extractors only need `fetch(url) -> JSON`; the [`Fetcher`] trait is
//! that seam. [`HttpFetcher`] is the real implementation, carrying the
//! session credentials on every request.

use async_trait::async_trait;
use log::{debug, error, info, warn};
use reqwest::Client;
use serde_json::Value;

use crate::config::TwitterConfig;
use crate::error::{Error, Result};
use crate::oauth::build_bearer_auth_header;

/// Source of raw JSON payloads.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `url` and parses the body as JSON.
    ///
    /// # Returns
    ///
    /// - `Ok(Value)`: The parsed response body
    /// - `Err(Error::Transport)`: If no JSON could be obtained
    async fn fetch(&self, url: &str) -> Result<Value>;
}

/// Flattens an upstream error body onto one log line: whitespace becomes a
/// space, other control characters become `?`, and anything past `max_len`
/// characters is cut off.
pub(crate) fn sanitize_for_logging(text: &str, max_len: usize) -> String {
    let sanitized: String = text
        .chars()
        .map(|c| match c {
            '\n' | '\r' | '\t' => ' ',
            c if c.is_control() => '?',
            c => c,
        })
        .collect();

    if sanitized.chars().count() > max_len {
        let truncated: String = sanitized.chars().take(max_len).collect();
        format!(
            "{}... [truncated, {} total bytes]",
            truncated,
            text.len()
        )
    } else {
        sanitized
    }
}

/// The part of a URL before its query string, for log lines.
fn url_path(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

/// Fetches payloads over HTTPS with the credentials of a logged-in session.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    config: TwitterConfig,
}

impl HttpFetcher {
    pub fn new(config: TwitterConfig) -> Self {
        HttpFetcher {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Value> {
        let path = url_path(url);
        info!("Fetching {}", path);

        let response = self
            .client
            .get(url)
            .header("authorization", build_bearer_auth_header(&self.config.auth_token))
            .header("x-csrf-token", self.config.csrf_token.as_str())
            .header("cookie", self.config.cookie.as_str())
            .header("x-twitter-active-user", "yes")
            .header("x-twitter-auth-type", "OAuth2Session")
            .header("content-type", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("Received {} bytes with status {} from {}", body.len(), status, path);

        if !status.is_success() {
            error!("Request to {} failed - Status: {}", path, status);
            debug!("Error response: {}", sanitize_for_logging(&body, 200));
            return Err(Error::Transport(format!(
                "Twitter API error ({}) for {}",
                status, path
            )));
        }

        let json: Value = serde_json::from_str(&body)?;

        if let Some(errors) = json.get("errors").and_then(Value::as_array) {
            for err in errors {
                if let Some(message) = err.get("message").and_then(Value::as_str) {
                    warn!("Twitter API reported an error for {}: {}", path, message);
                }
            }
        }

        Ok(json)
    }
}

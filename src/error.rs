//! Error types for twextract.
//!
//! The extraction layer keeps three failure families apart: the queried
//! resource does not exist, the upstream payload no longer matches the shape
//! the navigators expect, and no JSON was available at all (transport).

use axum::http::StatusCode;
use thiserror::Error;

/// Crate result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Crate error type.
#[derive(Debug, Error)]
pub enum Error {
    // === Resource absent ===
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Tweet not found: {0}")]
    TweetNotFound(String),

    // === Upstream schema drift ===
    #[error("Unexpected response shape: {context}")]
    UnexpectedShape { context: String },

    // === Collaborators ===
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Builds an [`Error::UnexpectedShape`] naming the offending path or entry.
    pub fn shape(context: impl Into<String>) -> Self {
        Self::UnexpectedShape {
            context: context.into(),
        }
    }

    /// Returns true for the resource-absent family.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound(_) | Self::TweetNotFound(_))
    }

    /// Returns the HTTP status code the wrapper service answers with.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::UserNotFound(_) | Self::TweetNotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::UnexpectedShape { .. } | Self::Transport(_) => StatusCode::BAD_GATEWAY,
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::TweetNotFound(_) => "TWEET_NOT_FOUND",
            Self::UnexpectedShape { .. } => "UNEXPECTED_RESPONSE_SHAPE",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Transport(format!("response body is not valid JSON: {}", err))
    }
}

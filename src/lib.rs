//! # twextract Library
//!
//! Extraction of tweets, users and pagination cursors from the deeply
//! nested, weakly-typed JSON returned by the Twitter/X web API.
//!
//! ## Features
//!
//! - Per-resource extractors (user details, tweets, likes, followers,
//!   following, tweet details, replies, likers, retweeters, search, trending)
//! - Uniform `ExtractionResult { items, next }` pages with opaque cursors
//! - Search filter serialization into the upstream query syntax
//! - A distinct error family for missing resources, upstream shape drift
//!   and transport failures
//! - An HTTP wrapper service exposing every extraction as JSON
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use twextract::extract_user_followers;
//!
//! let raw = json!({"data": {"user": {"result": {"timeline": {"timeline": {
//!     "instructions": [{"type": "TimelineAddEntries", "entries": [
//!         {"entryId": "cursor-bottom-1", "content": {"value": "1767|1590"}}
//!     ]}]
//! }}}}}});
//!
//! let page = extract_user_followers(&raw, "12").unwrap();
//! assert!(page.items.is_empty());
//! assert_eq!(page.next.unwrap().as_str(), "1767%7C1590");
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod oauth;
pub mod scraper;
pub mod twitter;

// Re-export commonly used types and functions
pub use config::{get_server_port, TwitterConfig};
pub use error::{Error, Result};
pub use models::{
    Cursor, CursorKind, ExtractionResult, FetchArgs, ResourceType, Tweet, TweetFilter, User,
};
pub use oauth::build_bearer_auth_header;
pub use scraper::Scraper;
pub use twitter::{
    extract_search_tweets, extract_trending, extract_tweet_details, extract_tweet_likers,
    extract_tweet_replies, extract_tweet_retweeters, extract_user_details,
    extract_user_followers, extract_user_following, extract_user_likes, extract_user_tweets,
    Fetcher, HttpFetcher,
};

#[cfg(test)]
mod tests;

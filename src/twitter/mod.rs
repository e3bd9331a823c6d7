//! Twitter/X web API integration module.
//!
//! Request building, transport, and the extractors that turn raw GraphQL and
//! legacy REST payloads into domain types. Each extractor is a pure function
//! of the raw JSON; only [`api`] performs I/O.

mod api;
mod entries;
mod navigator;
pub(crate) mod raw;
mod requests;
mod search;
mod tweets;
mod users;

// Re-export public API
pub use api::{Fetcher, HttpFetcher};
pub use entries::{classify, ContentKind, EntryClass, ENTRY_RULES};
pub use requests::{request_url, GraphQlOperation};
pub use search::{extract_search_tweets, extract_trending};
pub use tweets::{
    extract_tweet_details, extract_tweet_likers, extract_tweet_replies, extract_tweet_retweeters,
};
pub use users::{
    extract_user_details, extract_user_followers, extract_user_following, extract_user_likes,
    extract_user_tweets,
};

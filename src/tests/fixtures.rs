//! Captured response payloads.

use serde_json::Value;

pub const USER_DETAILS: &str = include_str!("../../fixtures/user_details.json");
pub const USER_TWEETS: &str = include_str!("../../fixtures/user_tweets.json");
pub const FOLLOWERS: &str = include_str!("../../fixtures/followers.json");
pub const TWEET_DETAIL: &str = include_str!("../../fixtures/tweet_detail.json");
pub const LIKERS: &str = include_str!("../../fixtures/likers.json");
pub const SEARCH_FIRST_PAGE: &str = include_str!("../../fixtures/search_first_page.json");
pub const SEARCH_NEXT_PAGE: &str = include_str!("../../fixtures/search_next_page.json");
pub const TRENDING: &str = include_str!("../../fixtures/trending.json");

/// Parses a fixture.
pub fn load(fixture: &str) -> Value {
    serde_json::from_str(fixture).unwrap()
}

//! Extractors for resources that hang off a user container:
//! account details, tweets, likes, followers and following.
//!
//! All of them share the existence check on `data.user`: the upstream API
//! answers a lookup of a nonexistent account with `"user": {}` (or no
//! `user` key at all), which is reported as [`Error::UserNotFound`] before
//! any entry is looked at.

use log::debug;
use serde_json::Value;

use super::navigator::{add_entries, collect_tweets, collect_users, scan_entries};
use super::raw::{is_json_empty, require, require_any};
use crate::error::{Error, Result};
use crate::models::{ExtractionResult, Tweet, User};

/// Tweets and likes timeline node; newer responses use `timeline_v2`.
const USER_TIMELINE: &[&str] = &[
    "/data/user/result/timeline_v2/timeline",
    "/data/user/result/timeline/timeline",
];
const RELATIONS_TIMELINE: &str = "/data/user/result/timeline/timeline";

fn ensure_user(raw: &Value, user_id: &str) -> Result<()> {
    if is_json_empty(raw.pointer("/data/user")) {
        debug!("User container empty for {}", user_id);
        return Err(Error::UserNotFound(user_id.to_string()));
    }
    Ok(())
}

/// Extracts account details from a `UserByScreenName`/`UserByRestId` response.
///
/// # Parameters
///
/// - `raw`: The raw response
/// - `user_id`: The queried username or rest id, for error reporting
///
/// # Returns
///
/// - `Ok(User)`: The account
/// - `Err(Error::UserNotFound)`: If the user container is empty or the
///   result is `UserUnavailable` (suspended accounts)
/// - `Err(Error::UnexpectedShape)`: If the result node is missing or has no id
pub fn extract_user_details(raw: &Value, user_id: &str) -> Result<User> {
    ensure_user(raw, user_id)?;
    let result = require(raw, "/data/user/result")?;

    if result.get("__typename").and_then(Value::as_str) == Some("UserUnavailable") {
        return Err(Error::UserNotFound(user_id.to_string()));
    }

    User::from_raw(result).ok_or_else(|| Error::shape("user result without `rest_id`"))
}

/// Extracts one page of a user's tweets.
///
/// Retweet/conversation modules are expanded into the tweets they hold, so a
/// page with two tweet entries and one module of one item yields three tweets.
pub fn extract_user_tweets(raw: &Value, user_id: &str) -> Result<ExtractionResult<Tweet>> {
    ensure_user(raw, user_id)?;
    let (at, timeline) = require_any(raw, USER_TIMELINE)?;
    let scan = scan_entries(add_entries(timeline, at)?)?;

    Ok(ExtractionResult::new(collect_tweets(&scan)?, scan.next))
}

/// Extracts one page of the tweets a user has liked.
pub fn extract_user_likes(raw: &Value, user_id: &str) -> Result<ExtractionResult<Tweet>> {
    ensure_user(raw, user_id)?;
    let (at, timeline) = require_any(raw, USER_TIMELINE)?;
    let scan = scan_entries(add_entries(timeline, at)?)?;

    Ok(ExtractionResult::new(collect_tweets(&scan)?, scan.next))
}

/// Extracts one page of a user's followers.
pub fn extract_user_followers(raw: &Value, user_id: &str) -> Result<ExtractionResult<User>> {
    extract_relations(raw, user_id)
}

/// Extracts one page of the accounts a user follows.
pub fn extract_user_following(raw: &Value, user_id: &str) -> Result<ExtractionResult<User>> {
    extract_relations(raw, user_id)
}

fn extract_relations(raw: &Value, user_id: &str) -> Result<ExtractionResult<User>> {
    ensure_user(raw, user_id)?;
    let timeline = require(raw, RELATIONS_TIMELINE)?;
    let scan = scan_entries(add_entries(timeline, RELATIONS_TIMELINE)?)?;

    Ok(ExtractionResult::new(collect_users(&scan)?, scan.next))
}

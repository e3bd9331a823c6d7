//! Extractors for resources that hang off a tweet: the tweet itself, its
//! replies, and the users who liked or retweeted it.

use log::debug;
use serde_json::Value;

use super::entries::{classify, ContentKind, EntryClass};
use super::navigator::{
    add_entries, collect_users, entry_id, scan_entries, tweet_in_item, tweets_in_entry,
};
use super::raw::{is_json_empty, require, require_any};
use crate::error::{Error, Result};
use crate::models::{ExtractionResult, Tweet, User};

/// Conversation node of a `TweetDetail` response.
const CONVERSATION: &[&str] = &[
    "/data/threaded_conversation_with_injections_v2",
    "/data/threaded_conversation_with_injections",
];

fn ensure_tweet(container: Option<&Value>, tweet_id: &str) -> Result<()> {
    if is_json_empty(container) {
        debug!("Tweet container empty for {}", tweet_id);
        return Err(Error::TweetNotFound(tweet_id.to_string()));
    }
    Ok(())
}

/// Extracts the focal tweet of a `TweetDetail` response.
///
/// # Parameters
///
/// - `raw`: The raw response
/// - `tweet_id`: The rest id of the tweet that was requested
///
/// # Returns
///
/// - `Ok(Tweet)`: The requested tweet
/// - `Err(Error::TweetNotFound)`: If `data` is empty or the tweet is a tombstone
/// - `Err(Error::UnexpectedShape)`: If the conversation has no entry for the tweet
pub fn extract_tweet_details(raw: &Value, tweet_id: &str) -> Result<Tweet> {
    ensure_tweet(raw.pointer("/data"), tweet_id)?;
    let (at, conversation) = require_any(raw, CONVERSATION)?;

    for entry in add_entries(conversation, at)? {
        let id = entry_id(entry)?;
        let is_focal = classify(id) == EntryClass::Content(ContentKind::Tweet)
            && id.rsplit('-').next() == Some(tweet_id);
        if is_focal {
            return tweet_in_item(require(entry, "/content/itemContent")?)?
                .ok_or_else(|| Error::TweetNotFound(tweet_id.to_string()));
        }
    }

    Err(Error::shape(format!(
        "conversation holds no entry for tweet {}",
        tweet_id
    )))
}

/// Extracts one page of direct replies to a tweet.
///
/// Reply threads may also carry the focal tweet, its ancestors, and nested
/// replies to other replies. Only tweets whose `in_reply_to_status_id_str`
/// equals `tweet_id` are kept.
pub fn extract_tweet_replies(raw: &Value, tweet_id: &str) -> Result<ExtractionResult<Tweet>> {
    ensure_tweet(raw.pointer("/data"), tweet_id)?;
    let (at, conversation) = require_any(raw, CONVERSATION)?;
    let scan = scan_entries(add_entries(conversation, at)?)?;

    let mut replies = Vec::new();
    for (kind, entry) in &scan.content {
        for tweet in tweets_in_entry(*kind, entry)? {
            if tweet.reply_to.as_deref() == Some(tweet_id) {
                replies.push(tweet);
            } else {
                debug!("Dropping tweet {} not replying to {}", tweet.id, tweet_id);
            }
        }
    }

    Ok(ExtractionResult::new(replies, scan.next))
}

/// Extracts one page of the users who liked a tweet.
pub fn extract_tweet_likers(raw: &Value, tweet_id: &str) -> Result<ExtractionResult<User>> {
    extract_engagement(raw, tweet_id, "/data/favoriters_timeline")
}

/// Extracts one page of the users who retweeted a tweet.
pub fn extract_tweet_retweeters(raw: &Value, tweet_id: &str) -> Result<ExtractionResult<User>> {
    extract_engagement(raw, tweet_id, "/data/retweeters_timeline")
}

fn extract_engagement(
    raw: &Value,
    tweet_id: &str,
    container: &str,
) -> Result<ExtractionResult<User>> {
    ensure_tweet(raw.pointer(container), tweet_id)?;
    let timeline = require(raw, &format!("{}/timeline", container))?;
    let scan = scan_entries(add_entries(timeline, container)?)?;

    Ok(ExtractionResult::new(collect_users(&scan)?, scan.next))
}

//! The entry-list protocol shared by every per-resource extractor.
//!
//! A paginated payload nests its entries inside an `instructions` list. The
//! extractors locate the resource's timeline node, select the add-entries
//! instruction, classify each entry once and in order, and collect the
//! content items plus the bottom cursor.

use log::debug;
use serde_json::Value;

use super::entries::{classify, ContentKind, EntryClass};
use super::raw::{is_json_empty, require, require_array, require_str};
use crate::error::{Error, Result};
use crate::models::{Cursor, Tweet, User};

/// Instruction type that carries the page's entries.
pub(crate) const ADD_ENTRIES: &str = "TimelineAddEntries";

/// Where cursor entries keep their token, tried in order. User lists keep
/// it directly under `content`, reply threads under `itemContent`, and the
/// legacy search timeline under `operation.cursor`.
const CURSOR_VALUE_POINTERS: &[&str] = &[
    "/content/value",
    "/content/itemContent/value",
    "/content/operation/cursor/value",
];

/// Content entries and bottom cursor of one entry list.
#[derive(Debug)]
pub(crate) struct EntryScan<'a> {
    pub content: Vec<(ContentKind, &'a Value)>,
    pub next: Option<Cursor>,
}

/// Selects the entries of the add-entries instruction inside a timeline node.
///
/// # Returns
///
/// - `Ok(&[Value])`: The (possibly empty) entry list
/// - `Err(Error::UnexpectedShape)`: If `instructions` is missing or holds no
///   add-entries instruction
pub(crate) fn add_entries<'a>(timeline: &'a Value, at: &str) -> Result<&'a [Value]> {
    let instructions = require_array(timeline, "/instructions")
        .map_err(|_| Error::shape(format!("missing `{}/instructions`", at)))?;

    let instruction = instructions
        .iter()
        .find(|instruction| instruction.get("type").and_then(Value::as_str) == Some(ADD_ENTRIES))
        .ok_or_else(|| Error::shape(format!("no {} instruction under `{}`", ADD_ENTRIES, at)))?;

    require_array(instruction, "/entries")
}

/// The `entryId` of an entry.
pub(crate) fn entry_id(entry: &Value) -> Result<&str> {
    require_str(entry, "/entryId")
}

/// Reads the token out of a cursor entry.
pub(crate) fn cursor_value(entry: &Value) -> Result<Cursor> {
    CURSOR_VALUE_POINTERS
        .iter()
        .find_map(|pointer| entry.pointer(pointer).and_then(Value::as_str))
        .map(Cursor::new)
        .ok_or_else(|| {
            Error::shape(format!(
                "cursor entry `{}` carries no value",
                entry_id(entry).unwrap_or("?")
            ))
        })
}

/// Classifies every entry of a list in a single ordered pass.
///
/// Content entries are kept in payload order. When several bottom cursors
/// are present the last one wins. Unrelated entries are dropped.
pub(crate) fn scan_entries(entries: &[Value]) -> Result<EntryScan<'_>> {
    let mut scan = EntryScan {
        content: Vec::new(),
        next: None,
    };

    for entry in entries {
        let id = entry_id(entry)?;
        match classify(id) {
            EntryClass::Content(kind) => scan.content.push((kind, entry)),
            EntryClass::Cursor => scan.next = Some(cursor_value(entry)?),
            EntryClass::Unrelated => debug!("Skipping unrelated entry {}", id),
        }
    }

    debug!(
        "Scanned {} entries: {} content, cursor {}",
        entries.len(),
        scan.content.len(),
        if scan.next.is_some() { "found" } else { "absent" }
    );
    Ok(scan)
}

/// Turns a `tweet_results.result` node into a tweet.
///
/// Visibility wrappers are unwrapped. Tombstones and unavailable tweets
/// yield `None`; any other result without an id is a shape error.
pub(crate) fn tweet_from_result(result: &Value) -> Result<Option<Tweet>> {
    match result.get("__typename").and_then(Value::as_str) {
        Some("TweetWithVisibilityResults") => tweet_from_result(require(result, "/tweet")?),
        Some("TweetTombstone") | Some("TweetUnavailable") => {
            debug!("Skipping unavailable tweet result");
            Ok(None)
        }
        _ => Tweet::from_raw(result)
            .map(Some)
            .ok_or_else(|| Error::shape("tweet result without `rest_id`")),
    }
}

/// Reads the tweet held by an `itemContent` node.
pub(crate) fn tweet_in_item(item_content: &Value) -> Result<Option<Tweet>> {
    if item_content.get("itemType").and_then(Value::as_str) == Some("TimelineTombstone") {
        return Ok(None);
    }
    let results = require(item_content, "/tweet_results")?;
    if is_json_empty(Some(results)) {
        debug!("Skipping entry with empty tweet_results");
        return Ok(None);
    }
    tweet_from_result(require(results, "/result")?)
}

/// Expands a content entry into the tweets it carries.
///
/// Conversation modules are expanded one level. Their `items` carry ids
/// prefixed with the module's own id; the remainder is classified like a
/// top-level entry and only tweet items are read (show-more cursors and
/// tombstone placeholders are skipped). An empty module yields no tweets.
/// User entries carry no tweets.
pub(crate) fn tweets_in_entry(kind: ContentKind, entry: &Value) -> Result<Vec<Tweet>> {
    match kind {
        ContentKind::Tweet => Ok(tweet_in_item(require(entry, "/content/itemContent")?)?
            .into_iter()
            .collect()),
        ContentKind::Conversation => {
            let module_id = entry_id(entry)?;
            let mut tweets = Vec::new();
            for item in require_array(entry, "/content/items")? {
                let item_id = entry_id(item)?;
                let tag = item_id.strip_prefix(module_id).unwrap_or(item_id);
                if classify(tag) != EntryClass::Content(ContentKind::Tweet) {
                    debug!("Skipping module item {}", item_id);
                    continue;
                }
                if let Some(tweet) = tweet_in_item(require(item, "/item/itemContent")?)? {
                    tweets.push(tweet);
                }
            }
            Ok(tweets)
        }
        ContentKind::User => Ok(Vec::new()),
    }
}

/// Reads the user held by a user entry. Unavailable users yield `None`.
pub(crate) fn user_in_entry(entry: &Value) -> Result<Option<User>> {
    let results = require(entry, "/content/itemContent/user_results")?;
    if is_json_empty(Some(results)) {
        return Ok(None);
    }
    let result = require(results, "/result")?;
    if result.get("__typename").and_then(Value::as_str) == Some("UserUnavailable") {
        return Ok(None);
    }
    User::from_raw(result)
        .map(Some)
        .ok_or_else(|| Error::shape("user result without `rest_id`"))
}

/// All tweets carried by the scanned content, in payload order.
pub(crate) fn collect_tweets(scan: &EntryScan<'_>) -> Result<Vec<Tweet>> {
    let mut tweets = Vec::new();
    for (kind, entry) in &scan.content {
        tweets.extend(tweets_in_entry(*kind, entry)?);
    }
    Ok(tweets)
}

/// All users carried by the scanned content, in payload order. Tweet and
/// conversation entries are skipped.
pub(crate) fn collect_users(scan: &EntryScan<'_>) -> Result<Vec<User>> {
    let mut users = Vec::new();
    for (kind, entry) in &scan.content {
        if *kind != ContentKind::User {
            continue;
        }
        if let Some(user) = user_in_entry(entry)? {
            users.push(user);
        }
    }
    Ok(users)
}

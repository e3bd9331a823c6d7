//! Extractors for the legacy REST timelines: filtered search and trending.
//!
//! These responses predate the GraphQL shape. Tweets live in a flat
//! `globalObjects.tweets` map keyed by id and the timeline only carries
//! cursors and modules, with `addEntries`/`replaceEntry` keys instead of a
//! typed instruction list.

use log::debug;
use serde_json::Value;

use super::navigator::{entry_id, scan_entries};
use super::raw::{require, require_array, require_str};
use crate::error::{Error, Result};
use crate::models::{Cursor, ExtractionResult, Tweet};

/// Instruction slot that only subsequent search pages have; it replaces the
/// bottom cursor entry of the previous page.
const REPLACE_CURSOR_SLOT: usize = 2;

fn add_entries_instruction(instructions: &[Value]) -> Result<&[Value]> {
    let instruction = instructions
        .iter()
        .find(|instruction| instruction.get("addEntries").is_some())
        .ok_or_else(|| Error::shape("no addEntries instruction under `/timeline/instructions`"))?;
    require_array(instruction, "/addEntries/entries")
}

/// Extracts one page of search results.
///
/// The first page carries its bottom cursor as an entry inside `addEntries`;
/// later pages carry it in a `replaceEntry` instruction at slot 2. Tweets are
/// returned newest first.
///
/// # Returns
///
/// - `Ok(ExtractionResult<Tweet>)`: Possibly empty when the window held no matches
/// - `Err(Error::UnexpectedShape)`: If the timeline, cursor or tweet map is malformed
pub fn extract_search_tweets(raw: &Value) -> Result<ExtractionResult<Tweet>> {
    let instructions = require_array(raw, "/timeline/instructions")?;

    let next = match instructions.get(REPLACE_CURSOR_SLOT) {
        Some(replace) => Some(Cursor::new(require_str(
            replace,
            "/replaceEntry/entry/content/operation/cursor/value",
        )?)),
        None => scan_entries(add_entries_instruction(instructions)?)?.next,
    };

    let objects = require(raw, "/globalObjects/tweets")?
        .as_object()
        .ok_or_else(|| Error::shape("`/globalObjects/tweets` is not an object"))?;

    let mut tweets = Vec::with_capacity(objects.len());
    for (key, object) in objects {
        let tweet = Tweet::from_raw(object)
            .ok_or_else(|| Error::shape(format!("search tweet {} without `id_str`", key)))?;
        tweets.push(tweet);
    }
    // Ids are decimal snowflakes: longer is newer, equal lengths compare lexically.
    tweets.sort_by(|a, b| b.id.len().cmp(&a.id.len()).then_with(|| b.id.cmp(&a.id)));

    debug!("Extracted {} search results", tweets.len());
    Ok(ExtractionResult::new(tweets, next))
}

/// Extracts the names of the currently trending topics.
///
/// Trend items are tagged `trends-<name>` with the name percent-encoded and
/// spaces written as `+`. Trending has no cursor.
pub fn extract_trending(raw: &Value) -> Result<ExtractionResult<String>> {
    let instructions = require_array(raw, "/timeline/instructions")?;
    let entries = add_entries_instruction(instructions)?;

    let module = entries
        .iter()
        .find(|entry| entry.get("entryId").and_then(Value::as_str) == Some("trends"))
        .ok_or_else(|| Error::shape("no `trends` entry in trending timeline"))?;

    let mut trends = Vec::new();
    for item in require_array(module, "/content/timelineModule/items")? {
        let id = entry_id(item)?;
        let Some((_, encoded)) = id.split_once("trends-") else {
            debug!("Skipping non-trend item {}", id);
            continue;
        };
        let name = urlencoding::decode(encoded)
            .map_err(|e| Error::shape(format!("trend id `{}` is not valid UTF-8: {}", id, e)))?;
        trends.push(name.replace('+', " "));
    }

    Ok(ExtractionResult::new(trends, None))
}

//! Tweet details.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::twitter::raw::{date_at, str_at, u64_at};

/// A tweet as reported by the Twitter web API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tweet {
    /// Numeric rest id, kept as a string. Never empty.
    pub id: String,
    pub author_id: Option<String>,
    pub full_text: String,
    pub created_at: Option<DateTime<Utc>>,
    pub lang: Option<String>,
    pub conversation_id: Option<String>,
    pub reply_to: Option<String>,
    pub quoted: Option<String>,
    pub hashtags: Vec<String>,
    pub like_count: u64,
    pub retweet_count: u64,
    pub reply_count: u64,
    pub quote_count: u64,
    pub view_count: Option<u64>,
}

impl Tweet {
    /// Builds a tweet from a raw `tweet_results.result` node, or from a flat
    /// legacy tweet object as found in search `globalObjects`.
    ///
    /// Long-form tweets carry their untruncated text under `note_tweet`;
    /// that text wins over the legacy `full_text` when present.
    ///
    /// # Returns
    ///
    /// - `Some(Tweet)`: When a non-empty `rest_id` (or legacy `id_str`) is present
    /// - `None`: When the node carries no identifier
    pub fn from_raw(raw: &Value) -> Option<Tweet> {
        let legacy = raw.get("legacy").unwrap_or(raw);
        let id = str_at(raw, "/rest_id").or_else(|| str_at(legacy, "/id_str"))?;

        let full_text = str_at(raw, "/note_tweet/note_tweet_results/result/text")
            .or_else(|| str_at(legacy, "/full_text"))
            .or_else(|| str_at(legacy, "/text"))
            .unwrap_or_default();

        let hashtags = legacy
            .pointer("/entities/hashtags")
            .and_then(Value::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(|tag| str_at(tag, "/text"))
                    .collect()
            })
            .unwrap_or_default();

        Some(Tweet {
            id,
            author_id: str_at(raw, "/core/user_results/result/rest_id")
                .or_else(|| str_at(legacy, "/user_id_str")),
            full_text,
            created_at: date_at(legacy, "/created_at"),
            lang: str_at(legacy, "/lang"),
            conversation_id: str_at(legacy, "/conversation_id_str"),
            reply_to: str_at(legacy, "/in_reply_to_status_id_str"),
            quoted: str_at(legacy, "/quoted_status_id_str"),
            hashtags,
            like_count: u64_at(legacy, "/favorite_count").unwrap_or(0),
            retweet_count: u64_at(legacy, "/retweet_count").unwrap_or(0),
            reply_count: u64_at(legacy, "/reply_count").unwrap_or(0),
            quote_count: u64_at(legacy, "/quote_count").unwrap_or(0),
            view_count: u64_at(raw, "/views/count"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_graphql_result() {
        let raw = json!({
            "__typename": "Tweet",
            "rest_id": "1672224839010414592",
            "core": {"user_results": {"result": {"rest_id": "44196397"}}},
            "views": {"count": "9001", "state": "EnabledWithCount"},
            "legacy": {
                "full_text": "hello #rust",
                "created_at": "Fri Jun 23 11:21:06 +0000 2023",
                "lang": "en",
                "favorite_count": 10,
                "retweet_count": 2,
                "reply_count": 1,
                "quote_count": 0,
                "in_reply_to_status_id_str": "1672224839010414000",
                "entities": {"hashtags": [{"text": "rust", "indices": [6, 11]}]}
            }
        });
        let tweet = Tweet::from_raw(&raw).unwrap();
        assert_eq!(tweet.id, "1672224839010414592");
        assert_eq!(tweet.author_id.as_deref(), Some("44196397"));
        assert_eq!(tweet.full_text, "hello #rust");
        assert_eq!(tweet.reply_to.as_deref(), Some("1672224839010414000"));
        assert_eq!(tweet.quoted, None);
        assert_eq!(tweet.hashtags, vec!["rust".to_string()]);
        assert_eq!(tweet.like_count, 10);
        assert_eq!(tweet.view_count, Some(9001));
        assert_eq!(
            tweet.created_at.map(|d| d.to_rfc3339()),
            Some("2023-06-23T11:21:06+00:00".to_string())
        );
    }

    #[test]
    fn test_from_flat_legacy_object() {
        let raw = json!({"id_str": "5", "text": "short", "user_id_str": "9"});
        let tweet = Tweet::from_raw(&raw).unwrap();
        assert_eq!(tweet.id, "5");
        assert_eq!(tweet.full_text, "short");
        assert_eq!(tweet.author_id.as_deref(), Some("9"));
        assert_eq!(tweet.like_count, 0);
        assert!(tweet.hashtags.is_empty());
    }

    #[test]
    fn test_note_tweet_text_wins() {
        let raw = json!({
            "rest_id": "1",
            "note_tweet": {"note_tweet_results": {"result": {"text": "the long version"}}},
            "legacy": {"full_text": "the long…"}
        });
        assert_eq!(Tweet::from_raw(&raw).unwrap().full_text, "the long version");
    }

    #[test]
    fn test_missing_or_empty_id_yields_none() {
        assert_eq!(Tweet::from_raw(&json!({"legacy": {"full_text": "x"}})), None);
        assert_eq!(Tweet::from_raw(&json!({"rest_id": ""})), None);
    }
}

//! Search filter and its serialization into the upstream search syntax.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// The filter used for searching tweets.
///
/// Deserializes from camelCase JSON (the body of `POST /search`). Every
/// field is optional; absent or empty fields emit no clause at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TweetFilter {
    /// Words that must all appear.
    pub include_words: Vec<String>,
    /// Exact phrase to match.
    pub include_phrase: Option<String>,
    /// Words of which at least one must appear.
    pub optional_words: Vec<String>,
    pub exclude_words: Vec<String>,
    /// Hashtags, without the leading `#`.
    pub hashtags: Vec<String>,
    /// Authors, without the leading `@`.
    pub from_users: Vec<String>,
    /// Users the tweets are addressed to, without the leading `@`.
    pub to_users: Vec<String>,
    /// Mentioned users, without the leading `@`.
    pub mentions: Vec<String>,
    pub min_replies: Option<u64>,
    pub min_likes: Option<u64>,
    pub min_retweets: Option<u64>,
    pub language: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub since_id: Option<String>,
    pub max_id: Option<String>,
    /// Id of a tweet that the results must quote.
    pub quoted: Option<String>,
    /// Whether tweets containing links are included. Defaults to true.
    pub links: bool,
    /// Whether replies are included. Defaults to true.
    pub replies: bool,
}

impl Default for TweetFilter {
    fn default() -> Self {
        TweetFilter {
            include_words: Vec::new(),
            include_phrase: None,
            optional_words: Vec::new(),
            exclude_words: Vec::new(),
            hashtags: Vec::new(),
            from_users: Vec::new(),
            to_users: Vec::new(),
            mentions: Vec::new(),
            min_replies: None,
            min_likes: None,
            min_retweets: None,
            language: None,
            start_date: None,
            end_date: None,
            since_id: None,
            max_id: None,
            quoted: None,
            links: true,
            replies: true,
        }
    }
}

impl TweetFilter {
    /// Serializes the filter into the query string sent as the `q` parameter.
    ///
    /// Clauses are emitted in a fixed order regardless of how the filter was
    /// built: bare words, quoted phrase, optional words, excluded words,
    /// from/to/mention groups, hashtags, engagement thresholds, language,
    /// date range, id bounds, quoted tweet, and finally the negative
    /// `-filter:` toggles. Clauses are joined by single spaces.
    ///
    /// # Example
    ///
    /// ```rust
    /// use twextract::TweetFilter;
    ///
    /// let filter = TweetFilter {
    ///     from_users: vec!["alice".to_string()],
    ///     hashtags: vec!["news".to_string()],
    ///     min_likes: Some(10),
    ///     ..Default::default()
    /// };
    /// assert_eq!(filter.to_query(), "(from:alice) (#news) min_faves:10");
    /// ```
    pub fn to_query(&self) -> String {
        let mut clauses: Vec<String> = Vec::new();

        let words = non_empty(&self.include_words, "");
        if !words.is_empty() {
            clauses.push(words.join(" "));
        }
        if let Some(phrase) = self.include_phrase.as_deref().map(str::trim) {
            if !phrase.is_empty() {
                clauses.push(format!("\"{}\"", phrase));
            }
        }
        clauses.extend(or_group(&self.optional_words, ""));
        let excluded = non_empty(&self.exclude_words, "");
        if !excluded.is_empty() {
            clauses.push(
                excluded
                    .iter()
                    .map(|word| format!("-{}", word))
                    .collect::<Vec<_>>()
                    .join(" "),
            );
        }
        clauses.extend(or_group(&self.from_users, "from:"));
        clauses.extend(or_group(&self.to_users, "to:"));
        clauses.extend(or_group(&self.mentions, "@"));
        clauses.extend(or_group(&self.hashtags, "#"));

        for (operator, threshold) in [
            ("min_replies", self.min_replies),
            ("min_faves", self.min_likes),
            ("min_retweets", self.min_retweets),
        ] {
            if let Some(n) = threshold.filter(|n| *n > 0) {
                clauses.push(format!("{}:{}", operator, n));
            }
        }

        if let Some(lang) = self.language.as_deref().filter(|v| !v.is_empty()) {
            clauses.push(format!("lang:{}", lang));
        }
        if let Some(start) = &self.start_date {
            clauses.push(format!("since:{}", format_search_date(start)));
        }
        if let Some(end) = &self.end_date {
            clauses.push(format!("until:{}", format_search_date(end)));
        }
        for (operator, value) in [
            ("since_id", self.since_id.as_deref()),
            ("max_id", self.max_id.as_deref()),
            ("quoted_tweet_id", self.quoted.as_deref()),
        ] {
            if let Some(v) = value.filter(|v| !v.is_empty()) {
                clauses.push(format!("{}:{}", operator, v));
            }
        }

        if !self.links {
            clauses.push("-filter:links".to_string());
        }
        if !self.replies {
            clauses.push("-filter:replies".to_string());
        }

        clauses.join(" ")
    }

    /// True when the filter would produce an empty query.
    pub fn is_empty(&self) -> bool {
        self.to_query().is_empty()
    }

    /// Checks that the id bounds are numeric.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: If every id field is absent or numeric
    /// - `Err(Error::Validation)`: Naming the first offending field
    pub fn validate(&self) -> Result<()> {
        let numeric = Regex::new(r"^\d+$").map_err(|e| Error::Validation(e.to_string()))?;
        for (field, value) in [
            ("sinceId", &self.since_id),
            ("maxId", &self.max_id),
            ("quoted", &self.quoted),
        ] {
            if let Some(v) = value {
                if !numeric.is_match(v) {
                    return Err(Error::Validation(format!(
                        "filter.{} must be a numeric tweet id, got '{}'",
                        field, v
                    )));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for TweetFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query())
    }
}

/// Formats a date the way the search `since:`/`until:` operators expect,
/// e.g. `2023-06-23_11:21:06_UTC`.
pub fn format_search_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d_%H:%M:%S_UTC").to_string()
}

/// Trimmed, non-empty terms with a leading `strip` marker removed.
fn non_empty<'a>(items: &'a [String], strip: &str) -> Vec<&'a str> {
    items
        .iter()
        .map(|item| item.trim())
        .map(|item| if strip.is_empty() { item } else { item.trim_start_matches(strip) })
        .filter(|item| !item.is_empty())
        .collect()
}

/// `(a OR b OR c)` with `prefix` on every term, or nothing for an empty list.
fn or_group(items: &[String], prefix: &str) -> Option<String> {
    let strip = match prefix {
        "#" | "@" => prefix,
        "from:" | "to:" => "@",
        _ => "",
    };
    let terms = non_empty(items, strip);
    if terms.is_empty() {
        return None;
    }
    Some(format!(
        "({})",
        terms
            .iter()
            .map(|term| format!("{}{}", prefix, term))
            .collect::<Vec<_>>()
            .join(" OR ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(raw: &str) -> DateTime<Utc> {
        raw.parse().unwrap()
    }

    #[test]
    fn test_format_search_date() {
        assert_eq!(
            format_search_date(&utc("2023-06-23T11:21:06.000Z")),
            "2023-06-23_11:21:06_UTC"
        );
        // Offsets are normalized to UTC before formatting.
        assert_eq!(
            format_search_date(&utc("2023-06-23T13:21:06.999+02:00")),
            "2023-06-23_11:21:06_UTC"
        );
    }

    #[test]
    fn test_users_hashtags_and_threshold() {
        let filter = TweetFilter {
            from_users: vec!["alice".to_string()],
            hashtags: vec!["news".to_string()],
            min_likes: Some(10),
            ..Default::default()
        };
        assert_eq!(filter.to_query(), "(from:alice) (#news) min_faves:10");
    }

    #[test]
    fn test_full_clause_order() {
        let filter = TweetFilter {
            include_words: vec!["rust".to_string(), "async".to_string()],
            include_phrase: Some("zero cost".to_string()),
            optional_words: vec!["tokio".to_string(), "smol".to_string()],
            exclude_words: vec!["java".to_string(), "go".to_string()],
            hashtags: vec!["rustlang".to_string()],
            from_users: vec!["a".to_string(), "b".to_string()],
            to_users: vec!["c".to_string()],
            mentions: vec!["d".to_string()],
            min_replies: Some(1),
            min_likes: Some(2),
            min_retweets: Some(3),
            language: Some("en".to_string()),
            start_date: Some(utc("2023-01-01T00:00:00Z")),
            end_date: Some(utc("2023-02-01T12:30:00Z")),
            since_id: Some("100".to_string()),
            max_id: Some("200".to_string()),
            quoted: Some("300".to_string()),
            links: false,
            replies: false,
        };
        assert_eq!(
            filter.to_query(),
            "rust async \"zero cost\" (tokio OR smol) -java -go (from:a OR from:b) (to:c) (@d) \
             (#rustlang) min_replies:1 min_faves:2 min_retweets:3 lang:en \
             since:2023-01-01_00:00:00_UTC until:2023-02-01_12:30:00_UTC \
             since_id:100 max_id:200 quoted_tweet_id:300 -filter:links -filter:replies"
        );
    }

    #[test]
    fn test_empty_clauses_are_omitted() {
        let filter = TweetFilter {
            hashtags: vec![],
            optional_words: vec!["  ".to_string()],
            include_phrase: Some(String::new()),
            min_likes: Some(0),
            language: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(filter.to_query(), "");
        assert!(filter.is_empty());
        assert!(!filter.to_query().contains("()"));
    }

    #[test]
    fn test_toggles_default_to_included() {
        let filter: TweetFilter = serde_json::from_str(r#"{"includeWords": ["hi"]}"#).unwrap();
        assert!(filter.links);
        assert!(filter.replies);
        assert_eq!(filter.to_query(), "hi");

        let filter: TweetFilter =
            serde_json::from_str(r#"{"includeWords": ["hi"], "replies": false}"#).unwrap();
        assert_eq!(filter.to_query(), "hi -filter:replies");
    }

    #[test]
    fn test_leading_markers_are_stripped() {
        let filter = TweetFilter {
            hashtags: vec!["#news".to_string()],
            mentions: vec!["@bob".to_string()],
            from_users: vec!["@alice".to_string()],
            ..Default::default()
        };
        assert_eq!(filter.to_query(), "(from:alice) (@bob) (#news)");
    }

    #[test]
    fn test_serialization_is_independent_of_construction_order() {
        let mut first = TweetFilter::default();
        first.min_likes = Some(5);
        first.hashtags = vec!["x".to_string()];
        first.from_users = vec!["y".to_string()];

        let mut second = TweetFilter::default();
        second.from_users = vec!["y".to_string()];
        second.hashtags = vec!["x".to_string()];
        second.min_likes = Some(5);

        assert_eq!(first.to_query(), second.to_query());
        assert_eq!(first.to_query(), first.to_query());
        assert_eq!(first.to_string(), "(from:y) (#x) min_faves:5");
    }

    #[test]
    fn test_dates_deserialize_from_json() {
        let filter: TweetFilter =
            serde_json::from_str(r#"{"startDate": "2023-06-23T11:21:06.000Z"}"#).unwrap();
        assert_eq!(filter.to_query(), "since:2023-06-23_11:21:06_UTC");
    }

    #[test]
    fn test_validate_rejects_non_numeric_ids() {
        let filter = TweetFilter {
            max_id: Some("abc".to_string()),
            ..Default::default()
        };
        assert!(matches!(filter.validate(), Err(Error::Validation(_))));
        let filter = TweetFilter {
            since_id: Some("123".to_string()),
            ..Default::default()
        };
        assert!(filter.validate().is_ok());
    }
}

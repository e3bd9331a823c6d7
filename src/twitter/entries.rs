//! Classification of timeline entries by their `entryId` tag.
//!
//! Every paginated payload is a list of entries whose `entryId` encodes what
//! the entry holds (`tweet-…`, `user-…`, `cursor-bottom-…`,
//! `conversationthread-…`, `homeConversation-…`). The tag vocabulary is
//! neither stable nor exhaustive, so matching is by substring against an
//! ordered rule table and anything unrecognized is classified as unrelated.

/// What a content entry carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// A single tweet under `content.itemContent.tweet_results`.
    Tweet,
    /// A single user under `content.itemContent.user_results`.
    User,
    /// A module grouping several tweets under `content.items`
    /// (retweet/conversation context on timelines, reply threads).
    Conversation,
}

/// Classification of a raw entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryClass {
    Content(ContentKind),
    /// A bottom cursor marker.
    Cursor,
    Unrelated,
}

/// Ordered `(substring, class)` rules; the first matching rule wins.
///
/// Cursor rules come first so that marker ids never fall through to a
/// content rule, and top/show-more cursors are explicitly ignored. The
/// related-tweets module of a tweet detail page also contains `tweet`, so it
/// is ruled out before the tweet rule.
pub const ENTRY_RULES: &[(&str, EntryClass)] = &[
    ("cursor-bottom", EntryClass::Cursor),
    ("cursor-", EntryClass::Unrelated),
    ("tweetdetailrelatedtweets", EntryClass::Unrelated),
    ("homeConversation", EntryClass::Content(ContentKind::Conversation)),
    ("profile-conversation", EntryClass::Content(ContentKind::Conversation)),
    ("conversationthread", EntryClass::Content(ContentKind::Conversation)),
    ("tweet", EntryClass::Content(ContentKind::Tweet)),
    ("user", EntryClass::Content(ContentKind::User)),
];

/// Classifies an entry id against [`ENTRY_RULES`].
pub fn classify(entry_id: &str) -> EntryClass {
    ENTRY_RULES
        .iter()
        .find(|(pattern, _)| entry_id.contains(pattern))
        .map(|(_, class)| *class)
        .unwrap_or(EntryClass::Unrelated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_tags() {
        assert_eq!(
            classify("tweet-1672224839010414592"),
            EntryClass::Content(ContentKind::Tweet)
        );
        assert_eq!(
            classify("user-44196397"),
            EntryClass::Content(ContentKind::User)
        );
        assert_eq!(
            classify("homeConversation-1672-1673"),
            EntryClass::Content(ContentKind::Conversation)
        );
        assert_eq!(
            classify("conversationthread-1672224839010414593"),
            EntryClass::Content(ContentKind::Conversation)
        );
        assert_eq!(classify("cursor-bottom-0"), EntryClass::Cursor);
    }

    #[test]
    fn test_other_cursors_are_unrelated() {
        assert_eq!(classify("cursor-top-1672224839010414592"), EntryClass::Unrelated);
        assert_eq!(classify("cursor-showmorethreads-123"), EntryClass::Unrelated);
    }

    #[test]
    fn test_unknown_tags_are_unrelated() {
        assert_eq!(classify("who-to-follow-1672"), EntryClass::Unrelated);
        assert_eq!(classify("promotedTweet-99"), EntryClass::Unrelated);
        assert_eq!(classify(""), EntryClass::Unrelated);
    }

    #[test]
    fn test_related_tweets_module_is_unrelated() {
        assert_eq!(classify("tweetdetailrelatedtweets-100"), EntryClass::Unrelated);
        assert_eq!(
            classify("tweetdetailrelatedtweets-100-tweet-555"),
            EntryClass::Unrelated
        );
    }

    #[test]
    fn test_module_item_remainders() {
        assert_eq!(classify("-tweet-201"), EntryClass::Content(ContentKind::Tweet));
        assert_eq!(classify("-cursor-showmore-9"), EntryClass::Unrelated);
        assert_eq!(classify("-tombstone"), EntryClass::Unrelated);
    }
}

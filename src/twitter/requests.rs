//! Request URL builders.
//!
//! Maps a resource type and its [`FetchArgs`] to a fully-formed upstream URL.
//! GraphQL operations are addressed by a query id that the web client ships
//! and rotates; the ids below are the ones the response fixtures were
//! captured against.

use serde_json::{json, Value};
use url::Url;

use crate::error::{Error, Result};
use crate::models::{Cursor, FetchArgs, ResourceType};

/// A persisted GraphQL query of the web client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphQlOperation {
    pub query_id: &'static str,
    pub name: &'static str,
}

pub const USER_BY_SCREEN_NAME: GraphQlOperation = GraphQlOperation {
    query_id: "G3KGOASz96M-Qu0nwmGXNg",
    name: "UserByScreenName",
};
pub const USER_BY_REST_ID: GraphQlOperation = GraphQlOperation {
    query_id: "QdS5LJDl99iL_KUzckdfNQ",
    name: "UserByRestId",
};
pub const USER_TWEETS: GraphQlOperation = GraphQlOperation {
    query_id: "V1ze5q3ijDS1VeLwLY0m7g",
    name: "UserTweets",
};
pub const LIKES: GraphQlOperation = GraphQlOperation {
    query_id: "eSSNbhECHHWWALkkQq-YTA",
    name: "Likes",
};
pub const FOLLOWERS: GraphQlOperation = GraphQlOperation {
    query_id: "rRXFSG5vR6drKr5M37YOTw",
    name: "Followers",
};
pub const FOLLOWING: GraphQlOperation = GraphQlOperation {
    query_id: "iSicc7LrzWGBgDPL0tM_TQ",
    name: "Following",
};
pub const TWEET_DETAIL: GraphQlOperation = GraphQlOperation {
    query_id: "3XDB26fBve-MmjHaWTUZxA",
    name: "TweetDetail",
};
pub const FAVORITERS: GraphQlOperation = GraphQlOperation {
    query_id: "LLkw5EcVutJL6y-2gkz22A",
    name: "Favoriters",
};
pub const RETWEETERS: GraphQlOperation = GraphQlOperation {
    query_id: "X-XEqG5qHQSAwmvy00xfyQ",
    name: "Retweeters",
};

const SEARCH_PATH: &str = "2/search/adaptive.json";
const GUIDE_PATH: &str = "2/guide.json";

/// Feature switches the GraphQL endpoints refuse to run without.
fn features() -> Value {
    json!({
        "responsive_web_graphql_exclude_directive_enabled": true,
        "verified_phone_label_enabled": false,
        "responsive_web_graphql_timeline_navigation_enabled": true,
        "responsive_web_graphql_skip_user_profile_image_extensions_enabled": false,
        "tweetypie_unmention_optimization_enabled": true,
        "view_counts_everywhere_api_enabled": true,
        "longform_notetweets_consumption_enabled": true,
        "responsive_web_twitter_article_tweet_consumption_enabled": false,
        "tweet_awards_web_tipping_enabled": false,
        "freedom_of_speech_not_reach_fetch_enabled": true,
        "standardized_nudges_misinfo": true,
        "longform_notetweets_rich_text_read_enabled": true,
        "longform_notetweets_inline_media_enabled": true,
        "responsive_web_enhance_cards_enabled": false
    })
}

fn parse_with_params(base: &str, path: &str, params: &[(&str, String)]) -> Result<String> {
    let url = Url::parse_with_params(&format!("{}/{}", base, path), params)
        .map_err(|e| Error::Config(format!("invalid API base '{}': {}", base, e)))?;
    Ok(url.to_string())
}

fn graphql(
    base: &str,
    operation: GraphQlOperation,
    mut variables: Value,
    cursor: Option<&Cursor>,
) -> Result<String> {
    if let (Some(cursor), Some(map)) = (cursor, variables.as_object_mut()) {
        map.insert("cursor".to_string(), Value::String(cursor.decoded()));
    }
    parse_with_params(
        base,
        &format!("graphql/{}/{}", operation.query_id, operation.name),
        &[
            ("variables", variables.to_string()),
            ("features", features().to_string()),
        ],
    )
}

/// Builds the upstream URL for `resource`.
///
/// # Parameters
///
/// - `base`: The API base URL, without a trailing slash
/// - `resource`: The resource to fetch
/// - `args`: Arguments already validated for `resource`
///
/// # Returns
///
/// - `Ok(String)`: The URL to fetch
/// - `Err(Error::Validation)`: If a required id or filter is missing
/// - `Err(Error::Config)`: If `base` is not a valid URL
pub fn request_url(base: &str, resource: ResourceType, args: &FetchArgs) -> Result<String> {
    let cursor = args.cursor.as_ref();
    let count = args.count;

    match resource {
        ResourceType::UserDetailsByUsername => graphql(
            base,
            USER_BY_SCREEN_NAME,
            json!({"screen_name": args.require_id()?, "withSafetyModeUserFields": true}),
            None,
        ),
        ResourceType::UserDetailsById => graphql(
            base,
            USER_BY_REST_ID,
            json!({"userId": args.require_id()?, "withSafetyModeUserFields": true}),
            None,
        ),
        ResourceType::UserTweets => graphql(
            base,
            USER_TWEETS,
            json!({
                "userId": args.require_id()?,
                "count": count,
                "includePromotedContent": false,
                "withQuickPromoteEligibilityTweetFields": false,
                "withVoice": true,
                "withV2Timeline": true
            }),
            cursor,
        ),
        ResourceType::UserLikes => graphql(
            base,
            LIKES,
            json!({
                "userId": args.require_id()?,
                "count": count,
                "includePromotedContent": false,
                "withClientEventToken": false,
                "withBirdwatchNotes": false,
                "withVoice": true,
                "withV2Timeline": true
            }),
            cursor,
        ),
        ResourceType::UserFollowers | ResourceType::UserFollowing => graphql(
            base,
            if resource == ResourceType::UserFollowers {
                FOLLOWERS
            } else {
                FOLLOWING
            },
            json!({
                "userId": args.require_id()?,
                "count": count,
                "includePromotedContent": false
            }),
            cursor,
        ),
        ResourceType::TweetDetails | ResourceType::TweetReplies => graphql(
            base,
            TWEET_DETAIL,
            json!({
                "focalTweetId": args.require_id()?,
                "with_rux_injections": false,
                "includePromotedContent": false,
                "withCommunity": true,
                "withQuickPromoteEligibilityTweetFields": false,
                "withBirdwatchNotes": false,
                "withVoice": true,
                "withV2Timeline": true
            }),
            if resource == ResourceType::TweetReplies {
                cursor
            } else {
                None
            },
        ),
        ResourceType::TweetFavoriters | ResourceType::TweetRetweeters => graphql(
            base,
            if resource == ResourceType::TweetFavoriters {
                FAVORITERS
            } else {
                RETWEETERS
            },
            json!({
                "tweetId": args.require_id()?,
                "count": count,
                "includePromotedContent": true
            }),
            cursor,
        ),
        ResourceType::TweetSearch => {
            let filter = args
                .filter
                .as_ref()
                .ok_or_else(|| Error::Validation("a filter is required for search".to_string()))?;
            let mut params = vec![
                ("q", filter.to_query()),
                ("count", count.to_string()),
                ("tweet_search_mode", "live".to_string()),
                ("query_source", "typed_query".to_string()),
                ("tweet_mode", "extended".to_string()),
                ("include_quote_count", "true".to_string()),
                ("include_reply_count", "1".to_string()),
            ];
            if let Some(cursor) = cursor {
                params.push(("cursor", cursor.decoded()));
            }
            parse_with_params(base, SEARCH_PATH, &params)
        }
        ResourceType::Trending => parse_with_params(
            base,
            GUIDE_PATH,
            &[
                ("initial_tab_id", "trending".to_string()),
                ("include_page_configuration", "false".to_string()),
                ("entity_tokens", "false".to_string()),
                ("tweet_mode", "extended".to_string()),
            ],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TweetFilter;

    const BASE: &str = "https://twitter.com/i/api";

    fn variables_of(url: &str) -> Value {
        let parsed = Url::parse(url).unwrap();
        let (_, raw) = parsed
            .query_pairs()
            .find(|(key, _)| key == "variables")
            .unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn test_followers_url_carries_decoded_cursor() {
        let args = FetchArgs::for_id("44196397")
            .with_count(50)
            .with_cursor(Some(Cursor::new("1767|1590")));
        let url = request_url(BASE, ResourceType::UserFollowers, &args).unwrap();

        assert!(url.starts_with("https://twitter.com/i/api/graphql/rRXFSG5vR6drKr5M37YOTw/Followers?"));
        let variables = variables_of(&url);
        assert_eq!(variables["userId"], "44196397");
        assert_eq!(variables["count"], 50);
        assert_eq!(variables["cursor"], "1767|1590");
    }

    #[test]
    fn test_tweet_details_ignores_cursor() {
        let args = FetchArgs::for_id("1").with_cursor(Some(Cursor::new("c")));
        let details = request_url(BASE, ResourceType::TweetDetails, &args).unwrap();
        let replies = request_url(BASE, ResourceType::TweetReplies, &args).unwrap();
        assert!(variables_of(&details).get("cursor").is_none());
        assert_eq!(variables_of(&replies)["cursor"], "c");
    }

    #[test]
    fn test_search_url() {
        let mut args = FetchArgs::default();
        args.filter = Some(TweetFilter {
            from_users: vec!["alice".to_string()],
            hashtags: vec!["news".to_string()],
            ..Default::default()
        });
        let url = request_url(BASE, ResourceType::TweetSearch, &args).unwrap();
        let parsed = Url::parse(&url).unwrap();
        assert_eq!(parsed.path(), "/i/api/2/search/adaptive.json");
        let q = parsed.query_pairs().find(|(k, _)| k == "q").unwrap().1;
        assert_eq!(q, "(from:alice) (#news)");
        assert!(parsed.query_pairs().all(|(k, _)| k != "cursor"));
    }

    #[test]
    fn test_search_without_filter_is_rejected() {
        let err = request_url(BASE, ResourceType::TweetSearch, &FetchArgs::default()).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_invalid_base() {
        let err = request_url("not a url", ResourceType::Trending, &FetchArgs::default()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}

//! High-level fetch-and-extract entry points.
//!
//! A [`Scraper`] validates the caller's arguments, builds the request URL,
//! fetches the raw payload through its [`Fetcher`] and hands it to the
//! matching extractor.

use log::{debug, info};
use serde_json::Value;
use std::sync::Arc;

use crate::config::TwitterConfig;
use crate::error::Result;
use crate::models::{Cursor, ExtractionResult, FetchArgs, ResourceType, Tweet, TweetFilter, User};
use crate::twitter::{
    extract_search_tweets, extract_trending, extract_tweet_details, extract_tweet_likers,
    extract_tweet_replies, extract_tweet_retweeters, extract_user_details,
    extract_user_followers, extract_user_following, extract_user_likes, extract_user_tweets,
    request_url, Fetcher, HttpFetcher,
};

/// Fetches and extracts Twitter resources.
#[derive(Clone)]
pub struct Scraper {
    fetcher: Arc<dyn Fetcher>,
    api_base: String,
}

impl Scraper {
    /// Creates a scraper on top of any [`Fetcher`].
    ///
    /// # Parameters
    ///
    /// - `fetcher`: Source of raw payloads
    /// - `api_base`: Base URL request paths are appended to
    pub fn new(fetcher: Arc<dyn Fetcher>, api_base: impl Into<String>) -> Self {
        Scraper {
            fetcher,
            api_base: api_base.into(),
        }
    }

    /// Creates a scraper that talks to the live web API with the session in `config`.
    pub fn from_config(config: TwitterConfig) -> Self {
        let api_base = config.api_base.clone();
        Scraper::new(Arc::new(HttpFetcher::new(config)), api_base)
    }

    async fn fetch_raw(&self, resource: ResourceType, args: &FetchArgs) -> Result<Value> {
        args.validate(resource)?;
        let url = request_url(&self.api_base, resource, args)?;
        debug!(
            "Fetching {:?} (id: {:?}, count: {}, cursor: {})",
            resource,
            args.id,
            args.count,
            args.cursor.as_ref().map(Cursor::as_str).unwrap_or("-")
        );
        self.fetcher.fetch(&url).await
    }

    /// Fetches the account with the given username.
    pub async fn user_details_by_username(&self, username: &str) -> Result<User> {
        let args = FetchArgs::for_id(username);
        let raw = self
            .fetch_raw(ResourceType::UserDetailsByUsername, &args)
            .await?;
        let user = extract_user_details(&raw, username)?;
        info!("Fetched details of @{} ({})", username, user.id);
        Ok(user)
    }

    /// Fetches the account with the given rest id.
    pub async fn user_details_by_id(&self, user_id: &str) -> Result<User> {
        let args = FetchArgs::for_id(user_id);
        let raw = self.fetch_raw(ResourceType::UserDetailsById, &args).await?;
        extract_user_details(&raw, user_id)
    }

    /// Fetches one page of a user's tweets.
    ///
    /// # Parameters
    ///
    /// - `args`: `id` is the user's rest id; `cursor` is the `next` of a previous page
    ///
    /// # Returns
    ///
    /// - `Ok(ExtractionResult<Tweet>)`: The page
    /// - `Err(Error::UserNotFound)`: If the account does not exist
    /// - `Err(Error::Validation)`: If `args` are not acceptable for this resource
    pub async fn user_tweets(&self, args: &FetchArgs) -> Result<ExtractionResult<Tweet>> {
        let raw = self.fetch_raw(ResourceType::UserTweets, args).await?;
        let page = extract_user_tweets(&raw, args.require_id()?)?;
        info!("Extracted {} tweets", page.len());
        Ok(page)
    }

    /// Fetches one page of the tweets a user has liked.
    pub async fn user_likes(&self, args: &FetchArgs) -> Result<ExtractionResult<Tweet>> {
        let raw = self.fetch_raw(ResourceType::UserLikes, args).await?;
        extract_user_likes(&raw, args.require_id()?)
    }

    /// Fetches one page of a user's followers.
    pub async fn user_followers(&self, args: &FetchArgs) -> Result<ExtractionResult<User>> {
        let raw = self.fetch_raw(ResourceType::UserFollowers, args).await?;
        let page = extract_user_followers(&raw, args.require_id()?)?;
        info!("Extracted {} followers", page.len());
        Ok(page)
    }

    /// Fetches one page of the accounts a user follows.
    pub async fn user_following(&self, args: &FetchArgs) -> Result<ExtractionResult<User>> {
        let raw = self.fetch_raw(ResourceType::UserFollowing, args).await?;
        extract_user_following(&raw, args.require_id()?)
    }

    /// Fetches a single tweet.
    pub async fn tweet_details(&self, tweet_id: &str) -> Result<Tweet> {
        let args = FetchArgs::for_id(tweet_id);
        let raw = self.fetch_raw(ResourceType::TweetDetails, &args).await?;
        extract_tweet_details(&raw, tweet_id)
    }

    /// Fetches one page of direct replies to a tweet.
    pub async fn tweet_replies(&self, args: &FetchArgs) -> Result<ExtractionResult<Tweet>> {
        let raw = self.fetch_raw(ResourceType::TweetReplies, args).await?;
        let page = extract_tweet_replies(&raw, args.require_id()?)?;
        info!("Extracted {} replies", page.len());
        Ok(page)
    }

    /// Fetches one page of the users who liked a tweet.
    pub async fn tweet_likers(&self, args: &FetchArgs) -> Result<ExtractionResult<User>> {
        let raw = self.fetch_raw(ResourceType::TweetFavoriters, args).await?;
        extract_tweet_likers(&raw, args.require_id()?)
    }

    /// Fetches one page of the users who retweeted a tweet.
    pub async fn tweet_retweeters(&self, args: &FetchArgs) -> Result<ExtractionResult<User>> {
        let raw = self.fetch_raw(ResourceType::TweetRetweeters, args).await?;
        extract_tweet_retweeters(&raw, args.require_id()?)
    }

    /// Fetches one page of tweets matching `args.filter`.
    pub async fn search(&self, args: &FetchArgs) -> Result<ExtractionResult<Tweet>> {
        let raw = self.fetch_raw(ResourceType::TweetSearch, args).await?;
        let page = extract_search_tweets(&raw)?;
        info!(
            "Search '{}' returned {} tweets",
            args.filter
                .as_ref()
                .map(TweetFilter::to_query)
                .unwrap_or_default(),
            page.len()
        );
        Ok(page)
    }

    /// Fetches the names of the currently trending topics.
    pub async fn trending(&self) -> Result<ExtractionResult<String>> {
        let raw = self
            .fetch_raw(ResourceType::Trending, &FetchArgs::default())
            .await?;
        extract_trending(&raw)
    }
}

//! HTTP route handlers for the twextract service.
//!
//! This module exposes every extraction as a JSON endpoint. Paginated
//! resources take `count` and `cursor` query parameters and answer with
//! `{"items": [...], "next": "<cursor>" | null}`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use log::{error, info, warn};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::Error;
use crate::models::{Cursor, ExtractionResult, FetchArgs, Tweet, User, DEFAULT_COUNT};
use crate::scraper::Scraper;

type HandlerResult<T> = Result<Json<T>, (StatusCode, Json<Value>)>;

/// Query parameters of paginated endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Items per page; defaults to 20.
    pub count: Option<u32>,
    /// The `next` cursor of the previous page.
    pub cursor: Option<String>,
}

impl PageQuery {
    fn into_args(self, id: String) -> FetchArgs {
        FetchArgs::for_id(id)
            .with_count(self.count.unwrap_or(DEFAULT_COUNT))
            .with_cursor(self.cursor.as_deref().map(Cursor::new))
    }
}

/// Maps an extraction error to its HTTP response.
///
/// # Error Response
///
/// ```json
/// {
///   "status": "error",
///   "code": "USER_NOT_FOUND",
///   "message": "User not found: 12"
/// }
/// ```
fn error_response(e: Error) -> (StatusCode, Json<Value>) {
    match &e {
        Error::UserNotFound(_) | Error::TweetNotFound(_) | Error::Validation(_) => {
            info!("Request rejected: {}", e)
        }
        Error::UnexpectedShape { .. } => {
            error!("Upstream response no longer matches the expected shape: {}", e)
        }
        Error::Transport(_) | Error::Config(_) => warn!("Request failed: {}", e),
    }
    (
        e.status_code(),
        Json(json!({"status": "error", "code": e.error_code(), "message": e.to_string()})),
    )
}

/// Handles GET requests to the `/health` endpoint.
///
/// # Example Response
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "twextract"
/// }
/// ```
pub async fn handle_health() -> Json<Value> {
    Json(json!({"status": "healthy", "service": "twextract"}))
}

/// Handles `GET /handles/:handle`: account details by username.
pub async fn handle_user_by_handle(
    State(scraper): State<Arc<Scraper>>,
    Path(handle): Path<String>,
) -> HandlerResult<User> {
    scraper
        .user_details_by_username(&handle)
        .await
        .map(Json)
        .map_err(error_response)
}

/// Handles `GET /users/:id`: account details by rest id.
pub async fn handle_user_by_id(
    State(scraper): State<Arc<Scraper>>,
    Path(id): Path<String>,
) -> HandlerResult<User> {
    scraper
        .user_details_by_id(&id)
        .await
        .map(Json)
        .map_err(error_response)
}

/// Handles `GET /users/:id/tweets`.
pub async fn handle_user_tweets(
    State(scraper): State<Arc<Scraper>>,
    Path(id): Path<String>,
    Query(page): Query<PageQuery>,
) -> HandlerResult<ExtractionResult<Tweet>> {
    scraper
        .user_tweets(&page.into_args(id))
        .await
        .map(Json)
        .map_err(error_response)
}

/// Handles `GET /users/:id/likes`.
pub async fn handle_user_likes(
    State(scraper): State<Arc<Scraper>>,
    Path(id): Path<String>,
    Query(page): Query<PageQuery>,
) -> HandlerResult<ExtractionResult<Tweet>> {
    scraper
        .user_likes(&page.into_args(id))
        .await
        .map(Json)
        .map_err(error_response)
}

/// Handles `GET /users/:id/followers`.
pub async fn handle_user_followers(
    State(scraper): State<Arc<Scraper>>,
    Path(id): Path<String>,
    Query(page): Query<PageQuery>,
) -> HandlerResult<ExtractionResult<User>> {
    scraper
        .user_followers(&page.into_args(id))
        .await
        .map(Json)
        .map_err(error_response)
}

/// Handles `GET /users/:id/following`.
pub async fn handle_user_following(
    State(scraper): State<Arc<Scraper>>,
    Path(id): Path<String>,
    Query(page): Query<PageQuery>,
) -> HandlerResult<ExtractionResult<User>> {
    scraper
        .user_following(&page.into_args(id))
        .await
        .map(Json)
        .map_err(error_response)
}

/// Handles `GET /tweets/:id`.
pub async fn handle_tweet_details(
    State(scraper): State<Arc<Scraper>>,
    Path(id): Path<String>,
) -> HandlerResult<Tweet> {
    scraper
        .tweet_details(&id)
        .await
        .map(Json)
        .map_err(error_response)
}

/// Handles `GET /tweets/:id/replies`.
pub async fn handle_tweet_replies(
    State(scraper): State<Arc<Scraper>>,
    Path(id): Path<String>,
    Query(page): Query<PageQuery>,
) -> HandlerResult<ExtractionResult<Tweet>> {
    scraper
        .tweet_replies(&page.into_args(id))
        .await
        .map(Json)
        .map_err(error_response)
}

/// Handles `GET /tweets/:id/likers`.
pub async fn handle_tweet_likers(
    State(scraper): State<Arc<Scraper>>,
    Path(id): Path<String>,
    Query(page): Query<PageQuery>,
) -> HandlerResult<ExtractionResult<User>> {
    scraper
        .tweet_likers(&page.into_args(id))
        .await
        .map(Json)
        .map_err(error_response)
}

/// Handles `GET /tweets/:id/retweeters`.
pub async fn handle_tweet_retweeters(
    State(scraper): State<Arc<Scraper>>,
    Path(id): Path<String>,
    Query(page): Query<PageQuery>,
) -> HandlerResult<ExtractionResult<User>> {
    scraper
        .tweet_retweeters(&page.into_args(id))
        .await
        .map(Json)
        .map_err(error_response)
}

/// Handles `POST /search`.
///
/// The body is a [`FetchArgs`] object without `id`:
///
/// ```json
/// {
///   "count": 20,
///   "cursor": null,
///   "filter": {"fromUsers": ["alice"], "hashtags": ["news"], "minLikes": 10}
/// }
/// ```
pub async fn handle_search(
    State(scraper): State<Arc<Scraper>>,
    Json(args): Json<FetchArgs>,
) -> HandlerResult<ExtractionResult<Tweet>> {
    scraper.search(&args).await.map(Json).map_err(error_response)
}

/// Handles `GET /trending`.
pub async fn handle_trending(
    State(scraper): State<Arc<Scraper>>,
) -> HandlerResult<ExtractionResult<String>> {
    scraper.trending().await.map(Json).map_err(error_response)
}

/// Builds the application router with every endpoint.
pub fn router(scraper: Arc<Scraper>) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/handles/:handle", get(handle_user_by_handle))
        .route("/users/:id", get(handle_user_by_id))
        .route("/users/:id/tweets", get(handle_user_tweets))
        .route("/users/:id/likes", get(handle_user_likes))
        .route("/users/:id/followers", get(handle_user_followers))
        .route("/users/:id/following", get(handle_user_following))
        .route("/tweets/:id", get(handle_tweet_details))
        .route("/tweets/:id/replies", get(handle_tweet_replies))
        .route("/tweets/:id/likers", get(handle_tweet_likers))
        .route("/tweets/:id/retweeters", get(handle_tweet_retweeters))
        .route("/search", post(handle_search))
        .route("/trending", get(handle_trending))
        .with_state(scraper)
}

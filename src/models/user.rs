//! User account details.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::twitter::raw::{bool_at, date_at, str_at, u64_at};

/// A user account as reported by the Twitter web API.
///
/// Everything except `id` is optional: fields missing from the raw payload
/// become `None` or zero instead of failing the whole page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: String,
    pub user_name: Option<String>,
    pub full_name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub followers_count: u64,
    pub following_count: u64,
    pub statuses_count: u64,
    pub favourites_count: u64,
    pub is_verified: bool,
    pub profile_image: Option<String>,
}

impl User {
    /// Builds a user from a raw `user_results.result` node or a flat legacy
    /// user object.
    ///
    /// # Returns
    ///
    /// - `Some(User)`: When a `rest_id` (or legacy `id_str`) is present
    /// - `None`: When the node carries no identifier
    pub fn from_raw(raw: &Value) -> Option<User> {
        let legacy = raw.get("legacy").unwrap_or(raw);
        let id = str_at(raw, "/rest_id").or_else(|| str_at(legacy, "/id_str"))?;

        Some(User {
            id,
            user_name: str_at(legacy, "/screen_name"),
            full_name: str_at(legacy, "/name"),
            description: str_at(legacy, "/description"),
            location: str_at(legacy, "/location"),
            created_at: date_at(legacy, "/created_at"),
            followers_count: u64_at(legacy, "/followers_count").unwrap_or(0),
            following_count: u64_at(legacy, "/friends_count").unwrap_or(0),
            statuses_count: u64_at(legacy, "/statuses_count").unwrap_or(0),
            favourites_count: u64_at(legacy, "/favourites_count").unwrap_or(0),
            is_verified: bool_at(raw, "/is_blue_verified")
                .or_else(|| bool_at(legacy, "/verified"))
                .unwrap_or(false),
            profile_image: str_at(legacy, "/profile_image_url_https"),
        })
    }
}

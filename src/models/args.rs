//! Fetch arguments and their per-resource validation rules.

use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::cursor::Cursor;
use super::filter::TweetFilter;
use crate::error::{Error, Result};

/// Number of items requested when the caller does not say.
pub const DEFAULT_COUNT: u32 = 20;

/// The kind of resource a fetch targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceType {
    UserDetailsByUsername,
    UserDetailsById,
    UserTweets,
    UserLikes,
    UserFollowers,
    UserFollowing,
    TweetDetails,
    TweetReplies,
    TweetFavoriters,
    TweetRetweeters,
    TweetSearch,
    Trending,
}

/// What a resource type demands of its [`FetchArgs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceRules {
    pub id_required: bool,
    /// Whether the id must be a numeric rest id (usernames are alphanumeric).
    pub id_numeric: bool,
    /// Upper bound on `count`; `None` for non-cursored resources.
    pub max_count: Option<u32>,
    pub filter_required: bool,
}

impl ResourceType {
    /// The validation rules for this resource type.
    pub const fn rules(self) -> ResourceRules {
        use ResourceType::*;
        let (id_required, id_numeric, max_count, filter_required) = match self {
            UserDetailsByUsername => (true, false, None, false),
            UserDetailsById | TweetDetails | TweetReplies => (true, true, None, false),
            UserTweets => (true, true, Some(20), false),
            UserLikes | UserFollowers | UserFollowing | TweetFavoriters | TweetRetweeters => {
                (true, true, Some(100), false)
            }
            TweetSearch => (false, false, Some(20), true),
            Trending => (false, false, None, false),
        };
        ResourceRules {
            id_required,
            id_numeric,
            max_count,
            filter_required,
        }
    }
}

/// User-supplied arguments for a single fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchArgs {
    /// Id of the target resource (a username for
    /// [`ResourceType::UserDetailsByUsername`]).
    pub id: Option<String>,
    pub count: u32,
    pub cursor: Option<Cursor>,
    pub filter: Option<TweetFilter>,
}

impl Default for FetchArgs {
    fn default() -> Self {
        FetchArgs {
            id: None,
            count: DEFAULT_COUNT,
            cursor: None,
            filter: None,
        }
    }
}

impl FetchArgs {
    /// Arguments targeting a single resource id.
    pub fn for_id(id: impl Into<String>) -> Self {
        FetchArgs {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn with_cursor(mut self, cursor: Option<Cursor>) -> Self {
        self.cursor = cursor;
        self
    }

    /// Checks these arguments against the rules of `resource`.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: If the arguments are acceptable
    /// - `Err(Error::Validation)`: Describing the first violated rule
    pub fn validate(&self, resource: ResourceType) -> Result<()> {
        let rules = resource.rules();
        debug!("Validating fetch arguments for {:?}", resource);

        match self.id.as_deref() {
            None | Some("") if rules.id_required => {
                return Err(Error::Validation(format!(
                    "an id is required for {:?}",
                    resource
                )));
            }
            Some(id) if rules.id_numeric => {
                let numeric = Regex::new(r"^\d+$").map_err(|e| Error::Validation(e.to_string()))?;
                if !numeric.is_match(id) {
                    return Err(Error::Validation(format!(
                        "id must be numeric for {:?}, got '{}'",
                        resource, id
                    )));
                }
            }
            _ => {}
        }

        if let Some(max) = rules.max_count {
            if self.count == 0 || self.count > max {
                return Err(Error::Validation(format!(
                    "count must be between 1 and {} for {:?}, got {}",
                    max, resource, self.count
                )));
            }
        }

        if rules.filter_required {
            match &self.filter {
                Some(filter) if !filter.is_empty() => filter.validate()?,
                _ => {
                    return Err(Error::Validation(format!(
                        "a non-empty filter is required for {:?}",
                        resource
                    )))
                }
            }
        }

        Ok(())
    }

    /// The target id, for resources whose rules require one.
    pub fn require_id(&self) -> Result<&str> {
        self.id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::Validation("an id is required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = FetchArgs::default();
        assert_eq!(args.count, 20);
        assert!(args.cursor.is_none());
        assert!(FetchArgs::default().validate(ResourceType::Trending).is_ok());
    }

    #[test]
    fn test_id_is_required() {
        let err = FetchArgs::default()
            .validate(ResourceType::UserFollowers)
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(FetchArgs::for_id("")
            .validate(ResourceType::TweetDetails)
            .is_err());
    }

    #[test]
    fn test_numeric_ids() {
        assert!(FetchArgs::for_id("jack")
            .validate(ResourceType::UserDetailsByUsername)
            .is_ok());
        assert!(FetchArgs::for_id("jack")
            .validate(ResourceType::UserDetailsById)
            .is_err());
        assert!(FetchArgs::for_id("12")
            .validate(ResourceType::UserDetailsById)
            .is_ok());
    }

    #[test]
    fn test_count_limits() {
        let args = FetchArgs::for_id("12").with_count(100);
        assert!(args.validate(ResourceType::UserFollowers).is_ok());
        assert!(args.validate(ResourceType::UserTweets).is_err());
        assert!(FetchArgs::for_id("12")
            .with_count(101)
            .validate(ResourceType::TweetFavoriters)
            .is_err());
        assert!(FetchArgs::for_id("12")
            .with_count(0)
            .validate(ResourceType::UserLikes)
            .is_err());
        // Non-cursored resources ignore count.
        assert!(FetchArgs::for_id("12")
            .with_count(500)
            .validate(ResourceType::TweetDetails)
            .is_ok());
    }

    #[test]
    fn test_search_requires_filter() {
        assert!(FetchArgs::default()
            .validate(ResourceType::TweetSearch)
            .is_err());

        let mut args = FetchArgs::default();
        args.filter = Some(TweetFilter::default());
        assert!(args.validate(ResourceType::TweetSearch).is_err());

        args.filter = Some(TweetFilter {
            hashtags: vec!["rust".to_string()],
            ..Default::default()
        });
        assert!(args.validate(ResourceType::TweetSearch).is_ok());
    }
}

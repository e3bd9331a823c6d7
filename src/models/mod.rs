//! Domain types produced by the extractors.

pub mod args;
pub mod cursor;
pub mod filter;
pub mod page;
pub mod tweet;
pub mod user;

pub use args::{FetchArgs, ResourceRules, ResourceType, DEFAULT_COUNT};
pub use cursor::{Cursor, CursorKind};
pub use filter::{format_search_date, TweetFilter};
pub use page::ExtractionResult;
pub use tweet::Tweet;
pub use user::User;

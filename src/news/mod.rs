//! Weather news: RSS search with an age window, local-first selection

pub mod feed;
pub mod selector;

pub use feed::{NewsFeed, NewsFeedFetcher, filter_recent, parse_feed};
pub use selector::NewsSelector;

//! News headline model

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// Source name used when a feed entry does not name its publisher
pub const DEFAULT_SOURCE_NAME: &str = "News";

/// A single headline from the news feed
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    /// Publisher name
    pub source_name: String,
    /// Publication time in the feed's own offset
    pub published_at: DateTime<FixedOffset>,
}

impl NewsItem {
    /// Age of the item relative to `now`
    #[must_use]
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now.signed_duration_since(self.published_at.with_timezone(&Utc))
    }
}

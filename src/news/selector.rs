//! Locality-first headline selection with a general fallback

use tracing::{debug, info, instrument};

use super::NewsFeed;
use crate::config::NewsConfig;
use crate::models::NewsItem;

/// Picks headlines for a city from a [`NewsFeed`].
///
/// The local query runs first with the wide window; only when it finds
/// nothing does the fixed fallback query run with the shorter window.
/// At most two fetches happen per call.
pub struct NewsSelector<F> {
    feed: F,
    settings: NewsConfig,
}

impl<F: NewsFeed> NewsSelector<F> {
    #[must_use]
    pub fn new(feed: F, settings: NewsConfig) -> Self {
        Self { feed, settings }
    }

    fn local_query(&self, city: &str) -> String {
        let prefix = self.settings.local_query_prefix.trim();
        if prefix.is_empty() {
            city.to_string()
        } else {
            format!("{prefix} {city}")
        }
    }

    /// Up to `max_items` headlines in feed order
    #[instrument(skip(self))]
    pub async fn get_news(&self, city: &str) -> Vec<NewsItem> {
        let mut news = self
            .feed
            .fetch(&self.local_query(city), self.settings.local_window_hours)
            .await;

        if news.is_empty() {
            debug!("No local news for '{}', using fallback query", city);
            news = self
                .feed
                .fetch(
                    &self.settings.fallback_query,
                    self.settings.fallback_window_hours,
                )
                .await;
        }

        news.truncate(self.settings.max_items);
        info!("Selected {} news items for '{}'", news.len(), city);
        news
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{FixedOffset, TimeZone};
    use std::sync::Mutex;

    fn item(n: usize) -> NewsItem {
        NewsItem {
            title: format!("Headline {n}"),
            link: format!("https://news.example/{n}"),
            source_name: "Ynet".to_string(),
            published_at: FixedOffset::east_opt(3 * 3600)
                .unwrap()
                .with_ymd_and_hms(2026, 10, 19, 8, 0, 0)
                .unwrap(),
        }
    }

    /// Returns `local` for queries containing "Haifa", `general` otherwise, recording every call
    struct ScriptedFeed {
        local: usize,
        general: usize,
        calls: Mutex<Vec<(String, u32)>>,
    }

    impl ScriptedFeed {
        fn new(local: usize, general: usize) -> Self {
            Self {
                local,
                general,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(String, u32)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NewsFeed for ScriptedFeed {
        async fn fetch(&self, query: &str, hours_limit: u32) -> Vec<NewsItem> {
            self.calls
                .lock()
                .unwrap()
                .push((query.to_string(), hours_limit));
            let count = if query.contains("Haifa") {
                self.local
            } else {
                self.general
            };
            (0..count).map(item).collect()
        }
    }

    #[tokio::test]
    async fn test_local_results_skip_fallback() {
        let selector = NewsSelector::new(ScriptedFeed::new(3, 5), NewsConfig::default());

        let news = selector.get_news("Haifa").await;
        assert_eq!(news.len(), 3);
        assert_eq!(selector.feed.calls(), [("weather Haifa".to_string(), 72)]);
    }

    #[tokio::test]
    async fn test_empty_local_falls_back_once() {
        let selector = NewsSelector::new(ScriptedFeed::new(0, 4), NewsConfig::default());

        let news = selector.get_news("Haifa").await;
        assert_eq!(news.len(), 4);
        assert_eq!(
            selector.feed.calls(),
            [
                ("weather Haifa".to_string(), 72),
                ("weather in Israel".to_string(), 30)
            ]
        );
    }

    #[tokio::test]
    async fn test_both_empty_makes_exactly_two_fetches() {
        let selector = NewsSelector::new(ScriptedFeed::new(0, 0), NewsConfig::default());

        assert!(selector.get_news("Haifa").await.is_empty());
        assert_eq!(selector.feed.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_results_capped_in_feed_order() {
        let selector = NewsSelector::new(ScriptedFeed::new(20, 0), NewsConfig::default());

        let news = selector.get_news("Haifa").await;
        assert_eq!(news.len(), 12);
        assert_eq!(news[0].title, "Headline 0");
        assert_eq!(news[11].title, "Headline 11");
    }

    #[tokio::test]
    async fn test_fallback_results_are_capped_too() {
        let selector = NewsSelector::new(ScriptedFeed::new(0, 30), NewsConfig::default());
        assert_eq!(selector.get_news("Haifa").await.len(), 12);
    }
}

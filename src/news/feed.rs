//! RSS search feed fetcher with a publication-age window

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quick_xml::de::from_str;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::WindError;
use crate::config::NewsConfig;
use crate::models::NewsItem;
use crate::models::news::DEFAULT_SOURCE_NAME;

/// A news source searchable by free text.
///
/// Implementations never fail: any fetch or parse problem yields an empty list.
#[async_trait]
pub trait NewsFeed: Send + Sync {
    async fn fetch(&self, query: &str, hours_limit: u32) -> Vec<NewsItem>;
}

#[async_trait]
impl<T: NewsFeed + ?Sized> NewsFeed for Box<T> {
    async fn fetch(&self, query: &str, hours_limit: u32) -> Vec<NewsItem> {
        (**self).fetch(query, hours_limit).await
    }
}

/// RSS 2.0 document
#[derive(Debug, Deserialize)]
pub struct RssDocument {
    pub channel: RssChannel,
}

#[derive(Debug, Deserialize)]
pub struct RssChannel {
    #[serde(rename = "item", default)]
    pub items: Vec<RssItem>,
}

#[derive(Debug, Deserialize)]
pub struct RssItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(rename = "pubDate")]
    pub pub_date: Option<String>,
    pub source: Option<RssSource>,
}

/// `<source url="...">Publisher</source>`
#[derive(Debug, Deserialize)]
pub struct RssSource {
    #[serde(rename = "$text", default)]
    pub name: String,
    #[serde(rename = "@url")]
    pub url: Option<String>,
}

/// Parse an RSS body into its raw items.
///
/// # Errors
///
/// Returns [`WindError::EmptyFeed`] if the XML is malformed or not RSS.
pub fn parse_feed(xml: &str) -> Result<Vec<RssItem>, WindError> {
    let document: RssDocument = from_str(xml)
        .map_err(|e| WindError::empty_feed(format!("Failed to parse RSS: {e}")))?;
    Ok(document.channel.items)
}

/// Keep items published no more than `hours_limit` hours before `now`.
///
/// Items without a (parseable) publication date are dropped.
#[must_use]
pub fn filter_recent(items: Vec<RssItem>, now: DateTime<Utc>, hours_limit: u32) -> Vec<NewsItem> {
    let window = chrono::Duration::hours(i64::from(hours_limit));

    items
        .into_iter()
        .filter_map(|item| {
            let raw_date = item.pub_date.as_deref()?;
            let published_at = match DateTime::parse_from_rfc2822(raw_date.trim()) {
                Ok(date) => date,
                Err(e) => {
                    debug!("Dropping '{}': bad pubDate '{}': {}", item.title, raw_date, e);
                    return None;
                }
            };

            let source_name = item
                .source
                .map(|s| s.name.trim().to_string())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| DEFAULT_SOURCE_NAME.to_string());

            Some(NewsItem {
                title: item.title,
                link: item.link,
                source_name,
                published_at,
            })
        })
        .filter(|news| news.age(now) <= window)
        .collect()
}

/// Google News style RSS search client
pub struct NewsFeedFetcher {
    client: Client,
    base_url: String,
    language: String,
    region: String,
    edition: String,
}

impl NewsFeedFetcher {
    /// Create a new fetcher
    pub fn new(config: &NewsConfig) -> Result<Self, WindError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("TheWind/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WindError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
            region: config.region.clone(),
            edition: config.edition.clone(),
        })
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/rss/search?q={}&hl={}&gl={}&ceid={}",
            self.base_url,
            urlencoding::encode(query),
            self.language,
            self.region,
            self.edition
        )
    }

    /// Fetch and filter, keeping the failure cause.
    ///
    /// # Errors
    ///
    /// [`WindError::Unavailable`] on transport or HTTP failure,
    /// [`WindError::EmptyFeed`] when the body is not a readable feed.
    pub async fn try_fetch(&self, query: &str, hours_limit: u32) -> Result<Vec<NewsItem>, WindError> {
        let url = self.search_url(query);
        debug!("Fetching news RSS: {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(WindError::unavailable(format!(
                "News feed returned status {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        let items = parse_feed(&body)?;
        let total = items.len();
        let recent = filter_recent(items, Utc::now(), hours_limit);

        info!(
            "News feed for '{}': {} of {} items within {}h",
            query,
            recent.len(),
            total,
            hours_limit
        );
        Ok(recent)
    }
}

#[async_trait]
impl NewsFeed for NewsFeedFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, query: &str, hours_limit: u32) -> Vec<NewsItem> {
        match self.try_fetch(query, hours_limit).await {
            Ok(items) => items,
            Err(e) => {
                warn!(kind = e.kind(), error = %e, "News fetch failed for '{}'", query);
                Vec::new()
            }
        }
    }
}

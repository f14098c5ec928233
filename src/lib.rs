//! `TheWind` - weather dashboard backend
//!
//! This library resolves a city to coordinates, fetches and caches its
//! forecast, selects recent weather headlines, and derives the advisories
//! and 30-day series the dashboard renders.

pub mod advisory;
pub mod api;
pub mod cache;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod geocode;
pub mod logging;
pub mod models;
pub mod news;
pub mod pipeline;
pub mod projection;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use advisory::{ClothingAdvice, DrivingAdvisory, clothing_advice, driving_advisory};
pub use cache::TtlCache;
pub use config::WindConfig;
pub use dashboard::{DashboardView, Interaction, UiState};
pub use error::WindError;
pub use geocode::{GeocodeClient, Geocoder};
pub use models::{ForecastBundle, Location, NewsItem, WeatherSnapshot};
pub use news::{NewsFeed, NewsFeedFetcher, NewsSelector};
pub use pipeline::AcquisitionPipeline;
pub use projection::{MonthlyDay, SyntheticSource, ThreadRandom};
pub use weather::{ForecastClient, ForecastSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WindError>;

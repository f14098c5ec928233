//! Data models for `TheWind`
//!
//! This module contains the core domain models organized by concern:
//! - Location: a resolved city with coordinates
//! - Forecast: current conditions plus hourly and daily series
//! - News: filtered headlines

pub mod forecast;
pub mod location;
pub mod news;

pub use forecast::{
    CurrentConditions, DailyPoint, DailySeries, ForecastBundle, HOURS_SHOWN, HourlyPoint,
    HourlySeries, REAL_DAYS, WeatherSnapshot,
};
pub use location::Location;
pub use news::NewsItem;

//! Forecast bundle: current conditions, hourly and daily series

use super::Location;
use crate::WindError;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Number of hourly entries kept from the provider response
pub const HOURS_SHOWN: usize = 24;

/// Number of daily entries that carry real forecast data
pub const REAL_DAYS: usize = 7;

/// Conditions right now
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentConditions {
    /// Temperature in Celsius
    pub temperature_c: f64,
    /// Relative humidity (0-100)
    pub humidity_pct: u8,
    /// Wind speed in km/h
    pub wind_speed_kph: f64,
    /// Provider weather code
    pub weather_code: u8,
}

/// One hour of the hourly series
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HourlyPoint {
    /// Local time at the forecast location
    pub timestamp: NaiveDateTime,
    /// Temperature in Celsius
    pub temperature_c: f64,
    /// Precipitation probability (0-100)
    pub precipitation_probability_pct: u8,
}

/// Chronological hourly series, at most [`HOURS_SHOWN`] entries, index 0 = now
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(transparent)]
pub struct HourlySeries(Vec<HourlyPoint>);

impl HourlySeries {
    /// Keep the first [`HOURS_SHOWN`] points in provider order
    #[must_use]
    pub fn new(mut points: Vec<HourlyPoint>) -> Self {
        points.truncate(HOURS_SHOWN);
        Self(points)
    }

    #[must_use]
    pub fn points(&self) -> &[HourlyPoint] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One day of the daily series
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailyPoint {
    pub date: NaiveDate,
    /// Maximum temperature in Celsius
    pub temp_max_c: f64,
    /// Minimum temperature in Celsius, absent when the provider sent null
    pub temp_min_c: Option<f64>,
    /// Precipitation sum in millimeters
    pub precipitation_sum_mm: f64,
    /// Maximum precipitation probability (0-100)
    pub precipitation_probability_max_pct: u8,
}

/// Daily series in provider order, index 0 = today.
///
/// Always holds at least [`REAL_DAYS`] entries.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(transparent)]
pub struct DailySeries(Vec<DailyPoint>);

impl DailySeries {
    /// Wrap the provider's daily entries.
    ///
    /// # Errors
    ///
    /// Returns [`WindError::Unavailable`] when fewer than [`REAL_DAYS`] days are present.
    pub fn new(points: Vec<DailyPoint>) -> Result<Self, WindError> {
        if points.len() < REAL_DAYS {
            return Err(WindError::unavailable(format!(
                "daily series has {} entries, need {REAL_DAYS}",
                points.len()
            )));
        }
        Ok(Self(points))
    }

    #[must_use]
    pub fn points(&self) -> &[DailyPoint] {
        &self.0
    }

    /// The authoritative first week
    #[must_use]
    pub fn real_days(&self) -> &[DailyPoint] {
        &self.0[..REAL_DAYS]
    }

    #[must_use]
    pub fn today(&self) -> &DailyPoint {
        &self.0[0]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Mean of the real days' maximum temperatures
    #[must_use]
    pub fn mean_max_temperature(&self) -> f64 {
        let days = self.real_days();
        days.iter().map(|d| d.temp_max_c).sum::<f64>() / days.len() as f64
    }
}

/// Everything one forecast request returns. All-or-nothing.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ForecastBundle {
    pub current: CurrentConditions,
    pub hourly: HourlySeries,
    pub daily: DailySeries,
}

/// A forecast together with the location it was fetched for
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub location: Location,
    pub forecast: ForecastBundle,
}

impl WeatherSnapshot {
    /// Canonical city name for display
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.location.display_name
    }
}

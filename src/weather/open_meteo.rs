//! `OpenMeteo` API response structures and conversion into the forecast bundle

use crate::WindError;
use crate::models::{
    CurrentConditions, DailyPoint, DailySeries, ForecastBundle, HOURS_SHOWN, HourlyPoint,
    HourlySeries,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

/// Variables requested for the `current` block
pub const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,weather_code,wind_speed_10m";
/// Variables requested for the `hourly` block
pub const HOURLY_FIELDS: &str = "temperature_2m,precipitation_probability";
/// Variables requested for the `daily` block
pub const DAILY_FIELDS: &str =
    "temperature_2m_max,temperature_2m_min,precipitation_sum,precipitation_probability_max";

/// Composite forecast response from `OpenMeteo`
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub current: Option<CurrentData>,
    pub hourly: Option<HourlyData>,
    pub daily: Option<DailyData>,
}

/// Current conditions block
#[derive(Debug, Deserialize)]
pub struct CurrentData {
    #[serde(rename = "temperature_2m")]
    pub temperature: f64,
    #[serde(rename = "relative_humidity_2m")]
    pub humidity: f64,
    pub weather_code: u8,
    #[serde(rename = "wind_speed_10m")]
    pub wind_speed: f64,
}

/// Hourly block, arrays aligned with `time`
#[derive(Debug, Deserialize)]
pub struct HourlyData {
    pub time: Vec<String>,
    #[serde(rename = "temperature_2m", default)]
    pub temperature: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_probability: Vec<Option<f64>>,
}

/// Daily block, arrays aligned with `time`
#[derive(Debug, Deserialize)]
pub struct DailyData {
    pub time: Vec<String>,
    #[serde(rename = "temperature_2m_max", default)]
    pub temperature_max: Vec<Option<f64>>,
    #[serde(rename = "temperature_2m_min", default)]
    pub temperature_min: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_sum: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_probability_max: Vec<Option<f64>>,
}

fn required(values: &[Option<f64>], index: usize, field: &str) -> Result<f64, WindError> {
    values
        .get(index)
        .copied()
        .flatten()
        .ok_or_else(|| WindError::parse(format!("missing {field}[{index}]")))
}

fn percent(value: Option<f64>) -> u8 {
    value.unwrap_or(0.0).round().clamp(0.0, 100.0) as u8
}

impl TryFrom<ForecastResponse> for ForecastBundle {
    type Error = WindError;

    fn try_from(response: ForecastResponse) -> Result<Self, Self::Error> {
        let current = response
            .current
            .ok_or_else(|| WindError::parse("response has no current block"))?;
        let hourly = response
            .hourly
            .ok_or_else(|| WindError::parse("response has no hourly block"))?;
        let daily = response
            .daily
            .ok_or_else(|| WindError::parse("response has no daily block"))?;

        Ok(Self {
            current: CurrentConditions {
                temperature_c: current.temperature,
                humidity_pct: percent(Some(current.humidity)),
                wind_speed_kph: current.wind_speed,
                weather_code: current.weather_code,
            },
            hourly: hourly.into_series()?,
            daily: daily.into_series()?,
        })
    }
}

impl HourlyData {
    fn into_series(self) -> Result<HourlySeries, WindError> {
        let mut points = Vec::with_capacity(HOURS_SHOWN);
        for (i, time) in self.time.iter().take(HOURS_SHOWN).enumerate() {
            let timestamp = NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M")
                .map_err(|e| WindError::parse(format!("bad hourly time '{time}': {e}")))?;
            points.push(HourlyPoint {
                timestamp,
                temperature_c: required(&self.temperature, i, "temperature_2m")?,
                precipitation_probability_pct: percent(
                    self.precipitation_probability.get(i).copied().flatten(),
                ),
            });
        }
        Ok(HourlySeries::new(points))
    }
}

impl DailyData {
    fn into_series(self) -> Result<DailySeries, WindError> {
        let mut points = Vec::with_capacity(self.time.len());
        for (i, time) in self.time.iter().enumerate() {
            let date = NaiveDate::parse_from_str(time, "%Y-%m-%d")
                .map_err(|e| WindError::parse(format!("bad daily date '{time}': {e}")))?;
            points.push(DailyPoint {
                date,
                temp_max_c: required(&self.temperature_max, i, "temperature_2m_max")?,
                temp_min_c: self.temperature_min.get(i).copied().flatten(),
                precipitation_sum_mm: self.precipitation_sum.get(i).copied().flatten().unwrap_or(0.0),
                precipitation_probability_max_pct: percent(
                    self.precipitation_probability_max.get(i).copied().flatten(),
                ),
            });
        }
        DailySeries::new(points)
    }
}

//! 30-day display series: one real forecast week followed by synthetic filler
//!
//! Days 8 to 30 are decoration, not a forecast. They are redrawn on every
//! call, so two renders of the same city show different filler unless the
//! caller supplies a deterministic [`SyntheticSource`].

use chrono::{Days, NaiveDate};
use rand::RngExt;
use serde::Serialize;

use crate::models::{DailySeries, REAL_DAYS};

/// Length of the projected series
pub const MONTH_DAYS: usize = 30;

/// Synthetic temperatures stay within this many degrees of the weekly mean
pub const TEMPERATURE_SPREAD_C: f64 = 4.0;

/// Synthetic precipitation probabilities are drawn from `0..this`
pub const MAX_SYNTHETIC_PRECIPITATION_PCT: u8 = 30;

/// One day of the projected month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyDay {
    /// `DD/MM`
    pub label: String,
    pub temperature_c: i32,
    pub precipitation_probability_pct: u8,
    pub is_synthetic: bool,
}

/// Random draws used for the synthetic days
pub trait SyntheticSource {
    /// Offset in degrees, within `[-TEMPERATURE_SPREAD_C, TEMPERATURE_SPREAD_C)`
    fn temperature_offset(&mut self) -> f64;

    /// Probability in `0..MAX_SYNTHETIC_PRECIPITATION_PCT`
    fn precipitation_probability(&mut self) -> u8;
}

/// Production source backed by the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl SyntheticSource for ThreadRandom {
    fn temperature_offset(&mut self) -> f64 {
        rand::rng().random_range(-TEMPERATURE_SPREAD_C..TEMPERATURE_SPREAD_C)
    }

    fn precipitation_probability(&mut self) -> u8 {
        rand::rng().random_range(0..MAX_SYNTHETIC_PRECIPITATION_PCT)
    }
}

fn day_label(date: NaiveDate) -> String {
    date.format("%d/%m").to_string()
}

/// Extend the real week into [`MONTH_DAYS`] entries, index 0 = today.
///
/// "Today" is the first date of the daily series, i.e. the forecast
/// location's local date.
#[must_use]
pub fn project<S: SyntheticSource + ?Sized>(daily: &DailySeries, source: &mut S) -> Vec<MonthlyDay> {
    let today = daily.today().date;
    let base_temperature = daily.mean_max_temperature();

    let real = daily.real_days().iter().map(|day| MonthlyDay {
        label: day_label(day.date),
        temperature_c: day.temp_max_c.round() as i32,
        precipitation_probability_pct: day.precipitation_probability_max_pct,
        is_synthetic: false,
    });

    let synthetic = (REAL_DAYS..MONTH_DAYS).map(|offset| {
        let date = today + Days::new(offset as u64);
        let offset_c = source
            .temperature_offset()
            .clamp(-TEMPERATURE_SPREAD_C, TEMPERATURE_SPREAD_C);
        MonthlyDay {
            label: day_label(date),
            temperature_c: (base_temperature + offset_c).round() as i32,
            precipitation_probability_pct: source
                .precipitation_probability()
                .min(MAX_SYNTHETIC_PRECIPITATION_PCT - 1),
            is_synthetic: true,
        }
    });

    real.chain(synthetic).collect()
}

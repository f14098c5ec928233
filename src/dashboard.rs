//! Presentation state and the view model handed to renderers
//!
//! [`UiState`] is an immutable record; every user interaction produces a new
//! one. [`DashboardView`] is everything a renderer needs for one city, with
//! all rounding and labelling already done.

use serde::{Deserialize, Serialize};

use crate::advisory::{self, ClothingAdvice, DrivingAdvisory};
use crate::models::WeatherSnapshot;
use crate::projection::{self, MonthlyDay, SyntheticSource};
use crate::weather::{weather_code_to_description, weather_code_to_icon};

/// City shown before the user picks one
pub const DEFAULT_CITY: &str = "Tel Aviv";

/// One-tap city shortcuts, in display order
pub const QUICK_PICKS: [&str; 3] = ["Tel Aviv", "Jerusalem", "Haifa"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Desktop,
    Mobile,
}

/// Something the user did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interaction {
    ToggleTheme,
    ToggleAccessibility,
    ToggleViewMode,
    ToggleNewsScreen,
    SelectCity(String),
    /// Index into [`QUICK_PICKS`]
    QuickPick(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiState {
    pub theme: Theme,
    pub accessibility: bool,
    pub view_mode: ViewMode,
    pub show_news_screen: bool,
    pub selected_city: String,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            accessibility: false,
            view_mode: ViewMode::default(),
            show_news_screen: false,
            selected_city: DEFAULT_CITY.to_string(),
        }
    }
}

impl UiState {
    /// Next state after `interaction`. Blank or unchanged city selections and
    /// out-of-range quick picks leave the state as it was.
    #[must_use]
    pub fn apply(&self, interaction: Interaction) -> UiState {
        let mut next = self.clone();
        match interaction {
            Interaction::ToggleTheme => {
                next.theme = match self.theme {
                    Theme::Light => Theme::Dark,
                    Theme::Dark => Theme::Light,
                };
            }
            Interaction::ToggleAccessibility => next.accessibility = !self.accessibility,
            Interaction::ToggleViewMode => {
                next.view_mode = match self.view_mode {
                    ViewMode::Desktop => ViewMode::Mobile,
                    ViewMode::Mobile => ViewMode::Desktop,
                };
            }
            Interaction::ToggleNewsScreen => next.show_news_screen = !self.show_news_screen,
            Interaction::SelectCity(city) => {
                let city = city.trim();
                if !city.is_empty() && city != self.selected_city {
                    next.selected_city = city.to_string();
                }
            }
            Interaction::QuickPick(index) => {
                if let Some(city) = QUICK_PICKS.get(index) {
                    next.selected_city = (*city).to_string();
                }
            }
        }
        next
    }

    /// Page zoom factor
    #[must_use]
    pub fn zoom(&self) -> f64 {
        if self.accessibility { 1.1 } else { 1.0 }
    }

    #[must_use]
    pub fn week_columns(&self) -> usize {
        match self.view_mode {
            ViewMode::Desktop => 7,
            ViewMode::Mobile => 2,
        }
    }

    #[must_use]
    pub fn month_columns(&self) -> usize {
        match self.view_mode {
            ViewMode::Desktop => 6,
            ViewMode::Mobile => 3,
        }
    }

    /// News goes in a sidebar on desktop and behind a toggle on mobile
    #[must_use]
    pub fn news_in_sidebar(&self) -> bool {
        self.view_mode == ViewMode::Desktop
    }
}

/// Headline numbers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub temperature_c: i32,
    pub precipitation_today_mm: f64,
    pub humidity_pct: u8,
    pub precipitation_probability_today_pct: u8,
    pub wind_speed_kph: i32,
    pub status: String,
    pub icon: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advice {
    pub clothing: ClothingAdvice,
    pub clothing_text: &'static str,
    pub driving: DrivingAdvisory,
    pub driving_text: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    /// `HH:MM`
    pub label: String,
    pub temperature_c: f64,
    pub precipitation_probability_pct: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekCard {
    /// `DD/MM`
    pub label: String,
    pub temperature_c: i32,
    pub precipitation_probability_pct: u8,
}

/// Layout hints derived from the UI state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub theme: Theme,
    pub zoom: f64,
    pub week_columns: usize,
    pub month_columns: usize,
    pub news_in_sidebar: bool,
}

impl From<&UiState> for Layout {
    fn from(ui: &UiState) -> Self {
        Self {
            theme: ui.theme,
            zoom: ui.zoom(),
            week_columns: ui.week_columns(),
            month_columns: ui.month_columns(),
            news_in_sidebar: ui.news_in_sidebar(),
        }
    }
}

/// Full dashboard for one city
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub city: String,
    pub metrics: Metrics,
    pub advice: Advice,
    pub hourly: Vec<ChartPoint>,
    pub week: Vec<WeekCard>,
    pub month: Vec<MonthlyDay>,
    pub layout: Layout,
}

impl DashboardView {
    /// Assemble the view. Month filler is drawn from `source`.
    pub fn build<S: SyntheticSource + ?Sized>(
        snapshot: &WeatherSnapshot,
        ui: &UiState,
        source: &mut S,
    ) -> Self {
        let forecast = &snapshot.forecast;
        let current = &forecast.current;
        let today = forecast.daily.today();

        let metrics = Metrics {
            temperature_c: current.temperature_c.round() as i32,
            precipitation_today_mm: today.precipitation_sum_mm,
            humidity_pct: current.humidity_pct,
            precipitation_probability_today_pct: today.precipitation_probability_max_pct,
            wind_speed_kph: current.wind_speed_kph.round() as i32,
            status: weather_code_to_description(current.weather_code).to_string(),
            icon: weather_code_to_icon(current.weather_code),
        };

        let clothing = advisory::clothing_advice(current.temperature_c);
        let driving = advisory::driving_advisory(today.precipitation_sum_mm, current.weather_code);

        let hourly = forecast
            .hourly
            .points()
            .iter()
            .map(|point| ChartPoint {
                label: point.timestamp.format("%H:%M").to_string(),
                temperature_c: point.temperature_c,
                precipitation_probability_pct: point.precipitation_probability_pct,
            })
            .collect();

        let week = forecast
            .daily
            .real_days()
            .iter()
            .map(|day| WeekCard {
                label: day.date.format("%d/%m").to_string(),
                temperature_c: day.temp_max_c.round() as i32,
                precipitation_probability_pct: day.precipitation_probability_max_pct,
            })
            .collect();

        Self {
            city: snapshot.display_name().to_string(),
            metrics,
            advice: Advice {
                clothing,
                clothing_text: clothing.text(),
                driving,
                driving_text: driving.text(),
            },
            hourly,
            week,
            month: projection::project(&forecast.daily, source),
            layout: Layout::from(ui),
        }
    }
}

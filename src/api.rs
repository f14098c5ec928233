//! JSON API consumed by the dashboard frontend

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cache::TtlCache;
use crate::config::WindConfig;
use crate::dashboard::{DEFAULT_CITY, DashboardView, Interaction, Theme, UiState, ViewMode};
use crate::error::NO_DATA_MESSAGE;
use crate::geocode::{GeocodeClient, Geocoder};
use crate::models::NewsItem;
use crate::news::{NewsFeed, NewsFeedFetcher, NewsSelector};
use crate::pipeline::AcquisitionPipeline;
use crate::projection::ThreadRandom;
use crate::weather::{ForecastClient, ForecastSource};

pub type WeatherPipeline = AcquisitionPipeline<Box<dyn Geocoder>, Box<dyn ForecastSource>>;
pub type HeadlineSelector = NewsSelector<Box<dyn NewsFeed>>;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub weather: Arc<WeatherPipeline>,
    pub news: Arc<HeadlineSelector>,
}

impl AppState {
    #[must_use]
    pub fn new(weather: WeatherPipeline, news: HeadlineSelector) -> Self {
        Self {
            weather: Arc::new(weather),
            news: Arc::new(news),
        }
    }

    /// Wire the production HTTP clients from configuration
    pub fn from_config(config: &WindConfig) -> crate::Result<Self> {
        let geocoder: Box<dyn Geocoder> = Box::new(GeocodeClient::new(&config.geocoding)?);
        let forecasts: Box<dyn ForecastSource> = Box::new(ForecastClient::new(&config.forecast)?);
        let feed: Box<dyn NewsFeed> = Box::new(NewsFeedFetcher::new(&config.news)?);

        let weather = AcquisitionPipeline::with_cache(
            geocoder,
            forecasts,
            Arc::new(TtlCache::new()),
            config.cache.ttl(),
        );
        Ok(Self::new(weather, NewsSelector::new(feed, config.news.clone())))
    }
}

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub city: Option<String>,
    pub theme: Option<Theme>,
    pub view_mode: Option<ViewMode>,
    pub accessibility: Option<bool>,
}

impl WeatherQuery {
    fn city(&self) -> &str {
        self.city
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CITY)
    }

    fn ui_state(&self) -> UiState {
        let defaults = UiState::default();
        UiState {
            theme: self.theme.unwrap_or(defaults.theme),
            view_mode: self.view_mode.unwrap_or(defaults.view_mode),
            accessibility: self.accessibility.unwrap_or(defaults.accessibility),
            selected_city: self.city().to_string(),
            ..defaults
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewsQuery {
    pub city: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UiRequest {
    #[serde(default)]
    pub state: UiState,
    pub interaction: Interaction,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/weather", get(get_weather))
        .route("/news", get(get_news))
        .route("/ui", post(apply_interaction))
        .route("/health", get(health))
        .with_state(state)
}

async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<DashboardView>, (StatusCode, Json<ApiMessage>)> {
    let city = query.city();
    let Some(snapshot) = state.weather.get_data(city).await else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiMessage {
                message: NO_DATA_MESSAGE.to_string(),
            }),
        ));
    };

    let view = DashboardView::build(&snapshot, &query.ui_state(), &mut ThreadRandom);
    Ok(Json(view))
}

async fn get_news(
    State(state): State<AppState>,
    Query(query): Query<NewsQuery>,
) -> Json<Vec<NewsItem>> {
    let city = query
        .city
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CITY);
    Json(state.news.get_news(city).await)
}

async fn apply_interaction(Json(request): Json<UiRequest>) -> Json<UiState> {
    debug!("UI interaction {:?}", request.interaction);
    Json(request.state.apply(request.interaction))
}

async fn health() -> &'static str {
    "ok"
}

//! Forecast client for the `OpenMeteo` composite forecast endpoint
//!
//! One request returns current conditions, the hourly series and the daily
//! series together. The bundle is all-or-nothing: a failed status, transport
//! error or malformed body yields no bundle at all.

use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

use crate::WindError;
use crate::config::ForecastConfig;
use crate::models::ForecastBundle;

pub mod codes;
pub mod open_meteo;

pub use codes::{DEFAULT_DESCRIPTION, weather_code_to_description, weather_code_to_icon};

/// Anything that can produce a forecast bundle for a coordinate pair
#[async_trait]
pub trait ForecastSource: Send + Sync {
    async fn fetch_forecast(&self, latitude: f64, longitude: f64)
    -> Result<ForecastBundle, WindError>;
}

#[async_trait]
impl<T: ForecastSource + ?Sized> ForecastSource for Box<T> {
    async fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ForecastBundle, WindError> {
        (**self).fetch_forecast(latitude, longitude).await
    }
}

/// HTTP client for the `OpenMeteo` forecast API
pub struct ForecastClient {
    client: Client,
    base_url: String,
}

impl ForecastClient {
    /// Create a new forecast client
    pub fn new(config: &ForecastConfig) -> Result<Self, WindError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("TheWind/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WindError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn forecast_url(&self, latitude: f64, longitude: f64) -> String {
        format!(
            "{}/v1/forecast?latitude={}&longitude={}&current={}&hourly={}&daily={}&timezone=auto",
            self.base_url,
            latitude,
            longitude,
            open_meteo::CURRENT_FIELDS,
            open_meteo::HOURLY_FIELDS,
            open_meteo::DAILY_FIELDS,
        )
    }
}

#[async_trait]
impl ForecastSource for ForecastClient {
    #[instrument(skip(self))]
    async fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ForecastBundle, WindError> {
        let start_time = Instant::now();
        let url = self.forecast_url(latitude, longitude);
        debug!("OpenMeteo API request URL: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(WindError::unavailable(format!(
                "OpenMeteo returned status {}",
                response.status()
            )));
        }

        let body: open_meteo::ForecastResponse = response.json().await?;
        let bundle = ForecastBundle::try_from(body)?;

        info!(
            "Retrieved forecast ({} hours, {} days) in {:.3}s",
            bundle.hourly.len(),
            bundle.daily.len(),
            start_time.elapsed().as_secs_f64()
        );
        Ok(bundle)
    }
}

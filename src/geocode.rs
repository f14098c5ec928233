//! City name resolution via the `OpenWeatherMap` direct geocoding API

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::WindError;
use crate::config::GeocodingConfig;
use crate::models::Location;

/// Resolves free text to a single best-matching location
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn resolve(&self, city: &str) -> Result<Location, WindError>;
}

#[async_trait]
impl<T: Geocoder + ?Sized> Geocoder for Box<T> {
    async fn resolve(&self, city: &str) -> Result<Location, WindError> {
        (**self).resolve(city).await
    }
}

/// One candidate from the direct geocoding endpoint
#[derive(Debug, Deserialize)]
pub struct GeocodingResult {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub country: Option<String>,
    pub state: Option<String>,
}

/// `OpenWeatherMap` geocoding client
pub struct GeocodeClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl GeocodeClient {
    /// Create a new client. A missing key is allowed; lookups then fail as not found.
    pub fn new(config: &GeocodingConfig) -> Result<Self, WindError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("TheWind/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WindError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Geocoder for GeocodeClient {
    #[instrument(skip(self))]
    async fn resolve(&self, city: &str) -> Result<Location, WindError> {
        let api_key = self.api_key.as_deref().ok_or(WindError::MissingCredentials)?;

        let url = format!(
            "{}/geo/1.0/direct?q={}&limit=1&appid={}",
            self.base_url,
            urlencoding::encode(city),
            urlencoding::encode(api_key)
        );

        let response = self.client.get(&url).send().await?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(WindError::MissingCredentials);
            }
            status => {
                return Err(WindError::unavailable(format!(
                    "Geocoding returned status {status}"
                )));
            }
        }

        let candidates: Vec<GeocodingResult> = response.json().await?;

        // limit=1, so the first candidate is the provider's best match
        let best = candidates
            .into_iter()
            .next()
            .ok_or_else(|| WindError::not_found(city))?;

        debug!(
            "Found location: {} ({:.4}, {:.4})",
            best.name, best.lat, best.lon
        );

        Ok(Location::new(city, best.lat, best.lon, best.name))
    }
}

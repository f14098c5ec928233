//! Acquisition pipeline: geocode a city, fetch its forecast, cache the result
//!
//! Callers only ever see "a snapshot" or "nothing". The cause of a miss is
//! logged here with a distinct `kind` field and then dropped.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::WindError;
use crate::cache::TtlCache;
use crate::geocode::Geocoder;
use crate::models::WeatherSnapshot;
use crate::weather::ForecastSource;

/// How long a snapshot is served from cache before the next call refetches
pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);

/// Geocoder + forecast source behind a TTL cache keyed by the exact input string
pub struct AcquisitionPipeline<G, F> {
    geocoder: G,
    forecasts: F,
    cache: Arc<TtlCache<WeatherSnapshot>>,
    ttl: Duration,
}

impl<G: Geocoder, F: ForecastSource> AcquisitionPipeline<G, F> {
    #[must_use]
    pub fn new(geocoder: G, forecasts: F) -> Self {
        Self::with_cache(geocoder, forecasts, Arc::new(TtlCache::new()), DEFAULT_TTL)
    }

    /// Build a pipeline sharing an existing cache
    #[must_use]
    pub fn with_cache(
        geocoder: G,
        forecasts: F,
        cache: Arc<TtlCache<WeatherSnapshot>>,
        ttl: Duration,
    ) -> Self {
        Self {
            geocoder,
            forecasts,
            cache,
            ttl,
        }
    }

    /// Forecast and display name for `city`, or `None` if anything failed.
    #[instrument(skip(self))]
    pub async fn get_data(&self, city: &str) -> Option<WeatherSnapshot> {
        match self.try_get_data(city).await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(kind = e.kind(), error = %e, "No weather data for '{}'", city);
                None
            }
        }
    }

    /// Same as [`Self::get_data`] but keeps the failure cause.
    ///
    /// # Errors
    ///
    /// [`WindError::NotFound`] or [`WindError::MissingCredentials`] from geocoding,
    /// [`WindError::Unavailable`] or [`WindError::Parse`] from the forecast provider.
    pub async fn try_get_data(&self, city: &str) -> Result<WeatherSnapshot, WindError> {
        if let Some(snapshot) = self.cache.get(city) {
            debug!("Serving cached forecast for '{}'", city);
            return Ok(snapshot);
        }

        if city.trim().is_empty() {
            return Err(WindError::not_found(city));
        }

        let location = self.geocoder.resolve(city).await?;
        let forecast = self
            .forecasts
            .fetch_forecast(location.latitude, location.longitude)
            .await?;

        info!(
            "Fetched forecast for {} ({})",
            location.display_name,
            location.format_coordinates()
        );

        let snapshot = WeatherSnapshot { location, forecast };
        self.cache.put(city, snapshot.clone(), self.ttl);
        Ok(snapshot)
    }
}

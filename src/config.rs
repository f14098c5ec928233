//! Configuration management for `TheWind`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::WindError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the geocoding API key
pub const API_KEY_ENV: &str = "OPENWEATHER_KEY";

/// Root configuration structure for `TheWind`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WindConfig {
    /// Geocoding provider configuration
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    /// Forecast provider configuration
    #[serde(default)]
    pub forecast: ForecastConfig,
    /// News feed configuration
    #[serde(default)]
    pub news: NewsConfig,
    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

/// Geocoding API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Geocoding API key. Absent means every lookup resolves to "not found".
    pub api_key: Option<String>,
    /// Base URL for the geocoding API
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Forecast API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Base URL for the forecast API
    #[serde(default = "default_forecast_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// News feed configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    /// Base URL for the RSS search endpoint
    #[serde(default = "default_news_base_url")]
    pub base_url: String,
    /// Interface language (`hl`)
    #[serde(default = "default_news_language")]
    pub language: String,
    /// Region (`gl`)
    #[serde(default = "default_news_region")]
    pub region: String,
    /// Edition id (`ceid`)
    #[serde(default = "default_news_edition")]
    pub edition: String,
    /// Prefix put in front of the city name for the local query
    #[serde(default = "default_local_query_prefix")]
    pub local_query_prefix: String,
    /// Query used when the local query finds nothing
    #[serde(default = "default_fallback_query")]
    pub fallback_query: String,
    /// Age window for local results, in hours
    #[serde(default = "default_local_window_hours")]
    pub local_window_hours: u32,
    /// Age window for fallback results, in hours
    #[serde(default = "default_fallback_window_hours")]
    pub fallback_window_hours: u32,
    /// Maximum number of items returned
    #[serde(default = "default_max_items")]
    pub max_items: usize,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Cache configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Forecast cache TTL in minutes
    #[serde(default = "default_cache_ttl")]
    pub ttl_minutes: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions
fn default_geocoding_base_url() -> String {
    "http://api.openweathermap.org".to_string()
}

fn default_forecast_base_url() -> String {
    "https://api.open-meteo.com".to_string()
}

fn default_news_base_url() -> String {
    "https://news.google.com".to_string()
}

fn default_news_language() -> String {
    "he".to_string()
}

fn default_news_region() -> String {
    "IL".to_string()
}

fn default_news_edition() -> String {
    "IL:he".to_string()
}

fn default_local_query_prefix() -> String {
    "weather".to_string()
}

fn default_fallback_query() -> String {
    "weather in Israel".to_string()
}

fn default_local_window_hours() -> u32 {
    72
}

fn default_fallback_window_hours() -> u32 {
    30
}

fn default_max_items() -> usize {
    12
}

fn default_timeout() -> u32 {
    30
}

fn default_cache_ttl() -> u32 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_geocoding_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            base_url: default_forecast_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            base_url: default_news_base_url(),
            language: default_news_language(),
            region: default_news_region(),
            edition: default_news_edition(),
            local_query_prefix: default_local_query_prefix(),
            fallback_query: default_fallback_query(),
            local_window_hours: default_local_window_hours(),
            fallback_window_hours: default_fallback_window_hours(),
            max_items: default_max_items(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: default_cache_ttl(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl CacheConfig {
    #[must_use]
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(u64::from(self.ttl_minutes) * 60)
    }
}

impl WindConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // THEWIND_NEWS__MAX_ITEMS=6 style overrides
        builder = builder.add_source(
            Environment::with_prefix("THEWIND")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: WindConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        if config.geocoding.api_key.is_none() {
            config.geocoding.api_key = std::env::var(API_KEY_ENV).ok();
        }

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("thewind").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self
            .geocoding
            .api_key
            .as_ref()
            .is_some_and(|key| key.trim().is_empty())
        {
            self.geocoding.api_key = None;
        }
        if self.geocoding.base_url.is_empty() {
            self.geocoding.base_url = default_geocoding_base_url();
        }
        if self.forecast.base_url.is_empty() {
            self.forecast.base_url = default_forecast_base_url();
        }
        if self.news.base_url.is_empty() {
            self.news.base_url = default_news_base_url();
        }
        if self.news.fallback_query.is_empty() {
            self.news.fallback_query = default_fallback_query();
        }
        if self.cache.ttl_minutes == 0 {
            self.cache.ttl_minutes = default_cache_ttl();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        for timeout in [
            self.geocoding.timeout_seconds,
            self.forecast.timeout_seconds,
            self.news.timeout_seconds,
        ] {
            if timeout > 300 {
                return Err(
                    WindError::config("HTTP timeout cannot exceed 300 seconds").into(),
                );
            }
        }

        if self.cache.ttl_minutes > 24 * 60 {
            return Err(WindError::config("Cache TTL cannot exceed 1440 minutes (1 day)").into());
        }

        if self.news.local_window_hours == 0 || self.news.fallback_window_hours == 0 {
            return Err(WindError::config("News windows must be at least one hour").into());
        }

        if self.news.max_items == 0 {
            return Err(WindError::config("News max_items must be at least 1").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WindError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WindError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("Geocoding", &self.geocoding.base_url),
            ("Forecast", &self.forecast.base_url),
            ("News", &self.news.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(WindError::config(format!(
                    "{name} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}

//! Error types and handling for `TheWind`
//!
//! Every acquisition failure is caught where it happens and collapsed into an
//! empty result for the caller. The variants below keep the cause around long
//! enough to be logged and asserted on in tests.

use thiserror::Error;

/// Main error type for the `TheWind` pipeline
#[derive(Error, Debug)]
pub enum WindError {
    /// Geocoding returned no candidate for the query
    #[error("Location not found: {query}")]
    NotFound { query: String },

    /// The geocoding credential is absent or rejected by the provider
    #[error("Geocoding credentials missing or rejected")]
    MissingCredentials,

    /// Transport or HTTP failure while talking to a provider
    #[error("Provider unavailable: {message}")]
    Unavailable { message: String },

    /// News feed could not be fetched or parsed
    #[error("News feed empty: {message}")]
    EmptyFeed { message: String },

    /// Response body did not have the expected shape
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl WindError {
    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(query: S) -> Self {
        Self::NotFound {
            query: query.into(),
        }
    }

    /// Create a new unavailable error
    pub fn unavailable<S: Into<String>>(message: S) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Create a new empty-feed error
    pub fn empty_feed<S: Into<String>>(message: S) -> Self {
        Self::EmptyFeed {
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Short stable label, used as a structured logging field
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            WindError::NotFound { .. } => "not_found",
            WindError::MissingCredentials => "missing_credentials",
            WindError::Unavailable { .. } => "unavailable",
            WindError::EmptyFeed { .. } => "empty_feed",
            WindError::Parse { .. } => "parse",
            WindError::Config { .. } => "config",
        }
    }

    /// Get a user-friendly error message
    ///
    /// Acquisition failures all share one message; the user is not told why
    /// the data is missing.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WindError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            _ => NO_DATA_MESSAGE.to_string(),
        }
    }
}

/// The single message shown whenever there is nothing to display
pub const NO_DATA_MESSAGE: &str = "No data found";

impl From<reqwest::Error> for WindError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            WindError::parse(err.to_string())
        } else {
            WindError::unavailable(err.to_string())
        }
    }
}

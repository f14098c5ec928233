//! Location model for a geocoded city

use serde::{Deserialize, Serialize};

/// A city resolved to coordinates
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Free text the user typed
    pub query: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Canonical name returned by the geocoder
    pub display_name: String,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(query: impl Into<String>, latitude: f64, longitude: f64, display_name: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            latitude,
            longitude,
            display_name: display_name.into(),
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_coordinates() {
        let location = Location::new("tel aviv", 32.0853, 34.781_768, "Tel Aviv");
        assert_eq!(location.format_coordinates(), "32.0853, 34.7818");
        assert_eq!(location.query, "tel aviv");
        assert_eq!(location.display_name, "Tel Aviv");
    }
}

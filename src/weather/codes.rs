//! Static lookup tables over the provider's weather codes
//!
//! Both lookups are total over `u8`: codes missing from a table fall back to
//! [`DEFAULT_DESCRIPTION`] and an empty icon.

/// Description used for codes absent from the table
pub const DEFAULT_DESCRIPTION: &str = "Normal";

/// Convert a weather code to a short human-readable description
#[must_use]
pub fn weather_code_to_description(code: u8) -> &'static str {
    match code {
        0 => "Clear",
        1 => "Mostly clear",
        2 => "Partly cloudy",
        3 => "Cloudy",
        45 => "Fog",
        48 => "Heavy fog",
        51 => "Light drizzle",
        53 | 55 => "Drizzle",
        61 => "Light rain",
        63 => "Rain",
        65 => "Heavy rain",
        71 => "Snow",
        77 => "Hail",
        80 | 81 => "Showers",
        82 => "Heavy showers",
        95 => "Thunderstorm",
        _ => DEFAULT_DESCRIPTION,
    }
}

/// Convert a weather code to an icon, or `""` when there is none
#[must_use]
pub fn weather_code_to_icon(code: u8) -> &'static str {
    match code {
        0 => "☀️",
        1 => "🌤️",
        2 => "⛅",
        3 => "☁️",
        45 => "🌫️",
        51 => "💧",
        61 => "🌧️",
        95 => "⛈️",
        _ => "",
    }
}

//! Clothing and driving advisories
//!
//! Pure threshold rules, no I/O. Thresholds are exclusive lower bounds: a
//! temperature exactly on a boundary belongs to the colder bracket.

use serde::Serialize;
use std::fmt;

/// Precipitation sum (mm) above which roads count as wet
pub const WET_ROAD_PRECIPITATION_MM: f64 = 0.5;

/// First weather code of the drizzle/rain/snow/storm range
pub const WET_WEATHER_CODE: u8 = 51;

/// What to wear, from warmest weather to coldest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClothingAdvice {
    /// Above 25°C
    Hot,
    /// Above 20°C
    Warm,
    /// Above 15°C
    Mild,
    /// Above 10°C
    Cool,
    /// 10°C and below
    Cold,
}

impl ClothingAdvice {
    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            ClothingAdvice::Hot => "🩳 T-shirt, sunglasses and a hat",
            ClothingAdvice::Warm => "👕 T-shirt or a thin long sleeve",
            ClothingAdvice::Mild => "🧥 Sweatshirt or a light jacket",
            ClothingAdvice::Cool => "🧣 Coat and warm layers",
            ClothingAdvice::Cold => "🧤 Very warm coat, gloves and a scarf",
        }
    }
}

impl fmt::Display for ClothingAdvice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Road conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrivingAdvisory {
    Caution,
    Normal,
}

impl DrivingAdvisory {
    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            DrivingAdvisory::Caution => "Wet road! Drive carefully.",
            DrivingAdvisory::Normal => "Good conditions.",
        }
    }
}

impl fmt::Display for DrivingAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Map a temperature in Celsius to one of the five clothing brackets
#[must_use]
pub fn clothing_advice(temperature_c: f64) -> ClothingAdvice {
    if temperature_c > 25.0 {
        ClothingAdvice::Hot
    } else if temperature_c > 20.0 {
        ClothingAdvice::Warm
    } else if temperature_c > 15.0 {
        ClothingAdvice::Mild
    } else if temperature_c > 10.0 {
        ClothingAdvice::Cool
    } else {
        // NaN lands here too
        ClothingAdvice::Cold
    }
}

/// Caution when today's rain exceeds 0.5 mm or the current code is in the wet range
#[must_use]
pub fn driving_advisory(precipitation_sum_mm: f64, weather_code: u8) -> DrivingAdvisory {
    if precipitation_sum_mm > WET_ROAD_PRECIPITATION_MM || weather_code >= WET_WEATHER_CODE {
        DrivingAdvisory::Caution
    } else {
        DrivingAdvisory::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(38.0, ClothingAdvice::Hot)]
    #[case(25.01, ClothingAdvice::Hot)]
    #[case(25.0, ClothingAdvice::Warm)]
    #[case(20.0, ClothingAdvice::Mild)]
    #[case(17.3, ClothingAdvice::Mild)]
    #[case(15.0, ClothingAdvice::Cool)]
    #[case(10.0, ClothingAdvice::Cold)]
    #[case(-5.0, ClothingAdvice::Cold)]
    fn test_clothing_brackets(#[case] temperature: f64, #[case] expected: ClothingAdvice) {
        assert_eq!(clothing_advice(temperature), expected);
    }

    #[test]
    fn test_clothing_is_total() {
        assert_eq!(clothing_advice(f64::NAN), ClothingAdvice::Cold);
        assert_eq!(clothing_advice(f64::INFINITY), ClothingAdvice::Hot);
        assert_eq!(clothing_advice(f64::NEG_INFINITY), ClothingAdvice::Cold);
    }

    #[rstest]
    #[case(0.5, 50, DrivingAdvisory::Normal)]
    #[case(0.51, 50, DrivingAdvisory::Caution)]
    #[case(0.0, 51, DrivingAdvisory::Caution)]
    #[case(0.0, 0, DrivingAdvisory::Normal)]
    #[case(12.0, 95, DrivingAdvisory::Caution)]
    fn test_driving_rule(
        #[case] precipitation: f64,
        #[case] code: u8,
        #[case] expected: DrivingAdvisory,
    ) {
        assert_eq!(driving_advisory(precipitation, code), expected);
    }

    #[test]
    fn test_texts_are_distinct() {
        let all = [
            ClothingAdvice::Hot,
            ClothingAdvice::Warm,
            ClothingAdvice::Mild,
            ClothingAdvice::Cool,
            ClothingAdvice::Cold,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.text(), b.text());
            }
        }
        assert_eq!(DrivingAdvisory::Caution.to_string(), "Wet road! Drive carefully.");
    }
}

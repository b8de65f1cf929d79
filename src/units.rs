//! Unit conversion and formatting
//!
//! Pure functions turning raw OpenWeatherMap values into display units.
//! Nothing in here performs I/O or keeps state.

use crate::error::CategoryKind;
use crate::{Result, WeatherAppError};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// hPa per inch of mercury
const HPA_PER_INHG: f64 = 33.86;
/// Miles per meter
const MILES_PER_METER: f64 = 0.000_621_37;
/// Width of one compass sector
const SECTOR_DEGREES: f64 = 22.5;

const CARDINALS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Round `value` to `places` decimal places, ties to even (12.5 -> 12)
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let multiplier = 10_f64.powi(places);
    (value * multiplier).round_ties_even() / multiplier
}

/// Convert hectopascals to inches of mercury, rounded to 2 decimals
#[must_use]
pub fn hpa_to_inhg(hpa: f64) -> f64 {
    round_to(hpa / HPA_PER_INHG, 2)
}

/// Convert meters to miles, rounded to 1 decimal
#[must_use]
pub fn meters_to_miles(meters: f64) -> f64 {
    round_to(meters * MILES_PER_METER, 1)
}

/// Convert a wind direction in degrees to one of 16 compass points.
///
/// Each sector is 22.5° wide and centered on its point, so "N" covers
/// [348.75, 11.25). Any finite angle is accepted; it wraps at 360°.
/// NaN and infinities have no direction and come back as "N".
#[must_use]
pub fn degrees_to_cardinal(degrees: f64) -> &'static str {
    let normalized = degrees.rem_euclid(360.0);
    let index = ((normalized + SECTOR_DEGREES / 2.0) / SECTOR_DEGREES).floor() as usize;
    CARDINALS[index % CARDINALS.len()]
}

/// UV exposure bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UvCategory {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl UvCategory {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::VeryHigh => "Very High",
            Self::Extreme => "Extreme",
        }
    }
}

impl fmt::Display for UvCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a UV index. Negative or NaN readings are rejected.
pub fn uv_category(uvi: f64) -> Result<UvCategory> {
    match uvi {
        v if v.is_nan() || v < 0.0 => Err(WeatherAppError::unmapped(CategoryKind::UvIndex, uvi)),
        v if v < 3.0 => Ok(UvCategory::Low),
        v if v < 6.0 => Ok(UvCategory::Moderate),
        v if v < 8.0 => Ok(UvCategory::High),
        v if v < 11.0 => Ok(UvCategory::VeryHigh),
        _ => Ok(UvCategory::Extreme),
    }
}

/// OpenWeatherMap air quality bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AqiCategory {
    Good,
    Fair,
    Moderate,
    Poor,
    VeryPoor,
}

impl AqiCategory {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Moderate => "Moderate",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
        }
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Map the provider's 1-5 AQI to its category; anything else is an error.
pub fn aqi_category(aqi: i64) -> Result<AqiCategory> {
    match aqi {
        1 => Ok(AqiCategory::Good),
        2 => Ok(AqiCategory::Fair),
        3 => Ok(AqiCategory::Moderate),
        4 => Ok(AqiCategory::Poor),
        5 => Ok(AqiCategory::VeryPoor),
        other => Err(WeatherAppError::unmapped(CategoryKind::AirQuality, other)),
    }
}

/// Build a UTC offset from the provider's `timezone_offset` seconds
pub fn utc_offset(seconds: i32) -> Result<FixedOffset> {
    FixedOffset::east_opt(seconds).ok_or_else(|| {
        WeatherAppError::invalid_response(
            "OneCall",
            format!("timezone offset out of range: {seconds}s"),
        )
    })
}

/// Turn an epoch timestamp into a time at the given offset
pub fn timestamp_at(epoch_seconds: i64, offset: FixedOffset) -> Result<DateTime<FixedOffset>> {
    DateTime::from_timestamp(epoch_seconds, 0)
        .map(|utc| utc.with_timezone(&offset))
        .ok_or_else(|| {
            WeatherAppError::invalid_response(
                "OneCall",
                format!("timestamp out of range: {epoch_seconds}"),
            )
        })
}

/// Full date and time, e.g. `07/04/2021 02:05 PM`
#[must_use]
pub fn format_datetime(time: &DateTime<FixedOffset>) -> String {
    time.format("%m/%d/%Y %I:%M %p").to_string()
}

/// Hour only, for hourly views, e.g. `2 PM`
#[must_use]
pub fn format_hour(time: &DateTime<FixedOffset>) -> String {
    time.format("%-I %p").to_string()
}

/// Date only, for daily views, e.g. `Sun 07/04`
#[must_use]
pub fn format_day(time: &DateTime<FixedOffset>) -> String {
    time.format("%a %m/%d").to_string()
}

/// Capitalize the first letter of every word: "light rain" -> "Light Rain"
#[must_use]
pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1013.0, 29.92)]
    #[case(1000.0, 29.53)]
    #[case(33.86, 1.0)]
    #[case(0.0, 0.0)]
    fn test_hpa_to_inhg(#[case] hpa: f64, #[case] expected: f64) {
        assert_eq!(hpa_to_inhg(hpa), expected);
        assert_eq!(hpa_to_inhg(hpa), round_to(hpa / 33.86, 2));
    }

    #[rstest]
    #[case(12.5, 0, 12.0)]
    #[case(13.5, 0, 14.0)]
    #[case(0.5, 0, 0.0)]
    #[case(2.47, 1, 2.5)]
    #[case(61.7994, 3, 61.799)]
    fn test_round_to_ties_to_even(#[case] value: f64, #[case] places: i32, #[case] expected: f64) {
        assert_eq!(round_to(value, places), expected);
    }

    #[rstest]
    #[case(10000.0, 6.2)]
    #[case(1609.34, 1.0)]
    #[case(0.0, 0.0)]
    #[case(250.0, 0.2)]
    fn test_meters_to_miles(#[case] meters: f64, #[case] expected: f64) {
        assert_eq!(meters_to_miles(meters), expected);
    }

    #[rstest]
    #[case(0.0, "N")]
    #[case(11.24, "N")]
    #[case(11.25, "NNE")]
    #[case(33.74, "NNE")]
    #[case(33.75, "NE")]
    #[case(90.0, "E")]
    #[case(180.0, "S")]
    #[case(202.5, "SSW")]
    #[case(270.0, "W")]
    #[case(348.74, "NNW")]
    #[case(348.75, "N")]
    #[case(359.9, "N")]
    #[case(360.0, "N")]
    #[case(-90.0, "W")]
    #[case(f64::NAN, "N")]
    #[case(f64::INFINITY, "N")]
    #[case(f64::NEG_INFINITY, "N")]
    fn test_degrees_to_cardinal(#[case] degrees: f64, #[case] expected: &str) {
        assert_eq!(degrees_to_cardinal(degrees), expected);
    }

    #[test]
    fn test_cardinal_is_periodic() {
        let mut degrees = -720.0;
        while degrees <= 720.0 {
            assert_eq!(
                degrees_to_cardinal(degrees),
                degrees_to_cardinal(degrees + 360.0),
                "mismatch at {degrees}"
            );
            degrees += 0.75;
        }
    }

    #[test]
    fn test_cardinal_covers_all_sixteen_points() {
        for (i, expected) in CARDINALS.iter().enumerate() {
            assert_eq!(degrees_to_cardinal(i as f64 * 22.5), *expected);
        }
    }

    #[rstest]
    #[case(1, AqiCategory::Good, "Good")]
    #[case(2, AqiCategory::Fair, "Fair")]
    #[case(3, AqiCategory::Moderate, "Moderate")]
    #[case(4, AqiCategory::Poor, "Poor")]
    #[case(5, AqiCategory::VeryPoor, "Very Poor")]
    fn test_aqi_category(#[case] aqi: i64, #[case] category: AqiCategory, #[case] label: &str) {
        let mapped = aqi_category(aqi).unwrap();
        assert_eq!(mapped, category);
        assert_eq!(mapped.label(), label);
    }

    #[rstest]
    #[case(0)]
    #[case(6)]
    #[case(-1)]
    #[case(255)]
    fn test_aqi_category_rejects_unknown(#[case] aqi: i64) {
        assert!(matches!(
            aqi_category(aqi),
            Err(WeatherAppError::UnmappedCategory {
                kind: CategoryKind::AirQuality,
                ..
            })
        ));
    }

    #[rstest]
    #[case(0.0, UvCategory::Low)]
    #[case(2.99, UvCategory::Low)]
    #[case(3.0, UvCategory::Moderate)]
    #[case(5.5, UvCategory::Moderate)]
    #[case(6.0, UvCategory::High)]
    #[case(8.0, UvCategory::VeryHigh)]
    #[case(10.9, UvCategory::VeryHigh)]
    #[case(11.0, UvCategory::Extreme)]
    #[case(14.2, UvCategory::Extreme)]
    fn test_uv_category(#[case] uvi: f64, #[case] expected: UvCategory) {
        assert_eq!(uv_category(uvi).unwrap(), expected);
    }

    #[test]
    fn test_uv_category_rejects_negative_and_nan() {
        assert!(uv_category(-0.1).is_err());
        assert!(uv_category(f64::NAN).is_err());
    }

    #[test]
    fn test_timestamp_formats() {
        let offset = utc_offset(-5 * 3600).unwrap();
        // 2021-07-04T19:05:00Z
        let time = timestamp_at(1_625_425_500, offset).unwrap();
        assert_eq!(format_datetime(&time), "07/04/2021 02:05 PM");
        assert_eq!(format_hour(&time), "2 PM");
        assert_eq!(format_day(&time), "Sun 07/04");
    }

    #[test]
    fn test_formatting_is_idempotent() {
        let offset = utc_offset(3600).unwrap();
        let time = timestamp_at(1_700_000_000, offset).unwrap();
        assert_eq!(format_datetime(&time), format_datetime(&time));
        assert_eq!(hpa_to_inhg(1021.0), hpa_to_inhg(1021.0));
        assert_eq!(degrees_to_cardinal(123.0), degrees_to_cardinal(123.0));
    }

    #[test]
    fn test_utc_offset_rejects_out_of_range() {
        assert!(utc_offset(100_000).is_err());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("light rain"), "Light Rain");
        assert_eq!(title_case("overcast clouds"), "Overcast Clouds");
        assert_eq!(title_case(""), "");
    }
}

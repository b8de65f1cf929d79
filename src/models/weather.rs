//! Converted weather records
//!
//! Everything here is already in display units (°F, mph, inHg, miles) and
//! carries timestamps at the location's own UTC offset.

use super::openweather::{
    AirPollutionEntry, Condition, CurrentBlock, DailyBlock, HourlyBlock, OneCallResponse,
};
use crate::Result;
use crate::units::{self, AqiCategory, UvCategory};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Current conditions at the resolved location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Time of data calculation
    pub observed_at: DateTime<FixedOffset>,
    /// Title-cased description, e.g. "Few Clouds"
    pub description: String,
    /// °F
    pub temperature: f64,
    /// °F
    pub feels_like: f64,
    /// Percent
    pub humidity: u8,
    /// mph
    pub wind_speed: f64,
    /// Degrees, meteorological (direction the wind comes from)
    pub wind_degrees: f64,
    pub wind_cardinal: String,
    /// inHg
    pub pressure: f64,
    /// Percent
    pub cloud_cover: u8,
    pub uv_index: f64,
    pub uv_category: UvCategory,
    /// Miles
    pub visibility: Option<f64>,
    pub sunrise: Option<DateTime<FixedOffset>>,
    pub sunset: Option<DateTime<FixedOffset>>,
    /// Provider icon identifier, e.g. "10d"
    pub icon: Option<String>,
}

impl CurrentConditions {
    /// Convert the raw `current` block
    pub fn from_openweather(block: &CurrentBlock, offset: FixedOffset) -> Result<Self> {
        let condition = block.weather.first();
        let optional_time = |epoch: Option<i64>| -> Result<Option<DateTime<FixedOffset>>> {
            epoch.map(|e| units::timestamp_at(e, offset)).transpose()
        };

        Ok(Self {
            observed_at: units::timestamp_at(block.dt, offset)?,
            description: long_description(condition),
            temperature: block.temp,
            feels_like: block.feels_like,
            humidity: block.humidity,
            wind_speed: block.wind_speed,
            wind_degrees: block.wind_deg,
            wind_cardinal: units::degrees_to_cardinal(block.wind_deg).to_string(),
            pressure: units::hpa_to_inhg(block.pressure),
            cloud_cover: block.clouds,
            uv_index: block.uvi,
            uv_category: units::uv_category(block.uvi)?,
            visibility: block.visibility.map(units::meters_to_miles),
            sunrise: optional_time(block.sunrise)?,
            sunset: optional_time(block.sunset)?,
            icon: condition.map(|c| c.icon.clone()),
        })
    }
}

/// One hour of the 48-hour forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecastEntry {
    pub time: DateTime<FixedOffset>,
    /// °F
    pub temperature: f64,
    /// Percent
    pub humidity: u8,
    /// mph
    pub wind_speed: f64,
    /// Condition group, e.g. "Rain"
    pub summary: String,
    /// Title-cased detail, e.g. "Light Rain"
    pub description: String,
}

impl HourlyForecastEntry {
    pub fn from_openweather(block: &HourlyBlock, offset: FixedOffset) -> Result<Self> {
        let condition = block.weather.first();
        Ok(Self {
            time: units::timestamp_at(block.dt, offset)?,
            temperature: block.temp,
            humidity: block.humidity,
            wind_speed: block.wind_speed,
            summary: condition.map(|c| c.main.clone()).unwrap_or_default(),
            description: long_description(condition),
        })
    }
}

/// One day of the 7-day forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastEntry {
    pub date: DateTime<FixedOffset>,
    /// °F
    pub max_temperature: f64,
    /// °F
    pub min_temperature: f64,
    /// mph
    pub wind_speed: f64,
    pub description: String,
}

impl DailyForecastEntry {
    pub fn from_openweather(block: &DailyBlock, offset: FixedOffset) -> Result<Self> {
        Ok(Self {
            date: units::timestamp_at(block.dt, offset)?,
            max_temperature: block.temp.max,
            min_temperature: block.temp.min,
            wind_speed: block.wind_speed,
            description: long_description(block.weather.first()),
        })
    }
}

/// Air quality reading with concentrations rounded the way AQI reporting truncates them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQuality {
    /// 1 (good) to 5 (very poor)
    pub aqi: u8,
    pub category: AqiCategory,
    /// µg/m³, 3 decimals
    pub ozone: f64,
    /// µg/m³, 1 decimal
    pub pm2_5: f64,
    /// µg/m³, whole number
    pub pm10: f64,
    /// µg/m³, 1 decimal
    pub carbon_monoxide: f64,
    /// µg/m³, whole number
    pub sulphur_dioxide: f64,
    /// µg/m³, whole number
    pub nitrogen_dioxide: f64,
}

impl AirQuality {
    pub fn from_openweather(entry: &AirPollutionEntry) -> Result<Self> {
        let category = units::aqi_category(entry.main.aqi)?;
        let components = &entry.components;
        Ok(Self {
            // aqi_category only accepts 1..=5
            aqi: entry.main.aqi as u8,
            category,
            ozone: units::round_to(components.o3, 3),
            pm2_5: units::round_to(components.pm2_5, 1),
            pm10: units::round_to(components.pm10, 0),
            carbon_monoxide: units::round_to(components.co, 1),
            sulphur_dioxide: units::round_to(components.so2, 0),
            nitrogen_dioxide: units::round_to(components.no2, 0),
        })
    }
}

/// Everything the One Call endpoint returned, converted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// IANA zone name of the forecast location, when the provider sends it
    pub timezone: Option<String>,
    /// Seconds east of UTC at the forecast location
    pub utc_offset_seconds: i32,
    pub current: CurrentConditions,
    pub hourly: Vec<HourlyForecastEntry>,
    pub daily: Vec<DailyForecastEntry>,
}

impl WeatherReport {
    pub fn from_openweather(response: &OneCallResponse) -> Result<Self> {
        let offset = units::utc_offset(response.timezone_offset)?;

        let hourly = response
            .hourly
            .iter()
            .map(|block| HourlyForecastEntry::from_openweather(block, offset))
            .collect::<Result<Vec<_>>>()?;

        let daily = response
            .daily
            .iter()
            .map(|block| DailyForecastEntry::from_openweather(block, offset))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            timezone: response.timezone.clone(),
            utc_offset_seconds: response.timezone_offset,
            current: CurrentConditions::from_openweather(&response.current, offset)?,
            hourly,
            daily,
        })
    }
}

fn long_description(condition: Option<&Condition>) -> String {
    condition
        .map(|c| units::title_case(&c.description))
        .unwrap_or_default()
}

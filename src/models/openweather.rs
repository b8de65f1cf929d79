//! Wire shapes of the OpenWeatherMap and Nominatim responses
//!
//! Only the fields the client reads are declared; serde ignores the rest.

use serde::Deserialize;

/// `GET /weather?q=...` response; only the coordinates are used
#[derive(Debug, Deserialize)]
pub struct CurrentByNameResponse {
    pub coord: Coord,
}

#[derive(Debug, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

/// One Call response with `exclude=minutely`
#[derive(Debug, Deserialize)]
pub struct OneCallResponse {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub timezone: Option<String>,
    /// Seconds east of UTC for the requested location
    #[serde(default)]
    pub timezone_offset: i32,
    pub current: CurrentBlock,
    #[serde(default)]
    pub hourly: Vec<HourlyBlock>,
    #[serde(default)]
    pub daily: Vec<DailyBlock>,
}

#[derive(Debug, Deserialize)]
pub struct Condition {
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Deserialize)]
pub struct CurrentBlock {
    pub dt: i64,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
    pub temp: f64,
    pub feels_like: f64,
    /// hPa
    pub pressure: f64,
    pub humidity: u8,
    pub uvi: f64,
    pub clouds: u8,
    /// Meters; absent for some stations
    pub visibility: Option<f64>,
    pub wind_speed: f64,
    pub wind_deg: f64,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
pub struct HourlyBlock {
    pub dt: i64,
    pub temp: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
pub struct DailyTemp {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Deserialize)]
pub struct DailyBlock {
    pub dt: i64,
    pub temp: DailyTemp,
    pub wind_speed: f64,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

/// `GET /air_pollution` response
#[derive(Debug, Deserialize)]
pub struct AirPollutionResponse {
    #[serde(default)]
    pub list: Vec<AirPollutionEntry>,
}

#[derive(Debug, Deserialize)]
pub struct AirPollutionEntry {
    pub main: AirPollutionMain,
    pub components: Components,
}

#[derive(Debug, Deserialize)]
pub struct AirPollutionMain {
    pub aqi: i64,
}

/// Pollutant concentrations in µg/m³
#[derive(Debug, Deserialize)]
pub struct Components {
    pub co: f64,
    pub no2: f64,
    pub o3: f64,
    pub so2: f64,
    pub pm2_5: f64,
    pub pm10: f64,
}

/// Nominatim `/reverse` response
#[derive(Debug, Deserialize)]
pub struct ReverseGeocodeResponse {
    pub display_name: Option<String>,
    pub error: Option<String>,
}

//! Canned HTTP responses and JSON fixtures for unit tests

use crate::api::{HttpReply, HttpTransport};
use crate::config::OneCallConfig;
use crate::{Result, WeatherAppError};
use serde_json::{Value, json};
use std::cell::RefCell;

/// Start of the fixture forecast: 2021-07-04T00:00:00Z
pub const BASE_EPOCH: i64 = 1_625_356_800;

/// Replies to any URL containing a registered fragment; everything else fails
/// as if the network were down.
#[derive(Default)]
pub struct CannedTransport {
    routes: Vec<(String, HttpReply)>,
    requests: RefCell<Vec<String>>,
}

impl CannedTransport {
    pub fn json(self, fragment: &str, status: u16, body: Value) -> Self {
        self.raw(fragment, status, body.to_string().into_bytes())
    }

    pub fn raw(mut self, fragment: &str, status: u16, body: Vec<u8>) -> Self {
        self.routes
            .push((fragment.to_string(), HttpReply { status, body }));
        self
    }

    /// URLs requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl HttpTransport for CannedTransport {
    fn get(&self, url: &str) -> Result<HttpReply> {
        self.requests.borrow_mut().push(url.to_string());
        self.routes
            .iter()
            .find(|(fragment, _)| url.contains(fragment.as_str()))
            .map(|(_, reply)| reply.clone())
            .ok_or_else(|| WeatherAppError::transport("canned", "connection refused"))
    }
}

pub fn config() -> OneCallConfig {
    let mut config = OneCallConfig::default();
    config.weather.api_key = Some("test-api-key-123".to_string());
    config
}

pub fn by_name_json(lat: f64, lon: f64) -> Value {
    json!({
        "coord": {"lon": lon, "lat": lat},
        "weather": [{"id": 802, "main": "Clouds", "description": "scattered clouds", "icon": "03d"}],
        "name": "Somewhere",
        "cod": 200
    })
}

pub fn reverse_json(address: &str) -> Value {
    json!({"place_id": 1, "display_name": address})
}

pub fn one_call_json(lat: f64, lon: f64) -> Value {
    let condition = json!([
        {"id": 802, "main": "Clouds", "description": "scattered clouds", "icon": "03d"}
    ]);

    let hourly: Vec<Value> = (0..48)
        .map(|hour| {
            json!({
                "dt": BASE_EPOCH + hour * 3600,
                "temp": 60.0 + hour as f64,
                "feels_like": 59.0,
                "pressure": 1013,
                "humidity": 40,
                "wind_speed": 5.5,
                "wind_deg": 180,
                "weather": condition
            })
        })
        .collect();

    let daily: Vec<Value> = (0..7)
        .map(|day| {
            json!({
                "dt": BASE_EPOCH + day * 86_400 + 18 * 3600,
                "temp": {"day": 75.0, "min": 55.0 + day as f64, "max": 80.0 + day as f64},
                "wind_speed": 7.25,
                "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}]
            })
        })
        .collect();

    json!({
        "lat": lat,
        "lon": lon,
        "timezone": "America/Denver",
        "timezone_offset": -21600,
        "current": {
            "dt": BASE_EPOCH + 68_700,
            "sunrise": BASE_EPOCH + 40_000,
            "sunset": BASE_EPOCH + 95_000,
            "temp": 72.5,
            "feels_like": 71.2,
            "pressure": 1013,
            "humidity": 45,
            "uvi": 4.2,
            "clouds": 40,
            "visibility": 10000,
            "wind_speed": 8.1,
            "wind_deg": 90,
            "weather": condition
        },
        "hourly": hourly,
        "daily": daily
    })
}

pub fn air_pollution_json(aqi: i64) -> Value {
    json!({
        "coord": {"lon": 0, "lat": 0},
        "list": [{
            "main": {"aqi": aqi},
            "components": {
                "co": 230.31, "no": 0.0, "no2": 3.21, "o3": 61.799,
                "so2": 0.52, "pm2_5": 2.47, "pm10": 3.6, "nh3": 0.1
            },
            "dt": BASE_EPOCH
        }]
    })
}

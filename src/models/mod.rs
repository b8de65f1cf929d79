//! Data models for the OneCall weather client
//!
//! This module contains the core domain models organized by concern:
//! - Location: coordinates and the confirmed address
//! - Weather: converted current conditions, forecasts and air quality
//! - OpenWeather: raw response shapes as they come off the wire

pub mod location;
pub mod openweather;
pub mod weather;

// Re-export all public types for convenient access
pub use location::{Coordinates, ResolvedLocation};
pub use weather::{
    AirQuality, CurrentConditions, DailyForecastEntry, HourlyForecastEntry, WeatherReport,
};

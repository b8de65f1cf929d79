//! `OneCall Weather` - current conditions, forecasts and air quality
//!
//! This library resolves a typed location to coordinates and an address,
//! fetches OpenWeatherMap One Call and air pollution data for it, converts
//! the raw values to display units and builds display-ready records.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod location_resolver;
pub mod models;
pub mod presenter;
pub mod session;
pub mod units;
pub mod weather;

#[cfg(test)]
mod test_support;

// Re-export core types for public API
pub use api::{HttpReply, HttpTransport, ReqwestTransport, WeatherApiClient, WeatherIcon};
pub use config::OneCallConfig;
pub use error::{CategoryKind, WeatherAppError};
pub use location_resolver::LocationResolver;
pub use models::{
    AirQuality, Coordinates, CurrentConditions, DailyForecastEntry, HourlyForecastEntry,
    ResolvedLocation, WeatherReport,
};
pub use presenter::{CurrentConditionsView, WindIndicator};
pub use session::{Session, SessionState, WeatherSnapshot};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherAppError>;

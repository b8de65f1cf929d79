//! Configuration management for the OneCall weather client
//!
//! Handles loading configuration from an optional TOML file and environment
//! variables, and validates everything before a client is built.

use crate::{Result, WeatherAppError};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OneCallConfig {
    /// OpenWeatherMap settings
    pub weather: WeatherConfig,
    /// Reverse geocoding settings
    pub geocoding: GeocodingConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// OpenWeatherMap API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key
    pub api_key: Option<String>,
    /// Base URL for the weather-by-name and air pollution endpoints
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Full URL of the One Call endpoint
    #[serde(default = "default_one_call_url")]
    pub one_call_url: String,
    /// Base URL for condition icons
    #[serde(default = "default_icon_base_url")]
    pub icon_base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
}

/// Reverse geocoding (Nominatim) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Base URL of the Nominatim instance
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,
    /// User agent sent with every request; Nominatim rejects anonymous clients
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_one_call_url() -> String {
    "https://api.openweathermap.org/data/3.0/onecall".to_string()
}

fn default_icon_base_url() -> String {
    "http://openweathermap.org/img/wn".to_string()
}

fn default_weather_timeout() -> u32 {
    30
}

fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_user_agent() -> String {
    format!("onecall-weather/{}", crate::VERSION)
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            one_call_url: default_one_call_url(),
            icon_base_url: default_icon_base_url(),
            timeout_seconds: default_weather_timeout(),
        }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl OneCallConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // ONECALL__WEATHER__API_KEY -> weather.api_key
        builder = builder.add_source(Environment::with_prefix("ONECALL").separator("__"));

        let settings = builder.build().map_err(|e| {
            WeatherAppError::config(format!("Failed to build configuration: {e}"))
        })?;

        let mut config: OneCallConfig = settings.try_deserialize().map_err(|e| {
            WeatherAppError::config(format!("Failed to deserialize configuration: {e}"))
        })?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("onecall").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.one_call_url.is_empty() {
            self.weather.one_call_url = default_one_call_url();
        }
        if self.weather.icon_base_url.is_empty() {
            self.weather.icon_base_url = default_icon_base_url();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_weather_timeout();
        }
        if self.geocoding.base_url.is_empty() {
            self.geocoding.base_url = default_geocoding_base_url();
        }
        if self.geocoding.user_agent.is_empty() {
            self.geocoding.user_agent = default_user_agent();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_key()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// The API key, once validation has passed
    pub fn api_key(&self) -> Result<&str> {
        self.weather
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                WeatherAppError::config(
                    "OpenWeatherMap API key is required. Set ONECALL__WEATHER__API_KEY or add it to the config file.",
                )
            })
    }

    /// Validate the API key
    pub fn validate_api_key(&self) -> Result<()> {
        let api_key = self.api_key()?;

        if api_key.len() < 8 {
            return Err(WeatherAppError::config(
                "Weather API key appears to be invalid (too short). Please check your API key.",
            ));
        }

        if api_key.len() > 100 {
            return Err(WeatherAppError::config(
                "Weather API key appears to be invalid (too long). Please check your API key.",
            ));
        }

        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds > 300 {
            return Err(WeatherAppError::config(
                "Weather API timeout cannot exceed 300 seconds",
            ));
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WeatherAppError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            )));
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WeatherAppError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            )));
        }

        let urls = [
            ("weather.base_url", &self.weather.base_url),
            ("weather.one_call_url", &self.weather.one_call_url),
            ("weather.icon_base_url", &self.weather.icon_base_url),
            ("geocoding.base_url", &self.geocoding.base_url),
        ];
        for (name, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(WeatherAppError::config(format!(
                    "{name} must be a valid HTTP or HTTPS URL"
                )));
            }
        }

        Ok(())
    }
}

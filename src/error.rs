//! Error types and handling for the OneCall weather client

use std::fmt;
use thiserror::Error;

/// Which category table rejected a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    /// Air Quality Index (1-5)
    AirQuality,
    /// UV index
    UvIndex,
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryKind::AirQuality => write!(f, "AQI"),
            CategoryKind::UvIndex => write!(f, "UV index"),
        }
    }
}

/// Main error type for the weather client
#[derive(Error, Debug)]
pub enum WeatherAppError {
    /// The user submitted something that cannot be looked up
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// The weather-by-name lookup answered with a non-200 status
    #[error("Location '{location}' not found (HTTP {status})")]
    InvalidLocation { location: String, status: u16 },

    /// Network failure, or a non-success status from any other endpoint
    #[error("Transport failure calling {endpoint}: {message}")]
    Transport { endpoint: String, message: String },

    /// The body arrived but could not be used
    #[error("Invalid response from {endpoint}: {message}")]
    InvalidResponse { endpoint: String, message: String },

    /// A value fell outside every known category band
    #[error("Unmapped {kind} value: {value}")]
    UnmappedCategory { kind: CategoryKind, value: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl WeatherAppError {
    /// Create a new input validation error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a new invalid-location error
    pub fn invalid_location<S: Into<String>>(location: S, status: u16) -> Self {
        Self::InvalidLocation {
            location: location.into(),
            status,
        }
    }

    /// Create a new transport error
    pub fn transport<E: Into<String>, M: Into<String>>(endpoint: E, message: M) -> Self {
        Self::Transport {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Create a new invalid-response error
    pub fn invalid_response<E: Into<String>, M: Into<String>>(endpoint: E, message: M) -> Self {
        Self::InvalidResponse {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Create a new unmapped-category error
    pub fn unmapped<V: ToString>(kind: CategoryKind, value: V) -> Self {
        Self::UnmappedCategory {
            kind,
            value: value.to_string(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether the user should simply try another location
    #[must_use]
    pub fn is_invalid_location(&self) -> bool {
        matches!(self, Self::InvalidLocation { .. } | Self::InvalidInput { .. })
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherAppError::InvalidInput { message } => {
                format!("{message}\nPlease try again.")
            }
            WeatherAppError::InvalidLocation { status, .. } => format!(
                "The response status code for the location lookup was: {status}\n\
                 You may have typed an invalid location.\nPlease try again."
            ),
            WeatherAppError::Transport { endpoint, .. } => format!(
                "Sorry, there was a problem connecting with {endpoint}.\nPlease try again."
            ),
            WeatherAppError::InvalidResponse { endpoint, .. } => format!(
                "{endpoint} sent data we could not read.\nPlease try again."
            ),
            WeatherAppError::UnmappedCategory { kind, value } => {
                format!("Received an {kind} value we cannot classify: {value}")
            }
            WeatherAppError::Config { .. } => {
                "Configuration error. Please check your config file and API key.".to_string()
            }
            WeatherAppError::Io { .. } => "Terminal input/output failed.".to_string(),
        }
    }
}

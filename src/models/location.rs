//! Location model for geographic coordinates and the confirmed address

use serde::{Deserialize, Serialize};

/// Latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// A free-text query together with where it resolved to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    /// What the user typed
    pub query: String,
    pub coordinates: Coordinates,
    /// Reverse-geocoded address, shown to confirm the lookup hit the right place
    pub address: String,
}

impl ResolvedLocation {
    #[must_use]
    pub fn new(query: String, coordinates: Coordinates, address: String) -> Self {
        Self {
            query,
            coordinates,
            address,
        }
    }
}

//! Location Resolution Module
//!
//! Turns the free-text location the user typed into coordinates and a
//! confirmed address. Two chained calls: the weather-by-name endpoint for
//! coordinates, then reverse geocoding for the address.

use crate::api::{HttpTransport, WeatherApiClient};
use crate::models::ResolvedLocation;
use crate::{Result, WeatherAppError};
use tracing::debug;

/// Service for resolving location inputs
pub struct LocationResolver;

impl LocationResolver {
    /// Resolve a location query into coordinates plus a confirmed address.
    ///
    /// Nothing outside the returned value is touched, so a failure here
    /// leaves whatever the caller was showing intact.
    pub fn resolve<T: HttpTransport>(
        api_client: &WeatherApiClient<T>,
        query: &str,
    ) -> Result<ResolvedLocation> {
        let query = Self::normalize(query)?;
        debug!("Resolving location input: {:?}", query);

        let coordinates = api_client.lookup_coordinates(&query)?;
        let address = api_client.reverse_geocode(coordinates)?;

        debug!(
            "Resolved location: {} at ({}, {})",
            address, coordinates.latitude, coordinates.longitude
        );

        Ok(ResolvedLocation::new(query, coordinates, address))
    }

    /// Trim the query and reject blank input
    pub fn normalize(query: &str) -> Result<String> {
        let query = query.trim();
        if query.is_empty() {
            return Err(WeatherAppError::invalid_input("Location cannot be empty."));
        }
        Ok(query.to_string())
    }
}

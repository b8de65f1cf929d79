//! Query session
//!
//! Owns the one snapshot currently on display. A query either replaces it
//! wholesale or leaves it exactly as it was.

use crate::api::{HttpTransport, WeatherApiClient, WeatherIcon};
use crate::location_resolver::LocationResolver;
use crate::models::{AirQuality, ResolvedLocation, WeatherReport};
use crate::weather;
use crate::Result;
use chrono::{DateTime, Utc};
use std::time::Instant;
use tracing::{info, instrument, warn};

/// Everything displayed for one successful query
#[derive(Debug, Clone)]
pub struct WeatherSnapshot {
    pub location: ResolvedLocation,
    pub report: WeatherReport,
    pub air_quality: Option<AirQuality>,
    pub icon: Option<WeatherIcon>,
    /// Non-fatal problems hit while building this snapshot
    pub notices: Vec<String>,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingInput,
    DisplayingResults,
}

#[derive(Debug)]
pub struct Session {
    state: SessionState,
    snapshot: Option<WeatherSnapshot>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: SessionState::AwaitingInput,
            snapshot: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The snapshot from the most recent successful query
    #[must_use]
    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    /// Run the whole pipeline for `query`.
    ///
    /// On error the state returns to [`SessionState::AwaitingInput`] and the
    /// previous snapshot, if any, stays in place.
    #[instrument(skip(self, api_client))]
    pub fn submit<T: HttpTransport>(
        &mut self,
        api_client: &WeatherApiClient<T>,
        query: &str,
    ) -> Result<&WeatherSnapshot> {
        let start_time = Instant::now();

        match Self::build_snapshot(api_client, query) {
            Ok(snapshot) => {
                info!(
                    "Loaded weather for {} in {:?}",
                    snapshot.location.address,
                    start_time.elapsed()
                );
                self.state = SessionState::DisplayingResults;
                Ok(&*self.snapshot.insert(snapshot))
            }
            Err(e) => {
                warn!("Query {:?} failed: {}", query, e);
                self.state = SessionState::AwaitingInput;
                Err(e)
            }
        }
    }

    fn build_snapshot<T: HttpTransport>(
        api_client: &WeatherApiClient<T>,
        query: &str,
    ) -> Result<WeatherSnapshot> {
        let location = LocationResolver::resolve(api_client, query)?;
        let bundle = weather::fetch_all(api_client, location.coordinates)?;

        Ok(WeatherSnapshot {
            location,
            report: bundle.report,
            air_quality: bundle.air_quality,
            icon: bundle.icon,
            notices: bundle.notices,
            fetched_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{self, CannedTransport};
    use crate::WeatherAppError;

    fn client(transport: CannedTransport) -> WeatherApiClient<CannedTransport> {
        WeatherApiClient::with_transport(&test_support::config(), transport).unwrap()
    }

    fn working_transport() -> CannedTransport {
        CannedTransport::default()
            .json("q=Cheyenne", 200, test_support::by_name_json(41.14, -104.82))
            .json("q=Atlantis", 404, serde_json::json!({"cod": "404"}))
            .json(
                "/reverse?",
                200,
                test_support::reverse_json("Cheyenne, Laramie County, Wyoming, United States"),
            )
            .json("/onecall?", 200, test_support::one_call_json(41.14, -104.82))
            .json("/air_pollution?", 200, test_support::air_pollution_json(1))
            .raw(".png", 200, vec![0x89, 0x50])
    }

    #[test]
    fn test_new_session_awaits_input() {
        let session = Session::new();
        assert_eq!(session.state(), SessionState::AwaitingInput);
        assert!(session.snapshot().is_none());
    }

    #[test]
    fn test_successful_query_displays_results() {
        let client = client(working_transport());
        let mut session = Session::new();

        let snapshot = session.submit(&client, "Cheyenne, WY").unwrap();
        assert_eq!(
            snapshot.location.address,
            "Cheyenne, Laramie County, Wyoming, United States"
        );
        assert_eq!(snapshot.report.daily.len(), 7);
        assert!(snapshot.air_quality.is_some());
        assert_eq!(session.state(), SessionState::DisplayingResults);
    }

    #[test]
    fn test_failed_query_keeps_previous_snapshot() {
        let client = client(working_transport());
        let mut session = Session::new();
        session.submit(&client, "Cheyenne, WY").unwrap();
        let before = session.snapshot().unwrap().clone();

        let err = session.submit(&client, "Atlantis").unwrap_err();
        assert!(matches!(err, WeatherAppError::InvalidLocation { status: 404, .. }));
        assert_eq!(session.state(), SessionState::AwaitingInput);

        let after = session.snapshot().unwrap();
        assert_eq!(after.location, before.location);
        assert_eq!(after.report, before.report);
        assert_eq!(after.fetched_at, before.fetched_at);
    }

    #[test]
    fn test_empty_query_rejected_without_state_change_to_results() {
        let client = client(working_transport());
        let mut session = Session::new();
        let err = session.submit(&client, "  ").unwrap_err();
        assert!(matches!(err, WeatherAppError::InvalidInput { .. }));
        assert!(session.snapshot().is_none());
        assert!(client.transport().requests().is_empty());
    }

    #[test]
    fn test_weather_outage_after_resolution_keeps_previous_snapshot() {
        let mut session = Session::new();
        session
            .submit(&client(working_transport()), "Cheyenne")
            .unwrap();

        let outage = client(
            CannedTransport::default()
                .json("/weather?q=", 200, test_support::by_name_json(10.0, 20.0))
                .json("/reverse?", 200, test_support::reverse_json("Elsewhere")),
        );
        assert!(session.submit(&outage, "Elsewhere").is_err());
        assert_eq!(
            session.snapshot().unwrap().location.coordinates.latitude,
            41.14
        );
    }
}

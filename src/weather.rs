//! Weather retrieval for resolved coordinates
//!
//! One consolidated One Call request for current/hourly/daily data, a second
//! request for air quality, and the condition icon. Only the One Call data is
//! required; [`fetch_all`] demotes the other two to notices when they fail.

use crate::api::{HttpTransport, WeatherApiClient, WeatherIcon};
use crate::models::{AirQuality, Coordinates, WeatherReport};
use crate::{Result, WeatherAppError};
use tracing::{info, warn};

/// Fetch and convert the consolidated forecast
pub fn fetch_weather<T: HttpTransport>(
    api_client: &WeatherApiClient<T>,
    coordinates: Coordinates,
) -> Result<WeatherReport> {
    let response = api_client.one_call(coordinates)?;
    WeatherReport::from_openweather(&response)
}

/// Fetch the most recent air quality reading
pub fn fetch_air_quality<T: HttpTransport>(
    api_client: &WeatherApiClient<T>,
    coordinates: Coordinates,
) -> Result<AirQuality> {
    let response = api_client.air_pollution(coordinates)?;
    let entry = response.list.first().ok_or_else(|| {
        WeatherAppError::invalid_response("OpenWeatherMap AQI", "no readings returned")
    })?;
    AirQuality::from_openweather(entry)
}

/// Download the icon for the current conditions
pub fn fetch_icon<T: HttpTransport>(
    api_client: &WeatherApiClient<T>,
    icon_id: &str,
) -> Result<WeatherIcon> {
    api_client.weather_icon(icon_id)
}

/// Weather plus the optional extras that may be missing
#[derive(Debug, Clone)]
pub struct WeatherBundle {
    pub report: WeatherReport,
    pub air_quality: Option<AirQuality>,
    pub icon: Option<WeatherIcon>,
    /// User-facing notes about the extras that could not be loaded
    pub notices: Vec<String>,
}

/// Fetch everything for one location.
///
/// Fails only if the consolidated forecast fails. Air quality and icon errors
/// become notices and leave the matching field `None`.
pub fn fetch_all<T: HttpTransport>(
    api_client: &WeatherApiClient<T>,
    coordinates: Coordinates,
) -> Result<WeatherBundle> {
    let report = fetch_weather(api_client, coordinates)?;
    let mut notices = Vec::new();

    let air_quality = match fetch_air_quality(api_client, coordinates) {
        Ok(reading) => {
            info!("Air quality {} ({})", reading.aqi, reading.category);
            Some(reading)
        }
        Err(e) => {
            warn!("Air quality unavailable: {}", e);
            notices.push(format!("Air quality unavailable. {}", e.user_message()));
            None
        }
    };

    let icon = match report.current.icon.as_deref() {
        Some(icon_id) => match fetch_icon(api_client, icon_id) {
            Ok(icon) => Some(icon),
            Err(e) => {
                warn!("Weather icon {} unavailable: {}", icon_id, e);
                notices.push(format!("Weather icon unavailable. {}", e.user_message()));
                None
            }
        },
        None => None,
    };

    Ok(WeatherBundle {
        report,
        air_quality,
        icon,
        notices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{self, CannedTransport};
    use crate::units::AqiCategory;

    fn client(transport: CannedTransport) -> WeatherApiClient<CannedTransport> {
        WeatherApiClient::with_transport(&test_support::config(), transport).unwrap()
    }

    fn full_transport(aqi: i64) -> CannedTransport {
        CannedTransport::default()
            .json("/onecall?", 200, test_support::one_call_json(41.14, -104.82))
            .json("/air_pollution?", 200, test_support::air_pollution_json(aqi))
            .raw("/03d.png", 200, vec![1, 2, 3])
    }

    #[test]
    fn test_fetch_all_success() {
        let bundle = fetch_all(&client(full_transport(2)), Coordinates::new(41.14, -104.82)).unwrap();
        assert_eq!(bundle.report.hourly.len(), 48);
        let air = bundle.air_quality.unwrap();
        assert_eq!(air.category, AqiCategory::Fair);
        assert_eq!(air.ozone, 61.799);
        assert_eq!(air.pm10, 4.0);
        assert_eq!(bundle.icon.unwrap().png, vec![1, 2, 3]);
        assert!(bundle.notices.is_empty());
    }

    #[test]
    fn test_air_quality_failure_does_not_block_weather() {
        let transport = CannedTransport::default()
            .json("/onecall?", 200, test_support::one_call_json(1.0, 2.0))
            .raw("/03d.png", 200, vec![1]);
        let bundle = fetch_all(&client(transport), Coordinates::new(1.0, 2.0)).unwrap();
        assert!(bundle.air_quality.is_none());
        assert_eq!(bundle.notices.len(), 1);
        assert!(bundle.notices[0].starts_with("Air quality unavailable"));
        assert!(bundle.icon.is_some());
    }

    #[test]
    fn test_icon_failure_does_not_block_weather() {
        let transport = CannedTransport::default()
            .json("/onecall?", 200, test_support::one_call_json(1.0, 2.0))
            .json("/air_pollution?", 200, test_support::air_pollution_json(1))
            .raw("/03d.png", 404, b"Not Found".to_vec());
        let bundle = fetch_all(&client(transport), Coordinates::new(1.0, 2.0)).unwrap();
        assert!(bundle.icon.is_none());
        assert!(bundle.air_quality.is_some());
        assert_eq!(bundle.report.daily.len(), 7);
        assert_eq!(bundle.notices.len(), 1);
        assert!(bundle.notices[0].starts_with("Weather icon unavailable"));
        assert!(bundle.notices[0].contains("OpenWeatherMap icons"));
    }

    #[test]
    fn test_unmapped_aqi_becomes_notice() {
        let bundle = fetch_all(&client(full_transport(7)), Coordinates::new(1.0, 2.0)).unwrap();
        assert!(bundle.air_quality.is_none());
        assert!(bundle.notices[0].contains("AQI"));
    }

    #[test]
    fn test_empty_air_quality_list() {
        let transport = CannedTransport::default().json(
            "/air_pollution?",
            200,
            serde_json::json!({"list": []}),
        );
        let err = fetch_air_quality(&client(transport), Coordinates::new(1.0, 2.0)).unwrap_err();
        assert!(matches!(err, WeatherAppError::InvalidResponse { .. }));
    }

    #[test]
    fn test_one_call_failure_fails_everything() {
        let transport = CannedTransport::default()
            .json("/air_pollution?", 200, test_support::air_pollution_json(1));
        let err = fetch_all(&client(transport), Coordinates::new(1.0, 2.0)).unwrap_err();
        assert!(matches!(err, WeatherAppError::Transport { .. }));
    }
}

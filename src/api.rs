//! Weather API client for OpenWeatherMap integration
//!
//! This module provides the blocking HTTP plumbing for every endpoint the
//! application talks to: weather-by-name, One Call, air pollution, condition
//! icons, and Nominatim reverse geocoding. The actual HTTP call sits behind
//! [`HttpTransport`] so the rest of the crate never touches reqwest directly.

use crate::config::OneCallConfig;
use crate::models::Coordinates;
use crate::models::openweather::{
    AirPollutionResponse, CurrentByNameResponse, OneCallResponse, ReverseGeocodeResponse,
};
use crate::{Result, WeatherAppError};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

const NAME_LOOKUP: &str = "OpenWeatherMap";
const ONE_CALL: &str = "OneCall";
const AIR_POLLUTION: &str = "OpenWeatherMap AQI";
const ICONS: &str = "OpenWeatherMap icons";
const REVERSE_GEOCODE: &str = "Nominatim";

/// Status and body of a completed HTTP exchange
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpReply {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can perform a blocking GET
pub trait HttpTransport {
    /// Fetch `url`. An `Err` means no HTTP status was received at all.
    fn get(&self, url: &str) -> Result<HttpReply>;
}

/// [`HttpTransport`] backed by reqwest's blocking client
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                WeatherAppError::config(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str) -> Result<HttpReply> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| WeatherAppError::transport(host_of(url), e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|e| WeatherAppError::transport(host_of(url), e.to_string()))?;

        Ok(HttpReply {
            status,
            body: body.to_vec(),
        })
    }
}

/// Raw PNG bytes of a condition icon
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherIcon {
    pub id: String,
    pub url: String,
    pub png: Vec<u8>,
}

/// Client for OpenWeatherMap and Nominatim
pub struct WeatherApiClient<T = ReqwestTransport> {
    transport: T,
    api_key: String,
    base_url: String,
    one_call_url: String,
    icon_base_url: String,
    geocoding_base_url: String,
}

impl WeatherApiClient<ReqwestTransport> {
    /// Create a new client over a real HTTP connection
    pub fn new(config: &OneCallConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.weather.timeout_seconds.into());
        let transport = ReqwestTransport::new(timeout, &config.geocoding.user_agent)?;
        Self::with_transport(config, transport)
    }
}

impl<T: HttpTransport> WeatherApiClient<T> {
    /// Create a client over any transport
    pub fn with_transport(config: &OneCallConfig, transport: T) -> Result<Self> {
        Ok(Self {
            transport,
            api_key: config.api_key()?.to_string(),
            base_url: trim_slash(&config.weather.base_url),
            one_call_url: trim_slash(&config.weather.one_call_url),
            icon_base_url: trim_slash(&config.weather.icon_base_url),
            geocoding_base_url: trim_slash(&config.geocoding.base_url),
        })
    }

    /// The underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Look a free-text location up by name and return its coordinates.
    ///
    /// Any non-200 answer is reported as [`WeatherAppError::InvalidLocation`].
    #[instrument(skip(self))]
    pub fn lookup_coordinates(&self, location: &str) -> Result<Coordinates> {
        let url = format!(
            "{}/weather?q={}&appid={}",
            self.base_url,
            urlencoding::encode(location),
            self.api_key
        );

        let reply = self.make_request(NAME_LOOKUP, &url)?;
        if reply.status != 200 {
            warn!("Location '{}' rejected with HTTP {}", location, reply.status);
            return Err(WeatherAppError::invalid_location(location, reply.status));
        }

        let parsed: CurrentByNameResponse = parse_json(NAME_LOOKUP, &reply)?;
        let coordinates = Coordinates::new(parsed.coord.lat, parsed.coord.lon);
        info!(
            "Location '{}' resolved to {}",
            location,
            coordinates.format_coordinates()
        );
        Ok(coordinates)
    }

    /// Reverse geocode coordinates into a display address
    #[instrument(skip(self), fields(lat = coordinates.latitude, lon = coordinates.longitude))]
    pub fn reverse_geocode(&self, coordinates: Coordinates) -> Result<String> {
        let url = format!(
            "{}/reverse?lat={}&lon={}&format=json",
            self.geocoding_base_url, coordinates.latitude, coordinates.longitude
        );

        let reply = self.expect_success(REVERSE_GEOCODE, &url)?;
        let parsed: ReverseGeocodeResponse = parse_json(REVERSE_GEOCODE, &reply)?;

        match (parsed.display_name, parsed.error) {
            (Some(address), _) if !address.is_empty() => {
                info!("Reverse geocoded to: {}", address);
                Ok(address)
            }
            (_, Some(message)) => Err(WeatherAppError::invalid_response(REVERSE_GEOCODE, message)),
            _ => Err(WeatherAppError::invalid_response(
                REVERSE_GEOCODE,
                "response carried no address",
            )),
        }
    }

    /// Consolidated current + hourly + daily weather in imperial units
    #[instrument(skip(self), fields(lat = coordinates.latitude, lon = coordinates.longitude))]
    pub fn one_call(&self, coordinates: Coordinates) -> Result<OneCallResponse> {
        let url = format!(
            "{}?lat={}&lon={}&appid={}&units=imperial&exclude=minutely",
            self.one_call_url, coordinates.latitude, coordinates.longitude, self.api_key
        );

        let reply = self.expect_success(ONE_CALL, &url)?;
        let parsed: OneCallResponse = parse_json(ONE_CALL, &reply)?;
        debug!(
            "One Call returned {} hourly and {} daily blocks",
            parsed.hourly.len(),
            parsed.daily.len()
        );
        Ok(parsed)
    }

    /// Current air pollution reading
    #[instrument(skip(self), fields(lat = coordinates.latitude, lon = coordinates.longitude))]
    pub fn air_pollution(&self, coordinates: Coordinates) -> Result<AirPollutionResponse> {
        let url = format!(
            "{}/air_pollution?lat={}&lon={}&appid={}",
            self.base_url, coordinates.latitude, coordinates.longitude, self.api_key
        );

        let reply = self.expect_success(AIR_POLLUTION, &url)?;
        parse_json(AIR_POLLUTION, &reply)
    }

    /// Download the PNG for a condition icon such as `10d`
    #[instrument(skip(self))]
    pub fn weather_icon(&self, icon_id: &str) -> Result<WeatherIcon> {
        let url = self.icon_url(icon_id);
        let reply = self.expect_success(ICONS, &url)?;

        if reply.body.is_empty() {
            return Err(WeatherAppError::invalid_response(ICONS, "empty image"));
        }

        Ok(WeatherIcon {
            id: icon_id.to_string(),
            url,
            png: reply.body,
        })
    }

    /// Where the icon for `icon_id` lives
    #[must_use]
    pub fn icon_url(&self, icon_id: &str) -> String {
        format!("{}/{}.png", self.icon_base_url, urlencoding::encode(icon_id))
    }

    fn expect_success(&self, endpoint: &str, url: &str) -> Result<HttpReply> {
        let reply = self.make_request(endpoint, url)?;
        if reply.is_success() {
            Ok(reply)
        } else {
            Err(WeatherAppError::transport(
                endpoint,
                format!("HTTP status {}", reply.status),
            ))
        }
    }

    /// Perform one GET with timing and logging; no retries
    fn make_request(&self, endpoint: &str, url: &str) -> Result<HttpReply> {
        let start_time = Instant::now();
        debug!("{} request: {}", endpoint, redact_api_key(url));

        match self.transport.get(url) {
            Ok(reply) => {
                let elapsed = start_time.elapsed();
                info!(
                    "{} answered HTTP {} in {:.3}s",
                    endpoint,
                    reply.status,
                    elapsed.as_secs_f64()
                );
                if elapsed.as_secs() > 5 {
                    warn!(
                        "Slow {} response detected: {:.3}s",
                        endpoint,
                        elapsed.as_secs_f64()
                    );
                }
                Ok(reply)
            }
            Err(e) => {
                error!(
                    "{} request failed after {:.3}s: {}",
                    endpoint,
                    start_time.elapsed().as_secs_f64(),
                    e
                );
                Err(match e {
                    WeatherAppError::Transport { message, .. } => {
                        WeatherAppError::transport(endpoint, message)
                    }
                    other => other,
                })
            }
        }
    }
}

fn parse_json<R: DeserializeOwned>(endpoint: &str, reply: &HttpReply) -> Result<R> {
    serde_json::from_slice(&reply.body).map_err(|e| {
        error!("Failed to parse {} response: {}", endpoint, e);
        WeatherAppError::invalid_response(endpoint, e.to_string())
    })
}

fn trim_slash(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

fn host_of(url: &str) -> &str {
    url.split("://")
        .nth(1)
        .and_then(|rest| rest.split('/').next())
        .unwrap_or(url)
}

/// Mask the `appid` query value so keys never reach the logs
#[must_use]
pub fn redact_api_key(url: &str) -> String {
    match url.find("appid=") {
        Some(start) => {
            let value_start = start + "appid=".len();
            let value_end = url[value_start..]
                .find('&')
                .map_or(url.len(), |offset| value_start + offset);
            format!("{}***{}", &url[..value_start], &url[value_end..])
        }
        None => url.to_string(),
    }
}

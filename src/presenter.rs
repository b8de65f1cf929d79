//! Presentation records
//!
//! Turns a [`WeatherSnapshot`] into plain strings ready for a display layer.
//! The terminal front end prints them through their `Display` impls; a GUI
//! would bind the same fields to its own widgets.

use crate::models::{AirQuality, DailyForecastEntry, HourlyForecastEntry};
use crate::session::WeatherSnapshot;
use crate::units;
use std::fmt;

/// Number of hourly entries in the short forecast
pub const TWELVE_HOURS: usize = 12;

/// Painter-ready description of the wind pointer arc.
///
/// Painters measure angles counterclockwise from 3 o'clock while wind
/// directions are compass bearings measured clockwise from north.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindIndicator {
    /// Arc start, degrees counterclockwise from 3 o'clock
    pub start_degrees: f64,
    /// Arc width in degrees
    pub span_degrees: f64,
}

impl WindIndicator {
    pub const SPAN_DEGREES: f64 = 20.0;
    const START_OFFSET_DEGREES: f64 = 80.0;

    #[must_use]
    pub fn from_degrees(wind_degrees: f64) -> Self {
        Self {
            start_degrees: (-wind_degrees + Self::START_OFFSET_DEGREES).rem_euclid(360.0),
            span_degrees: Self::SPAN_DEGREES,
        }
    }

    /// Middle of the arc; equals `90 - wind_degrees` in painter space
    #[must_use]
    pub fn center_degrees(&self) -> f64 {
        (self.start_degrees + self.span_degrees / 2.0).rem_euclid(360.0)
    }

    /// Start and span in 1/16° steps, the unit Qt-style pie painters take
    #[must_use]
    pub fn sixteenths(&self) -> (i32, i32) {
        (
            (self.start_degrees * 16.0).round() as i32,
            (self.span_degrees * 16.0).round() as i32,
        )
    }

    /// Eight-way arrow pointing where the arc sits on the dial
    #[must_use]
    pub fn glyph(&self) -> char {
        const ARROWS: [char; 8] = ['→', '↗', '↑', '↖', '←', '↙', '↓', '↘'];
        let index = ((self.center_degrees() + 22.5) / 45.0).floor() as usize % ARROWS.len();
        ARROWS[index]
    }
}

/// Air quality display strings
#[derive(Debug, Clone, PartialEq)]
pub struct AirQualityView {
    pub index: String,
    pub ozone: String,
    pub pm2_5: String,
    pub pm10: String,
    pub carbon_monoxide: String,
    pub sulphur_dioxide: String,
    pub nitrogen_dioxide: String,
}

impl AirQualityView {
    #[must_use]
    pub fn new(air: &AirQuality) -> Self {
        let concentration = |value: f64| format!("{value} µg/m³");
        Self {
            index: format!("{} {}", air.aqi, air.category),
            ozone: concentration(air.ozone),
            pm2_5: concentration(air.pm2_5),
            pm10: concentration(air.pm10),
            carbon_monoxide: concentration(air.carbon_monoxide),
            sulphur_dioxide: concentration(air.sulphur_dioxide),
            nitrogen_dioxide: concentration(air.nitrogen_dioxide),
        }
    }
}

/// Everything shown on the main screen
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditionsView {
    pub address: String,
    pub latitude: String,
    pub longitude: String,
    pub observed_at: String,
    pub description: String,
    pub temperature: String,
    pub feels_like: String,
    pub humidity: String,
    pub pressure: String,
    pub wind: String,
    pub wind_indicator: WindIndicator,
    pub cloud_cover: String,
    pub uv_index: String,
    pub visibility: String,
    pub sunrise: String,
    pub sunset: String,
    pub icon_url: Option<String>,
    pub air_quality: Option<AirQualityView>,
    pub notices: Vec<String>,
}

impl CurrentConditionsView {
    #[must_use]
    pub fn new(snapshot: &WeatherSnapshot) -> Self {
        let current = &snapshot.report.current;
        let coordinates = snapshot.location.coordinates;
        let time_or_dash = |time: Option<&chrono::DateTime<chrono::FixedOffset>>| {
            time.map_or_else(|| "-".to_string(), units::format_datetime)
        };

        Self {
            address: snapshot.location.address.clone(),
            latitude: coordinates.latitude.to_string(),
            longitude: coordinates.longitude.to_string(),
            observed_at: units::format_datetime(&current.observed_at),
            description: current.description.clone(),
            temperature: format!("{}°F", current.temperature),
            feels_like: format!("{}°F", current.feels_like),
            humidity: format!("{}%", current.humidity),
            pressure: format!("{} inHg", current.pressure),
            wind: format!("{} mph {}", current.wind_speed, current.wind_cardinal),
            wind_indicator: WindIndicator::from_degrees(current.wind_degrees),
            cloud_cover: format!("{}%", current.cloud_cover),
            uv_index: format!("{} {}", current.uv_index, current.uv_category),
            visibility: current
                .visibility
                .map_or_else(|| "-".to_string(), |miles| format!("{miles} miles")),
            sunrise: time_or_dash(current.sunrise.as_ref()),
            sunset: time_or_dash(current.sunset.as_ref()),
            icon_url: snapshot.icon.as_ref().map(|icon| icon.url.clone()),
            air_quality: snapshot.air_quality.as_ref().map(AirQualityView::new),
            notices: snapshot.notices.clone(),
        }
    }
}

impl fmt::Display for CurrentConditionsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.address)?;
        writeln!(f, "Lat {}  Lon {}", self.latitude, self.longitude)?;
        writeln!(f, "{}", "=".repeat(60))?;
        writeln!(f, "As of {}", self.observed_at)?;
        writeln!(f, "{}  {}", self.temperature, self.description)?;
        writeln!(f, "  Feels like:  {}", self.feels_like)?;
        writeln!(f, "  Humidity:    {}", self.humidity)?;
        writeln!(f, "  Pressure:    {}", self.pressure)?;
        writeln!(f, "  Wind:        {} {}", self.wind, self.wind_indicator.glyph())?;
        writeln!(f, "  Cloud cover: {}", self.cloud_cover)?;
        writeln!(f, "  UV index:    {}", self.uv_index)?;
        writeln!(f, "  Visibility:  {}", self.visibility)?;
        writeln!(f, "  Sunrise:     {}", self.sunrise)?;
        writeln!(f, "  Sunset:      {}", self.sunset)?;
        if let Some(url) = &self.icon_url {
            writeln!(f, "  Icon:        {url}")?;
        }
        if let Some(air) = &self.air_quality {
            writeln!(f, "Air Quality: {}", air.index)?;
            writeln!(f, "  Ozone: {}  PM2.5: {}  PM10: {}", air.ozone, air.pm2_5, air.pm10)?;
            writeln!(
                f,
                "  CO: {}  SO2: {}  NO2: {}",
                air.carbon_monoxide, air.sulphur_dioxide, air.nitrogen_dioxide
            )?;
        }
        for notice in &self.notices {
            writeln!(f, "! {notice}")?;
        }
        Ok(())
    }
}

/// One row of an hourly table
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyRow {
    pub time: String,
    pub temperature: String,
    pub humidity: String,
    pub wind_speed: String,
    pub summary: String,
    pub description: String,
}

impl HourlyRow {
    #[must_use]
    pub fn new(entry: &HourlyForecastEntry) -> Self {
        Self {
            time: units::format_hour(&entry.time),
            temperature: format!("{:.1} °F", entry.temperature),
            humidity: format!("{}%", entry.humidity),
            wind_speed: format!("{:.1} mph", entry.wind_speed),
            summary: entry.summary.clone(),
            description: entry.description.clone(),
        }
    }
}

/// One row of the daily table
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRow {
    pub date: String,
    pub max_temperature: String,
    pub min_temperature: String,
    pub wind_speed: String,
    pub description: String,
}

impl DailyRow {
    #[must_use]
    pub fn new(entry: &DailyForecastEntry) -> Self {
        Self {
            date: units::format_day(&entry.date),
            max_temperature: format!("{:.1} °F", entry.max_temperature),
            min_temperature: format!("{:.1} °F", entry.min_temperature),
            wind_speed: format!("{:.1} mph", entry.wind_speed),
            description: entry.description.clone(),
        }
    }
}

/// The first twelve hourly entries, verbatim
#[must_use]
pub fn twelve_hour(entries: &[HourlyForecastEntry]) -> Vec<HourlyRow> {
    entries.iter().take(TWELVE_HOURS).map(HourlyRow::new).collect()
}

/// Every other hourly entry starting with the second (indices 1, 3, 5, ...):
/// 24 points out of 48
#[must_use]
pub fn forty_eight_hour(entries: &[HourlyForecastEntry]) -> Vec<HourlyRow> {
    entries.iter().skip(1).step_by(2).map(HourlyRow::new).collect()
}

/// Every daily entry
#[must_use]
pub fn seven_day(entries: &[DailyForecastEntry]) -> Vec<DailyRow> {
    entries.iter().map(DailyRow::new).collect()
}

/// A titled table of forecast rows, ready to print
pub struct ForecastTable<'a, R> {
    pub title: String,
    pub address: &'a str,
    pub rows: Vec<R>,
}

impl fmt::Display for ForecastTable<'_, HourlyRow> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", self.address)?;
        writeln!(f, "{}", "=".repeat(70))?;
        for row in &self.rows {
            writeln!(
                f,
                "{:>6}: {:>9} | {:>4} | {:>9} | {:<12} {}",
                row.time, row.temperature, row.humidity, row.wind_speed, row.summary, row.description
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for ForecastTable<'_, DailyRow> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", self.address)?;
        writeln!(f, "{}", "=".repeat(70))?;
        writeln!(f, "{:<9} {:>9}   {:>9}   {:>9}", "Date", "Max", "Min", "Wind Spd")?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<9} {:>9} | {:>9} | {:>9} | {}",
                row.date, row.max_temperature, row.min_temperature, row.wind_speed, row.description
            )?;
        }
        Ok(())
    }
}

impl WeatherSnapshot {
    /// 12-hour table for this snapshot
    #[must_use]
    pub fn twelve_hour_table(&self) -> ForecastTable<'_, HourlyRow> {
        ForecastTable {
            title: "12 Hour Forecast".to_string(),
            address: &self.location.address,
            rows: twelve_hour(&self.report.hourly),
        }
    }

    /// 48-hour table for this snapshot
    #[must_use]
    pub fn forty_eight_hour_table(&self) -> ForecastTable<'_, HourlyRow> {
        ForecastTable {
            title: "48 Hour Forecast".to_string(),
            address: &self.location.address,
            rows: forty_eight_hour(&self.report.hourly),
        }
    }

    /// 7-day table for this snapshot
    #[must_use]
    pub fn seven_day_table(&self) -> ForecastTable<'_, DailyRow> {
        ForecastTable {
            title: "7 Day Forecast".to_string(),
            address: &self.location.address,
            rows: seven_day(&self.report.daily),
        }
    }
}

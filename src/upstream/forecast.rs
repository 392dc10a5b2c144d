//! Weather-forecast client (Open-Meteo-style provider).
//!
//! The provider returns columnar time-series data: each series block encodes
//! its timestamps as (start, end, interval) and carries one positional value
//! slot per requested variable, in request order. The ordered name lists
//! below are the single source of truth for both the outgoing query and slot
//! resolution, so the request and the decode cannot drift apart.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::config::{TimeoutConfig, UpstreamConfig};
use crate::upstream::UpstreamError;

/// Instantaneous measurements requested from the `current` group, in slot order.
pub const CURRENT_VARIABLES: [&str; 5] = [
    "temperature_2m",
    "relative_humidity_2m",
    "apparent_temperature",
    "wind_speed_10m",
    "precipitation",
];

/// Per-hour measurements requested from the `hourly` group, in slot order.
pub const HOURLY_VARIABLES: [&str; 6] = [
    "temperature_2m",
    "relative_humidity_2m",
    "weather_code",
    "rain",
    "showers",
    "snowfall",
];

/// Per-day measurements requested from the `daily` group, in slot order.
pub const DAILY_VARIABLES: [&str; 3] = [
    "weather_code",
    "temperature_2m_max",
    "temperature_2m_min",
];

/// Client for the weather-forecast provider.
#[derive(Debug, Clone)]
pub struct ForecastClient {
    http: Client,
    base_url: String,
}

impl ForecastClient {
    pub fn new(
        upstream: &UpstreamConfig,
        timeouts: &TimeoutConfig,
    ) -> Result<Self, UpstreamError> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .timeout(Duration::from_secs(timeouts.upstream_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: upstream.forecast_url.clone(),
        })
    }

    /// Fetch the three measurement groups for a single location.
    ///
    /// Non-finite coordinates are forwarded unchanged (`latitude=NaN`); the
    /// provider's rejection is the error path for malformed input.
    pub async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ForecastResponse, UpstreamError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("daily", DAILY_VARIABLES.join(",")),
                ("hourly", HOURLY_VARIABLES.join(",")),
                ("current", CURRENT_VARIABLES.join(",")),
                ("timeformat", "unixtime".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| UpstreamError::Decode(e.to_string()))
    }
}

/// Trim an upstream error body down to something loggable.
fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…", &body[..end])
    }
}

/// Columnar forecast response for a single location.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    pub utc_offset_seconds: i64,
    pub timezone: String,
    pub timezone_abbreviation: String,
    pub current: CurrentBlock,
    pub hourly: SeriesBlock,
    pub daily: SeriesBlock,
}

/// The `current` group: one timestamp plus one scalar per requested variable.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentBlock {
    /// Observation time, seconds since the Unix epoch (UTC).
    pub time: i64,
    /// Positional values, one per requested variable.
    pub variables: Vec<f64>,
}

impl CurrentBlock {
    /// Bind the positional slots to the requested name list.
    ///
    /// Fails when the provider answered with a different number of slots
    /// than were requested.
    pub fn slots(&self) -> Result<ScalarSlots<'_>, UpstreamError> {
        if self.variables.len() != CURRENT_VARIABLES.len() {
            return Err(UpstreamError::SlotCount {
                group: "current",
                expected: CURRENT_VARIABLES.len(),
                actual: self.variables.len(),
            });
        }
        Ok(ScalarSlots {
            names: &CURRENT_VARIABLES,
            values: &self.variables,
        })
    }
}

/// A time-series group: timestamps as (start, end, interval) plus one value
/// sequence per requested variable.
#[derive(Debug, Clone, Deserialize)]
pub struct SeriesBlock {
    /// First timestamp, seconds since the Unix epoch (UTC).
    pub time: i64,
    /// End of the series, exclusive.
    pub time_end: i64,
    /// Stride between consecutive timestamps, seconds.
    pub interval: i64,
    /// Positional value sequences, one per requested variable.
    pub variables: Vec<Vec<f64>>,
}

impl SeriesBlock {
    /// Reconstruct the timestamp sequence: `time, time + interval, …` while
    /// `< time_end`.
    pub fn timeline(&self, group: &'static str) -> Result<Vec<i64>, UpstreamError> {
        if self.interval <= 0 {
            return Err(UpstreamError::InvalidInterval {
                group,
                interval: self.interval,
            });
        }
        Ok((self.time..self.time_end)
            .step_by(self.interval as usize)
            .collect())
    }

    /// Bind the positional slots to the requested name list, checking that
    /// every value sequence is aligned with the reconstructed timeline.
    pub fn slots(
        &self,
        names: &'static [&'static str],
        group: &'static str,
    ) -> Result<SeriesSlots<'_>, UpstreamError> {
        if self.variables.len() != names.len() {
            return Err(UpstreamError::SlotCount {
                group,
                expected: names.len(),
                actual: self.variables.len(),
            });
        }

        let expected = self.timeline(group)?.len();
        for (name, values) in names.iter().zip(&self.variables) {
            if values.len() != expected {
                return Err(UpstreamError::SeriesLength {
                    group,
                    variable: name,
                    expected,
                    actual: values.len(),
                });
            }
        }

        Ok(SeriesSlots {
            names,
            values: &self.variables,
        })
    }
}

/// Scalar slots bound to their requested names.
#[derive(Debug)]
pub struct ScalarSlots<'a> {
    names: &'static [&'static str],
    values: &'a [f64],
}

impl ScalarSlots<'_> {
    /// Resolve a measurement by name; position comes from the request order.
    pub fn value(&self, name: &str) -> Result<f64, UpstreamError> {
        self.names
            .iter()
            .position(|n| *n == name)
            .map(|i| self.values[i])
            .ok_or_else(|| UpstreamError::UnknownVariable(name.to_string()))
    }
}

/// Series slots bound to their requested names.
#[derive(Debug)]
pub struct SeriesSlots<'a> {
    names: &'static [&'static str],
    values: &'a [Vec<f64>],
}

impl SeriesSlots<'_> {
    /// Resolve a measurement sequence by name.
    pub fn series(&self, name: &str) -> Result<&[f64], UpstreamError> {
        self.names
            .iter()
            .position(|n| *n == name)
            .map(|i| self.values[i].as_slice())
            .ok_or_else(|| UpstreamError::UnknownVariable(name.to_string()))
    }
}

//! The reshaped weather report returned by `/weather`.
//!
//! Assembly walks the columnar upstream response once: reconstruct each
//! group's timeline, shift it by the location's UTC offset, and resolve every
//! measurement by name through the validated slot bindings.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::upstream::forecast::{DAILY_VARIABLES, HOURLY_VARIABLES};
use crate::upstream::{ForecastResponse, UpstreamError};

/// Stable output shape of the `/weather` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherReport {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    pub utc_offset_seconds: i64,
    pub timezone: String,
    pub timezone_abbreviation: String,
    pub current: CurrentConditions,
    pub hourly: HourlySeries,
    pub daily: DailySeries,
}

/// Instantaneous conditions at one timestamp.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentConditions {
    pub time: DateTime<Utc>,
    pub temperature_2m: f64,
    pub relative_humidity_2m: f64,
    pub apparent_temperature: f64,
    pub wind_speed_10m: f64,
    pub precipitation: f64,
}

/// Hourly measurements, index-aligned with `time`.
#[derive(Debug, Clone, Serialize)]
pub struct HourlySeries {
    pub time: Vec<DateTime<Utc>>,
    pub temperature_2m: Vec<f64>,
    pub relative_humidity_2m: Vec<f64>,
    pub weather_code: Vec<f64>,
    pub rain: Vec<f64>,
    pub showers: Vec<f64>,
    pub snowfall: Vec<f64>,
}

/// Daily measurements, index-aligned with `time`.
#[derive(Debug, Clone, Serialize)]
pub struct DailySeries {
    pub time: Vec<DateTime<Utc>>,
    pub weather_code: Vec<f64>,
    pub temperature_2m_max: Vec<f64>,
    pub temperature_2m_min: Vec<f64>,
}

impl WeatherReport {
    /// Reshape a columnar forecast response into the report shape.
    pub fn from_forecast(response: &ForecastResponse) -> Result<Self, UpstreamError> {
        let offset = response.utc_offset_seconds;

        let current = response.current.slots()?;
        let hourly = response.hourly.slots(&HOURLY_VARIABLES, "hourly")?;
        let daily = response.daily.slots(&DAILY_VARIABLES, "daily")?;

        Ok(Self {
            latitude: response.latitude,
            longitude: response.longitude,
            elevation: response.elevation,
            utc_offset_seconds: offset,
            timezone: response.timezone.clone(),
            timezone_abbreviation: response.timezone_abbreviation.clone(),
            current: CurrentConditions {
                time: shifted_timestamp(response.current.time, offset)?,
                temperature_2m: current.value("temperature_2m")?,
                relative_humidity_2m: current.value("relative_humidity_2m")?,
                apparent_temperature: current.value("apparent_temperature")?,
                wind_speed_10m: current.value("wind_speed_10m")?,
                precipitation: current.value("precipitation")?,
            },
            hourly: HourlySeries {
                time: shifted_timeline(response.hourly.timeline("hourly")?, offset)?,
                temperature_2m: hourly.series("temperature_2m")?.to_vec(),
                relative_humidity_2m: hourly.series("relative_humidity_2m")?.to_vec(),
                weather_code: hourly.series("weather_code")?.to_vec(),
                rain: hourly.series("rain")?.to_vec(),
                showers: hourly.series("showers")?.to_vec(),
                snowfall: hourly.series("snowfall")?.to_vec(),
            },
            daily: DailySeries {
                time: shifted_timeline(response.daily.timeline("daily")?, offset)?,
                weather_code: daily.series("weather_code")?.to_vec(),
                temperature_2m_max: daily.series("temperature_2m_max")?.to_vec(),
                temperature_2m_min: daily.series("temperature_2m_min")?.to_vec(),
            },
        })
    }
}

/// Shift an epoch-seconds value by the location's UTC offset and convert to
/// an absolute timestamp.
fn shifted_timestamp(seconds: i64, offset: i64) -> Result<DateTime<Utc>, UpstreamError> {
    let shifted = seconds
        .checked_add(offset)
        .ok_or(UpstreamError::TimestampOutOfRange(seconds))?;
    DateTime::from_timestamp(shifted, 0).ok_or(UpstreamError::TimestampOutOfRange(shifted))
}

fn shifted_timeline(
    timeline: Vec<i64>,
    offset: i64,
) -> Result<Vec<DateTime<Utc>>, UpstreamError> {
    timeline
        .into_iter()
        .map(|t| shifted_timestamp(t, offset))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::forecast::{CurrentBlock, SeriesBlock};

    fn sample_response() -> ForecastResponse {
        ForecastResponse {
            latitude: 52.52,
            longitude: 13.41,
            elevation: 38.0,
            utc_offset_seconds: 0,
            timezone: "Europe/Berlin".to_string(),
            timezone_abbreviation: "CEST".to_string(),
            current: CurrentBlock {
                time: 1_700_000_000,
                variables: vec![11.0, 72.0, 9.5, 14.0, 0.2],
            },
            hourly: SeriesBlock {
                time: 0,
                time_end: 10,
                interval: 2,
                variables: vec![
                    vec![1.0; 5],
                    vec![2.0; 5],
                    vec![3.0; 5],
                    vec![4.0; 5],
                    vec![5.0; 5],
                    vec![6.0; 5],
                ],
            },
            daily: SeriesBlock {
                time: 0,
                time_end: 172_800,
                interval: 86_400,
                variables: vec![vec![61.0, 3.0], vec![12.0, 13.0], vec![4.0, 5.0]],
            },
        }
    }

    #[test]
    fn test_hourly_timeline_is_start_step_interval() {
        let report = WeatherReport::from_forecast(&sample_response()).unwrap();
        let seconds: Vec<i64> = report.hourly.time.iter().map(|t| t.timestamp()).collect();
        assert_eq!(seconds, vec![0, 2, 4, 6, 8]);
    }

    #[test]
    fn test_series_lengths_match_timeline() {
        let report = WeatherReport::from_forecast(&sample_response()).unwrap();
        let n = report.hourly.time.len();
        assert_eq!(report.hourly.temperature_2m.len(), n);
        assert_eq!(report.hourly.relative_humidity_2m.len(), n);
        assert_eq!(report.hourly.weather_code.len(), n);
        assert_eq!(report.hourly.rain.len(), n);
        assert_eq!(report.hourly.showers.len(), n);
        assert_eq!(report.hourly.snowfall.len(), n);

        let n = report.daily.time.len();
        assert_eq!(report.daily.weather_code.len(), n);
        assert_eq!(report.daily.temperature_2m_max.len(), n);
        assert_eq!(report.daily.temperature_2m_min.len(), n);
    }

    #[test]
    fn test_current_slots_map_positionally() {
        let report = WeatherReport::from_forecast(&sample_response()).unwrap();
        assert_eq!(report.current.temperature_2m, 11.0);
        assert_eq!(report.current.relative_humidity_2m, 72.0);
        assert_eq!(report.current.apparent_temperature, 9.5);
        assert_eq!(report.current.wind_speed_10m, 14.0);
        assert_eq!(report.current.precipitation, 0.2);
    }

    #[test]
    fn test_utc_offset_shifts_every_timestamp() {
        let mut response = sample_response();
        response.utc_offset_seconds = 3600;

        let report = WeatherReport::from_forecast(&response).unwrap();
        assert_eq!(report.current.time.timestamp(), 1_700_000_000 + 3600);
        assert_eq!(report.hourly.time[0].timestamp(), 3600);
        assert_eq!(report.daily.time[1].timestamp(), 86_400 + 3600);
    }

    #[test]
    fn test_misaligned_upstream_is_an_error_not_a_partial_report() {
        let mut response = sample_response();
        response.hourly.variables[3] = vec![0.0; 2];

        assert!(matches!(
            WeatherReport::from_forecast(&response),
            Err(UpstreamError::SeriesLength { variable: "rain", .. })
        ));
    }

    #[test]
    fn test_report_serializes_with_rfc3339_times() {
        let report = WeatherReport::from_forecast(&sample_response()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["hourly"]["time"][0], "1970-01-01T00:00:00Z");
        assert_eq!(json["daily"]["weather_code"][0], 61.0);
    }
}

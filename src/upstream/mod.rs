//! Upstream provider clients.
//!
//! # Data Flow
//! ```text
//! handler (validated coordinates)
//!     → geocode.rs (one GET, JSON body relayed verbatim)
//!     → forecast.rs (one GET, columnar response, typed positional decode)
//!     → report assembly (crate::report)
//! ```
//!
//! # Design Decisions
//! - One client per provider, built once at startup and cloned into handlers
//! - No retries; a failed call fails the whole request
//! - Connect and per-request timeouts come from config

pub mod forecast;
pub mod geocode;

pub use forecast::{ForecastClient, ForecastResponse};
pub use geocode::GeocodingClient;

use thiserror::Error;

/// Errors raised while calling or decoding an upstream provider.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connection, timeout, or transport failure.
    #[error("upstream request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The forecast provider answered with a non-success status.
    #[error("upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not decode as the expected JSON shape.
    #[error("failed to decode upstream response: {0}")]
    Decode(String),

    /// A variable group carried the wrong number of positional slots.
    #[error("{group} variables: expected {expected} slots, got {actual}")]
    SlotCount {
        group: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A measurement name was resolved that was never requested.
    #[error("variable '{0}' was not requested")]
    UnknownVariable(String),

    /// A measurement series is not aligned with its timestamp sequence.
    #[error("{group}.{variable}: expected {expected} values, got {actual}")]
    SeriesLength {
        group: &'static str,
        variable: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A series block carried a non-positive interval.
    #[error("{group}: invalid interval {interval}")]
    InvalidInterval { group: &'static str, interval: i64 },

    /// A shifted timestamp fell outside the representable range.
    #[error("timestamp {0} is out of range")]
    TimestampOutOfRange(i64),
}

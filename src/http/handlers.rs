//! Endpoint handlers and the API error contract.
//!
//! Both endpoints share the same boundary: a handler returns
//! `Result<Json<_>, ApiError>`, and every failure maps to a JSON
//! `{"error": …}` body — 400 for missing coordinates, 500 for anything that
//! went wrong talking to or decoding an upstream provider.

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::http::server::AppState;
use crate::http::X_REQUEST_ID;
use crate::report::WeatherReport;
use crate::upstream::UpstreamError;

/// Inbound coordinate query parameters.
///
/// Both are kept as raw strings: `/reverse-geo` forwards them verbatim, and
/// `/weather` parses them itself so a non-numeric value becomes `NaN` rather
/// than a rejection (the upstream call is the error path for those).
#[derive(Debug, Deserialize)]
pub struct CoordinateParams {
    lat: Option<String>,
    lng: Option<String>,
}

impl CoordinateParams {
    /// Presence check only: absent or empty values are rejected, nothing
    /// else is.
    fn require(&self) -> Result<(&str, &str), ApiError> {
        match (
            self.lat.as_deref().filter(|v| !v.is_empty()),
            self.lng.as_deref().filter(|v| !v.is_empty()),
        ) {
            (Some(lat), Some(lng)) => Ok((lat, lng)),
            _ => Err(ApiError::MissingCoordinates),
        }
    }
}

/// Failures a handler can answer with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The caller omitted `lat` or `lng`.
    #[error("Latitude and longitude are required")]
    MissingCoordinates,

    /// Calling or decoding an upstream provider failed.
    #[error("{0}")]
    Upstream(#[from] UpstreamError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MissingCoordinates => StatusCode::BAD_REQUEST,
            ApiError::Upstream(e) => {
                tracing::error!(error = %e, "Upstream failure");
                crate::observability::metrics::record_upstream_failure();
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// `GET /reverse-geo` — relay the reverse-geocoding provider's JSON verbatim.
pub async fn reverse_geo(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<CoordinateParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let (lat, lng) = params.require()?;

    tracing::debug!(
        request_id = %request_id(&headers),
        lat,
        lng,
        "Reverse geocoding"
    );

    let body = state.geocoder.reverse(lat, lng).await?;
    Ok(Json(body))
}

/// `GET /weather` — fetch the forecast and reshape it into a `WeatherReport`.
pub async fn weather(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<CoordinateParams>,
) -> Result<Json<WeatherReport>, ApiError> {
    let (lat, lng) = params.require()?;

    // Non-numeric coordinates become NaN and are forwarded; the forecast
    // provider's rejection is the error path for them.
    let latitude: f64 = lat.parse().unwrap_or(f64::NAN);
    let longitude: f64 = lng.parse().unwrap_or(f64::NAN);

    tracing::debug!(
        request_id = %request_id(&headers),
        latitude,
        longitude,
        "Fetching forecast"
    );

    let response = state.forecast.fetch(latitude, longitude).await?;
    let report = WeatherReport::from_forecast(&response)?;
    Ok(Json(report))
}

fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

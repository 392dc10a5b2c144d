//! Reverse-geocoding client (Nominatim-style provider).

use std::time::Duration;

use reqwest::Client;

use crate::config::{TimeoutConfig, UpstreamConfig};
use crate::upstream::UpstreamError;

/// Client for the reverse-geocoding provider.
///
/// The provider is keyed by coordinates and answers with arbitrary JSON,
/// which is relayed to the caller unchanged.
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    http: Client,
    base_url: String,
}

impl GeocodingClient {
    /// Build a client with the configured endpoint, timeouts, and the fixed
    /// identifying User-Agent the provider's usage policy asks for.
    pub fn new(
        upstream: &UpstreamConfig,
        timeouts: &TimeoutConfig,
    ) -> Result<Self, UpstreamError> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .timeout(Duration::from_secs(timeouts.upstream_secs))
            .user_agent(upstream.geocoding_user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            base_url: upstream.geocoding_url.clone(),
        })
    }

    /// Reverse geocode a coordinate pair.
    ///
    /// `lat` and `lng` are forwarded exactly as the caller sent them.
    /// The provider's body is returned verbatim, error payloads included:
    /// only transport and JSON-parse failures are errors here.
    pub async fn reverse(&self, lat: &str, lng: &str) -> Result<serde_json::Value, UpstreamError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("format", "json"), ("lat", lat), ("lon", lng)])
            .send()
            .await?;

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| UpstreamError::Decode(e.to_string()))
    }
}

//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the weather gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, TLS).
    pub listener: ListenerConfig,

    /// Browser origin allow list.
    pub cors: CorsConfig,

    /// Upstream provider endpoints.
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:4000").
    pub bind_address: String,

    /// Optional TLS configuration.
    pub tls: Option<TlsConfig>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:4000".to_string(),
            tls: None,
        }
    }
}

impl ListenerConfig {
    /// Replace the port component of the bind address, keeping the host part.
    pub fn set_port(&mut self, port: u16) -> Result<(), std::net::AddrParseError> {
        let mut addr: std::net::SocketAddr = self.bind_address.parse()?;
        addr.set_port(port);
        self.bind_address = addr.to_string();
        Ok(())
    }
}

/// TLS configuration for the listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    /// Path to certificate file (PEM).
    pub cert_path: String,

    /// Path to private key file (PEM).
    pub key_path: String,
}

/// Browser origin allow list.
///
/// Requests without an `Origin` header are always served; requests with one
/// only receive CORS allow headers when the origin's hostname is listed here.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Hostnames allowed as browser origins (exact match).
    pub allowed_hosts: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_hosts: vec!["localhost".to_string(), "72.61.242.106".to_string()],
        }
    }
}

/// Upstream provider endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the weather-forecast provider.
    pub forecast_url: String,

    /// Base URL of the reverse-geocoding provider.
    pub geocoding_url: String,

    /// Identifying User-Agent sent to the reverse-geocoding provider.
    pub geocoding_user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            forecast_url: "https://api.open-meteo.com/v1/forecast".to_string(),
            geocoding_url: "https://nominatim.openstreetmap.org/reverse".to_string(),
            geocoding_user_agent: "weather-app/1.0 (support@amitdubey.cloud)".to_string(),
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout for upstream calls in seconds.
    pub connect_secs: u64,

    /// Total timeout for a single upstream call in seconds.
    pub upstream_secs: u64,

    /// Inbound request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            upstream_secs: 20,
            request_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_listener_port() {
        let config = GatewayConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:4000");
    }

    #[test]
    fn test_default_allowed_hosts() {
        let config = CorsConfig::default();
        assert_eq!(config.allowed_hosts, vec!["localhost", "72.61.242.106"]);
    }

    #[test]
    fn test_set_port_keeps_host() {
        let mut listener = ListenerConfig::default();
        listener.set_port(8080).unwrap();
        assert_eq!(listener.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn test_set_port_rejects_unparseable_address() {
        let mut listener = ListenerConfig {
            bind_address: "not-an-address".to_string(),
            tls: None,
        };
        assert!(listener.set_port(8080).is_err());
    }
}

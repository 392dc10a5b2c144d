//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check value shapes (bind address parses, upstream URLs parse)
//! - Validate value ranges (timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use crate::config::schema::GatewayConfig;

/// A single semantic validation failure.
#[derive(Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Bind address does not parse as a socket address.
    InvalidBindAddress(String),
    /// The CORS allow list is empty.
    NoAllowedHosts,
    /// The CORS allow list contains an empty hostname.
    EmptyAllowedHost,
    /// An upstream base URL does not parse.
    InvalidUpstreamUrl { which: &'static str, url: String },
    /// A timeout is zero.
    ZeroTimeout(&'static str),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidBindAddress(addr) => {
                write!(f, "invalid bind address '{}'", addr)
            }
            ValidationError::NoAllowedHosts => {
                write!(f, "cors.allowed_hosts must not be empty")
            }
            ValidationError::EmptyAllowedHost => {
                write!(f, "cors.allowed_hosts contains an empty hostname")
            }
            ValidationError::InvalidUpstreamUrl { which, url } => {
                write!(f, "invalid upstream.{} '{}'", which, url)
            }
            ValidationError::ZeroTimeout(name) => {
                write!(f, "timeouts.{} must be greater than zero", name)
            }
        }
    }
}

/// Validate a configuration, collecting every failure.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config
        .listener
        .bind_address
        .parse::<std::net::SocketAddr>()
        .is_err()
    {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.cors.allowed_hosts.is_empty() {
        errors.push(ValidationError::NoAllowedHosts);
    } else if config.cors.allowed_hosts.iter().any(|h| h.is_empty()) {
        errors.push(ValidationError::EmptyAllowedHost);
    }

    for (which, value) in [
        ("forecast_url", &config.upstream.forecast_url),
        ("geocoding_url", &config.upstream.geocoding_url),
    ] {
        if url::Url::parse(value).is_err() {
            errors.push(ValidationError::InvalidUpstreamUrl {
                which,
                url: value.clone(),
            });
        }
    }

    for (name, value) in [
        ("connect_secs", config.timeouts.connect_secs),
        ("upstream_secs", config.timeouts.upstream_secs),
        ("request_secs", config.timeouts.request_secs),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroTimeout(name));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

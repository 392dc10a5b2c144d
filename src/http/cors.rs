//! CORS layer built from the configured hostname allow list.
//!
//! Browser-enforced model: requests without an `Origin` header pass through
//! untouched, and disallowed origins are still served — they just never
//! receive the `Access-Control-Allow-Origin` header.

use axum::http::request::Parts;
use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use url::Url;

use crate::config::CorsConfig;

/// Build the CORS layer for the gateway's routes.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let allowed_hosts = config.allowed_hosts.clone();

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _request_parts: &Parts| {
                origin_allowed(origin, &allowed_hosts)
            },
        ))
        .allow_methods([Method::GET])
}

/// An origin is allowed when it parses as a URL whose hostname is listed
/// exactly. Unparseable origins are rejected.
fn origin_allowed(origin: &HeaderValue, allowed_hosts: &[String]) -> bool {
    let Ok(origin) = origin.to_str() else {
        return false;
    };
    let Ok(url) = Url::parse(origin) else {
        return false;
    };
    url.host_str()
        .map(|host| allowed_hosts.iter().any(|allowed| allowed == host))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hosts() -> Vec<String> {
        CorsConfig::default().allowed_hosts
    }

    #[test]
    fn test_localhost_origin_allowed_with_any_port() {
        let origin = HeaderValue::from_static("http://localhost:3000");
        assert!(origin_allowed(&origin, &hosts()));
    }

    #[test]
    fn test_allowed_ip_origin() {
        let origin = HeaderValue::from_static("http://72.61.242.106");
        assert!(origin_allowed(&origin, &hosts()));
    }

    #[test]
    fn test_foreign_origin_rejected() {
        let origin = HeaderValue::from_static("http://evil.example.com");
        assert!(!origin_allowed(&origin, &hosts()));
    }

    #[test]
    fn test_hostname_must_match_exactly() {
        let origin = HeaderValue::from_static("http://localhost.example.com");
        assert!(!origin_allowed(&origin, &hosts()));
    }

    #[test]
    fn test_unparseable_origin_rejected() {
        let origin = HeaderValue::from_static("not a url");
        assert!(!origin_allowed(&origin, &hosts()));
    }
}

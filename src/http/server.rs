//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the two endpoint handlers
//! - Wire up middleware (tracing, request ID, CORS, timeout, metrics)
//! - Bind server to listener, plain or TLS
//! - Shut down gracefully on signal

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use axum_server::tls_rustls::RustlsConfig;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::GatewayConfig;
use crate::http::cors::cors_layer;
use crate::http::handlers;
use crate::http::request::RequestIdLayer;
use crate::observability::metrics::track_metrics;
use crate::upstream::{ForecastClient, GeocodingClient, UpstreamError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub geocoder: GeocodingClient,
    pub forecast: ForecastClient,
}

/// HTTP server for the weather gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Builds the upstream clients once; they are cloned into each request
    /// via the shared state.
    pub fn new(config: GatewayConfig) -> Result<Self, UpstreamError> {
        let geocoder = GeocodingClient::new(&config.upstream, &config.timeouts)?;
        let forecast = ForecastClient::new(&config.upstream, &config.timeouts)?;

        let state = AppState {
            config: Arc::new(config.clone()),
            geocoder,
            forecast,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/reverse-geo", get(handlers::reverse_geo))
            .route("/weather", get(handlers::weather))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(middleware::from_fn(track_metrics))
            .layer(cors_layer(&config.cors))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener until the
    /// shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            tls = self.config.listener.tls.is_some(),
            "HTTP server starting"
        );

        match &self.config.listener.tls {
            Some(tls) => {
                let rustls = RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path).await?;

                let handle = axum_server::Handle::new();
                let shutdown_handle = handle.clone();
                tokio::spawn(async move {
                    let _ = shutdown.recv().await;
                    shutdown_handle.graceful_shutdown(Some(Duration::from_secs(10)));
                });

                axum_server::from_tcp_rustls(listener.into_std()?, rustls)
                    .handle(handle)
                    .serve(self.router.into_make_service())
                    .await?;
            }
            None => {
                axum::serve(listener, self.router)
                    .with_graceful_shutdown(async move {
                        let _ = shutdown.recv().await;
                    })
                    .await?;
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use weather_gateway::config;
use weather_gateway::http::HttpServer;
use weather_gateway::lifecycle::{trigger_on_ctrl_c, Shutdown};
use weather_gateway::observability::metrics;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("weather-gateway v0.1.0 starting");

    let config = config::load_from_env()?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        forecast_url = %config.upstream.forecast_url,
        geocoding_url = %config.upstream.geocoding_url,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    trigger_on_ctrl_c(shutdown);

    // Create and run HTTP server
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown_rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use weather_gateway::config::GatewayConfig;
use weather_gateway::http::HttpServer;
use weather_gateway::lifecycle::Shutdown;

/// Start a mock upstream that answers every request with a fixed JSON body.
///
/// Binds an ephemeral port and returns its address.
pub async fn start_mock_upstream(status: u16, body: &'static str) -> SocketAddr {
    let (addr, _) = start_capturing_upstream(status, body).await;
    addr
}

/// Start a mock upstream that also records the head of every request it
/// serves (request line and headers).
pub async fn start_capturing_upstream(
    status: u16,
    body: &'static str,
) -> (SocketAddr, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let request_lines = Arc::new(Mutex::new(Vec::new()));
    let captured = request_lines.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let captured = captured.clone();
                    tokio::spawn(async move {
                        let mut buf = vec![0u8; 8192];
                        let n = socket.read(&mut buf).await.unwrap_or(0);
                        let request = String::from_utf8_lossy(&buf[..n]).to_string();
                        captured.lock().unwrap().push(request);

                        let status_text = match status {
                            200 => "200 OK",
                            400 => "400 Bad Request",
                            500 => "500 Internal Server Error",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, request_lines)
}

/// Start the gateway on an ephemeral port and return its base URL plus the
/// shutdown coordinator keeping it alive.
pub async fn start_gateway(config: GatewayConfig) -> (String, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    let server = HttpServer::new(config).unwrap();

    tokio::spawn(async move {
        let _ = server.run(listener, shutdown_rx).await;
    });

    (format!("http://{}", addr), shutdown)
}

/// A columnar forecast response the gateway can reshape.
///
/// Slot values are distinct so positional mix-ups are visible in assertions.
pub const FORECAST_BODY: &str = r#"{
    "latitude": 52.52,
    "longitude": 13.41,
    "elevation": 38.0,
    "utc_offset_seconds": 0,
    "timezone": "Europe/Berlin",
    "timezone_abbreviation": "CET",
    "current": { "time": 1700000000, "variables": [11.5, 72.0, 9.5, 14.0, 0.2] },
    "hourly": {
        "time": 0, "time_end": 10, "interval": 2,
        "variables": [
            [1.0, 1.1, 1.2, 1.3, 1.4],
            [2.0, 2.1, 2.2, 2.3, 2.4],
            [3.0, 3.1, 3.2, 3.3, 3.4],
            [4.0, 4.1, 4.2, 4.3, 4.4],
            [5.0, 5.1, 5.2, 5.3, 5.4],
            [6.0, 6.1, 6.2, 6.3, 6.4]
        ]
    },
    "daily": {
        "time": 0, "time_end": 172800, "interval": 86400,
        "variables": [[61.0, 3.0], [12.0, 13.0], [4.0, 5.0]]
    }
}"#;

/// Config pointing both upstreams at the given mock addresses.
pub fn gateway_config(forecast: SocketAddr, geocoding: SocketAddr) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.upstream.forecast_url = format!("http://{}/v1/forecast", forecast);
    config.upstream.geocoding_url = format!("http://{}/reverse", geocoding);
    config.timeouts.connect_secs = 2;
    config.timeouts.upstream_secs = 2;
    config
}

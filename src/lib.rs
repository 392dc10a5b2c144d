//! Weather gateway: an HTTP front for two upstream data providers.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌───────────────────────────────────────────────┐
//!                    │                WEATHER GATEWAY                 │
//!                    │                                                │
//!   Client Request   │  ┌──────────┐   ┌──────────────────────────┐  │
//!   ─────────────────┼─▶│  http    │──▶│ handlers                  │  │
//!                    │  │  server  │   │  /reverse-geo  /weather   │  │
//!                    │  └──────────┘   └─────┬───────────┬────────┘  │
//!                    │                       │           │            │
//!                    │                       ▼           ▼            │
//!                    │                ┌──────────┐ ┌──────────┐      │     Reverse-geocoding
//!                    │                │ upstream │ │ upstream │──────┼───▶ + forecast
//!   Client Response  │                │ geocode  │ │ forecast │      │     providers
//!   ◀────────────────┼────────────────│ (relay)  │ │ (report) │      │
//!                    │                └──────────┘ └──────────┘      │
//!                    │                                                │
//!                    │  ┌──────────────────────────────────────────┐ │
//!                    │  │          Cross-Cutting Concerns           │ │
//!                    │  │  config · observability · lifecycle       │ │
//!                    │  └──────────────────────────────────────────┘ │
//!                    └───────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod http;
pub mod report;
pub mod upstream;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use report::WeatherReport;

//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, middleware layering)
//!     → request.rs (add request ID)
//!     → cors.rs (origin allow list)
//!     → handlers.rs (validate params, call upstream, shape response)
//!     → Send to client
//! ```

pub mod cors;
pub mod handlers;
pub mod request;
pub mod server;

pub use handlers::ApiError;
pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;

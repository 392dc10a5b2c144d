//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Build clients → Bind listener → Serve
//!
//! Shutdown:
//!     SIGINT → signals.rs → shutdown.rs broadcast → server drains and exits
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::trigger_on_ctrl_c;

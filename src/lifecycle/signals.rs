//! Process signal handling.

use crate::lifecycle::Shutdown;

/// Spawn a task that triggers shutdown when Ctrl-C is received.
///
/// Takes ownership of the coordinator; subscribe before calling.
pub fn trigger_on_ctrl_c(shutdown: Shutdown) {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            return;
        }
        tracing::info!("Shutdown signal received");
        shutdown.trigger();
    });
}

//! Stop signals for the webhook server.

use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

use crate::TRACING_TARGET_SERVER_SHUTDOWN;

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
///
/// After this returns the server stops accepting deliveries; events already
/// queued are still handed to the consumer.
pub async fn shutdown_signal() {
    let signal_name = tokio::select! {
        name = interrupt() => name,
        name = terminate() => name,
    };

    tracing::info!(
        target: TRACING_TARGET_SERVER_SHUTDOWN,
        signal = signal_name,
        "No longer accepting webhook deliveries, draining queued events"
    );
}

async fn interrupt() -> &'static str {
    if let Err(err) = ctrl_c().await {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %err,
            "Ctrl+C handler unavailable"
        );
        std::future::pending::<()>().await;
    }

    "SIGINT"
}

#[cfg(unix)]
async fn terminate() -> &'static str {
    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(err) => {
            tracing::error!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                error = %err,
                "SIGTERM handler unavailable"
            );
            std::future::pending::<()>().await;
        }
    }

    "SIGTERM"
}

#[cfg(not(unix))]
async fn terminate() -> &'static str {
    std::future::pending().await
}

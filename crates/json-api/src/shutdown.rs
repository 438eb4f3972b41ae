//! Graceful shutdown on Ctrl+C or SIGTERM.

use std::io;

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install {signal} handler: {source}")]
    Install {
        signal: &'static str,
        #[source]
        source: io::Error,
    },
}

#[cfg(unix)]
async fn sigterm() -> Result<(), ShutdownSignalError> {
    let mut stream = signal::unix::signal(signal::unix::SignalKind::terminate()).map_err(
        |source| ShutdownSignalError::Install {
            signal: "SIGTERM",
            source,
        },
    )?;

    stream.recv().await;

    Ok(())
}

#[cfg(not(unix))]
async fn sigterm() -> Result<(), ShutdownSignalError> {
    std::future::pending().await
}

/// Wait for a termination signal, then stop accepting connections and let
/// in-flight requests drain.
pub(crate) async fn listen(handle: ServerHandle) -> Result<(), ShutdownSignalError> {
    let received = tokio::select! {
        result = signal::ctrl_c() => {
            result.map_err(|source| ShutdownSignalError::Install { signal: "Ctrl+C", source })?;
            "ctrl_c"
        }
        result = sigterm() => {
            result?;
            "SIGTERM"
        }
    };

    info!(signal = received, "shutting down gracefully");
    handle.stop_graceful(None);

    Ok(())
}

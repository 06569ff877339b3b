//! Listener setup and accept-error handling.

use std::future::Future;
use std::io;
use std::time::Duration;

use tokio::net::TcpListener;

use synthload_core::error::{Result, SynthLoadError};

use crate::config::listen_addrs;

/// Pause after an accept error that is not tied to a single connection.
/// EMFILE/ENFILE leave the pending connection in the backlog, so retrying
/// at once would fail again immediately.
pub const ACCEPT_BACKOFF: Duration = Duration::from_secs(1);

/// Bind the listener for a `-bind` value. `:port` tries dual-stack first and
/// falls back to IPv4; the last failure is reported.
pub async fn bind(bind: &str) -> Result<TcpListener> {
    let mut last = None;
    for addr in listen_addrs(bind) {
        match TcpListener::bind(&addr).await {
            Ok(listener) => return Ok(listener),
            Err(source) => {
                tracing::debug!(%addr, error = %source, "bind attempt failed");
                last = Some(SynthLoadError::Bind { addr, source });
            }
        }
    }
    Err(last.unwrap_or_else(|| SynthLoadError::Internal(format!("no listen address for {bind:?}"))))
}

/// Errors that only concern the connection being accepted.
pub fn is_connection_error(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::ConnectionReset
    )
}

/// Call `accept` until it yields a connection. Per-connection errors retry
/// at once; anything else is logged and retried after [`ACCEPT_BACKOFF`].
pub async fn accept_retrying<T, F, Fut>(mut accept: F) -> T
where
    F: FnMut() -> Fut,
    Fut: Future<Output = io::Result<T>>,
{
    loop {
        match accept().await {
            Ok(conn) => return conn,
            Err(e) if is_connection_error(&e) => {
                tracing::debug!(error = %e, "connection dropped before accept");
            }
            Err(e) => {
                tracing::warn!(error = %e, backoff = ?ACCEPT_BACKOFF, "accept failed");
                tokio::time::sleep(ACCEPT_BACKOFF).await;
            }
        }
    }
}

//! Accept loop.
//!
//! One tokio task per connection. On shutdown the loop stops accepting, asks
//! every live connection to finish its in-flight requests, and waits for the
//! connection tasks to drain.

use std::future::Future;

use axum::Router;
use hyper::server::conn::http1;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto;
use hyper_util::service::TowerToHyperService;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tokio::task::JoinSet;

use synthload_core::error::Result;

use super::listener::accept_retrying;
use super::Transport;

pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    transport: Transport,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send,
{
    let (stop_tx, stop_rx) = watch::channel(false);
    let mut conns = JoinSet::new();
    tokio::pin!(shutdown);
    let accept_from = &listener;

    loop {
        tokio::select! {
            (stream, peer) = accept_retrying(move || accept_from.accept()) => {
                tracing::trace!(%peer, "connection accepted");
                conns.spawn(serve_connection(stream, app.clone(), transport, stop_rx.clone()));
            }
            Some(_) = conns.join_next(), if !conns.is_empty() => {}
            _ = &mut shutdown => break,
        }
    }

    drop(listener);
    let _ = stop_tx.send(true);
    tracing::info!(open = conns.len(), "draining connections");
    while conns.join_next().await.is_some() {}
    Ok(())
}

async fn serve_connection(
    stream: TcpStream,
    app: Router,
    transport: Transport,
    mut stop: watch::Receiver<bool>,
) {
    let io = TokioIo::new(stream);
    let svc = TowerToHyperService::new(app);

    let mut draining = false;
    let res = match transport {
        Transport::Http1 => {
            let conn = http1::Builder::new().serve_connection(io, svc);
            tokio::pin!(conn);
            loop {
                tokio::select! {
                    res = conn.as_mut() => break res.map_err(|e| e.to_string()),
                    _ = stop.changed(), if !draining => {
                        draining = true;
                        conn.as_mut().graceful_shutdown();
                    }
                }
            }
        }
        Transport::H2c => {
            let builder = auto::Builder::new(TokioExecutor::new());
            let conn = builder.serve_connection(io, svc);
            tokio::pin!(conn);
            loop {
                tokio::select! {
                    res = conn.as_mut() => break res.map_err(|e| e.to_string()),
                    _ = stop.changed(), if !draining => {
                        draining = true;
                        conn.as_mut().graceful_shutdown();
                    }
                }
            }
        }
    };

    if let Err(e) = res {
        tracing::debug!(error = %e, transport = transport.as_str(), "connection closed with error");
    }
}

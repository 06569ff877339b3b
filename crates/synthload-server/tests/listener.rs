//! Listener binding and accept-error backoff.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use synthload_core::SynthLoadError;
use synthload_server::transport::listener::{accept_retrying, ACCEPT_BACKOFF};
use synthload_server::transport;

const EMFILE: i32 = 24;

#[tokio::test]
async fn occupied_port_is_a_bind_error() {
    let held = transport::bind("127.0.0.1:0").await.unwrap();
    let addr = held.local_addr().unwrap();

    let err = transport::bind(&addr.to_string()).await.expect_err("port is taken");
    assert_eq!(err.code(), "BIND");
    match err {
        SynthLoadError::Bind { addr: tried, .. } => assert_eq!(tried, addr.to_string()),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn empty_host_binds_every_interface() {
    let listener = transport::bind(":0").await.unwrap();
    assert!(listener.local_addr().unwrap().ip().is_unspecified());
}

#[tokio::test(start_paused = true)]
async fn fd_exhaustion_backs_off_between_attempts() {
    let calls = AtomicUsize::new(0);
    let start = tokio::time::Instant::now();

    let accepted = accept_retrying(|| {
        let n = calls.fetch_add(1, Ordering::SeqCst);
        async move {
            if n < 3 {
                Err(io::Error::from_raw_os_error(EMFILE))
            } else {
                Ok(n)
            }
        }
    })
    .await;

    assert_eq!(accepted, 3);
    assert_eq!(start.elapsed(), ACCEPT_BACKOFF * 3);
}

#[tokio::test(start_paused = true)]
async fn persistent_fd_exhaustion_is_rate_limited() {
    let calls = AtomicUsize::new(0);

    let res = tokio::time::timeout(
        Duration::from_millis(2_500),
        accept_retrying(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>(io::Error::from_raw_os_error(EMFILE)) }
        }),
    )
    .await;

    assert!(res.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn dropped_connections_retry_immediately() {
    let calls = AtomicUsize::new(0);
    let start = tokio::time::Instant::now();

    let accepted = accept_retrying(|| {
        let n = calls.fetch_add(1, Ordering::SeqCst);
        async move {
            match n {
                0 => Err(io::Error::from(io::ErrorKind::ConnectionAborted)),
                1 => Err(io::Error::from(io::ErrorKind::ConnectionReset)),
                _ => Ok(n),
            }
        }
    })
    .await;

    assert_eq!(accepted, 2);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

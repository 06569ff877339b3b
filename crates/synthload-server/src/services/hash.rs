use std::time::{Duration, Instant};

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use synthload_core::error::{Result, SynthLoadError};
use synthload_core::hasher::{hash_random_data, HashOutcome};
use synthload_core::params::HashParams;

use crate::dispatch::{RouteHandler, RouteRequest};
use crate::error::HttpError;

pub const MB_PARAM: &str = "mb";
pub const ITERATIONS_PARAM: &str = "iterations";

/// CPU-bound endpoint: hashes `mb` MiB of random data `iterations` times.
///
/// The loop runs on the blocking pool so async workers stay free. It is not
/// cancelled if the client goes away.
pub struct HashService;

/// Every iteration's outcome plus the wall time for all of them.
#[derive(Debug)]
pub struct HashRun {
    pub outcomes: Vec<HashOutcome>,
    pub elapsed: Duration,
}

impl HashService {
    /// Run every iteration synchronously on the calling thread.
    pub fn run(p: HashParams) -> Result<HashRun> {
        let start = Instant::now();
        let mut outcomes = Vec::new();
        for iteration in 1..=p.iterations {
            let out = hash_random_data(p.bytes_per_iteration())?;
            tracing::info!(iteration, digest = %out.digest, "completed hash");
            outcomes.push(out);
        }
        Ok(HashRun {
            outcomes,
            elapsed: start.elapsed(),
        })
    }
}

#[async_trait]
impl RouteHandler for HashService {
    fn name(&self) -> &'static str {
        "hash"
    }

    async fn handle(&self, req: RouteRequest) -> Response {
        let p = HashParams::from_raw(
            req.params.get(MB_PARAM),
            req.params.get(ITERATIONS_PARAM),
        );
        tracing::info!(mb = p.mb, iterations = p.iterations, "hashing");

        let res = tokio::task::spawn_blocking(move || Self::run(p))
            .await
            .map_err(|e| SynthLoadError::Internal(format!("hash task failed: {e}")))
            .and_then(|r| r);

        match res {
            Ok(run) => (
                StatusCode::OK,
                format!("Hashing {} mb, {} times took {:?}", p.mb, p.iterations, run.elapsed),
            )
                .into_response(),
            Err(e) => {
                tracing::error!(error = %e, "hash request failed");
                HttpError(e).into_response()
            }
        }
    }
}

use std::time::Duration;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use synthload_core::params;

use crate::dispatch::{RouteHandler, RouteRequest};

/// Path parameter holding the requested seconds.
pub const WAIT_PARAM: &str = "waitSec";

/// Sleeps, then answers 200. The body echoes the raw parameter, not the
/// defaulted duration.
pub struct WaitService;

#[async_trait]
impl RouteHandler for WaitService {
    fn name(&self) -> &'static str {
        "wait"
    }

    async fn handle(&self, req: RouteRequest) -> Response {
        let raw = req.params.get(WAIT_PARAM);
        let secs = params::wait_secs(raw);

        tracing::debug!(raw, secs, "waiting");
        tokio::time::sleep(Duration::from_secs(secs)).await;

        (StatusCode::OK, format!("Waited for {raw} seconds.")).into_response()
    }
}

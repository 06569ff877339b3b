use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::dispatch::{RouteHandler, RouteRequest};
use crate::obs::metrics::EXPOSITION_CONTENT_TYPE;
use crate::obs::ServerMetrics;

/// Serves the registry snapshot. The scrape itself is recorded after the
/// snapshot is taken, so it shows up in the next one.
pub struct MetricsService {
    metrics: Arc<ServerMetrics>,
}

impl MetricsService {
    pub fn new(metrics: Arc<ServerMetrics>) -> Self {
        Self { metrics }
    }
}

#[async_trait]
impl RouteHandler for MetricsService {
    fn name(&self) -> &'static str {
        "metrics"
    }

    async fn handle(&self, _req: RouteRequest) -> Response {
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)],
            self.metrics.render(),
        )
            .into_response()
    }
}

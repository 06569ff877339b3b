use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::dispatch::{RouteHandler, RouteRequest};

/// Fixed status with an empty body, for simulating failing upstreams.
pub struct StatusService {
    name: &'static str,
    status: StatusCode,
}

impl StatusService {
    pub fn new(name: &'static str, status: StatusCode) -> Self {
        Self { name, status }
    }

    pub fn not_found() -> Self {
        Self::new("err", StatusCode::NOT_FOUND)
    }

    pub fn internal_error() -> Self {
        Self::new("internal-err", StatusCode::INTERNAL_SERVER_ERROR)
    }
}

#[async_trait]
impl RouteHandler for StatusService {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn handle(&self, _req: RouteRequest) -> Response {
        self.status.into_response()
    }
}

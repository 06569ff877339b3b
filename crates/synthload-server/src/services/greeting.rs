use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::dispatch::{RouteHandler, RouteRequest};

pub const GREETING: &str = "Hello from example application.";

/// Instant 200. Also serves every path no other route claims.
pub struct GreetingService;

#[async_trait]
impl RouteHandler for GreetingService {
    fn name(&self) -> &'static str {
        "found"
    }

    async fn handle(&self, _req: RouteRequest) -> Response {
        (StatusCode::OK, GREETING).into_response()
    }
}

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;

use synthload_core::SynthLoadError;
use synthload_server::error::HttpError;

#[tokio::test]
async fn entropy_failure_renders_json_500() {
    let resp = HttpError(SynthLoadError::Entropy("no randomness".into())).into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/json");

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v["error"], "ENTROPY");
    assert_eq!(v["message"], "random source failed: no randomness");
}

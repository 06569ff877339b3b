//! HTTP rendering for core errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use synthload_core::SynthLoadError;

/// A handler failure. Handlers only fail on server-side faults, so every
/// variant renders as 500 with a JSON `{error, message}` body.
#[derive(Debug)]
pub struct HttpError(pub SynthLoadError);

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.0.code(),
            "message": self.0.to_string(),
        }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

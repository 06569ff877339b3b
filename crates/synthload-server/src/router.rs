//! Axum router wiring.
//!
//! Every request falls through to the dispatcher, which owns path matching
//! and instrumentation, so the route table lives in one place.

use axum::{
    extract::State,
    http::{Method, Uri},
    response::Response,
    Router,
};

use crate::app_state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new().fallback(dispatch).with_state(state)
}

async fn dispatch(State(app): State<AppState>, method: Method, uri: Uri) -> Response {
    app.dispatcher().dispatch(&method, &uri).await
}

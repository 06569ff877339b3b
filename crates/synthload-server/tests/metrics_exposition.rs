//! Request accounting and the `/metrics` exposition.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use axum::body::Body;
use axum::http::{Method, Request};
use axum::Router;
use tower::ServiceExt;

use synthload_server::app_state::AppState;
use synthload_server::router::build_router;

async fn hit(app: &Router, method: Method, uri: &str) -> String {
    let req = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

#[tokio::test]
async fn counter_sum_matches_request_count() {
    let state = AppState::new("test").unwrap();
    let app = build_router(state.clone());

    let requests = [
        (Method::GET, "/"),
        (Method::GET, "/err"),
        (Method::POST, "/err"),
        (Method::GET, "/internal-err"),
        (Method::GET, "/missing"),
        (Method::GET, "/wait"),
        (Method::GET, "/metrics"),
    ];
    for (method, uri) in &requests {
        hit(&app, method.clone(), uri).await;
    }

    let metrics = state.metrics();
    assert_eq!(metrics.http_requests_total.total(), requests.len() as u64);
    assert_eq!(metrics.http_requests_total.get(&[("code", "404"), ("method", "get")]), 1);
    assert_eq!(metrics.http_requests_total.get(&[("code", "404"), ("method", "post")]), 1);
    assert_eq!(metrics.http_requests_total.get(&[("code", "200"), ("method", "get")]), 3);
    assert_eq!(metrics.http_requests_total.get(&[("code", "301"), ("method", "get")]), 1);

    assert_eq!(metrics.version.get(&[("version", "test")]), Some(1));

    let dur = &metrics.http_request_duration_seconds;
    assert_eq!(dur.count(&[("code", "200"), ("handler", "found"), ("method", "get")]), 2);
    assert_eq!(dur.count(&[("code", "500"), ("handler", "internal-err"), ("method", "get")]), 1);
    assert_eq!(dur.count(&[("code", "301"), ("handler", "redirect"), ("method", "get")]), 1);
    assert_eq!(dur.count(&[("code", "200"), ("handler", "metrics"), ("method", "get")]), 1);
}

#[tokio::test]
async fn exposition_lists_all_families() {
    let app = build_router(AppState::new("9.9.9").unwrap());
    hit(&app, Method::GET, "/").await;
    let text = hit(&app, Method::GET, "/metrics").await;

    for line in [
        "# TYPE http_requests_total counter",
        "# TYPE http_request_duration_seconds histogram",
        "# TYPE version gauge",
        "http_requests_total{code=\"200\",method=\"get\"} 1",
        "http_request_duration_seconds_count{code=\"200\",handler=\"found\",method=\"get\"} 1",
        "http_request_duration_seconds_bucket{code=\"200\",handler=\"found\",method=\"get\",le=\"+Inf\"} 1",
        "version{version=\"9.9.9\"} 1",
    ] {
        assert!(text.lines().any(|l| l == line), "missing {line:?} in:\n{text}");
    }
}

#[tokio::test]
async fn exposition_lines_are_well_formed() {
    let app = build_router(AppState::new("test").unwrap());
    hit(&app, Method::GET, "/err").await;
    let text = hit(&app, Method::GET, "/metrics").await;

    for line in text.lines() {
        if line.starts_with('#') {
            let kind = line.split_whitespace().nth(1).unwrap();
            assert!(kind == "HELP" || kind == "TYPE", "line={line}");
            continue;
        }
        let (series, value) = line.rsplit_once(' ').unwrap();
        assert!(value.parse::<f64>().is_ok(), "line={line}");
        let name_end = series.find('{').unwrap_or(series.len());
        let name = &series[..name_end];
        assert!(
            name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
            "line={line}"
        );
        if name_end < series.len() {
            assert!(series.ends_with('}'), "line={line}");
        }
    }
}

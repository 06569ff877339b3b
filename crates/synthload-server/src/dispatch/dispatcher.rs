use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

use synthload_core::error::{Result, SynthLoadError};

use super::pattern::{PathParams, Pattern};
use crate::obs::ServerMetrics;

/// Handler name recorded for trailing-slash redirects.
pub const REDIRECT_HANDLER: &str = "redirect";
/// Handler name recorded when no pattern matches at all.
pub const UNROUTED_HANDLER: &str = "unrouted";

/// What a handler sees of the request.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub method: Method,
    pub params: PathParams,
}

/// A synthetic endpoint. `name` becomes the `handler` metric label.
#[async_trait]
pub trait RouteHandler: Send + Sync {
    fn name(&self) -> &'static str;
    async fn handle(&self, req: RouteRequest) -> Response;
}

struct Route {
    pattern: Pattern,
    handler: Arc<dyn RouteHandler>,
}

/// Outcome of matching a path against the route table.
pub enum Resolution<'a> {
    Route {
        handler: &'a Arc<dyn RouteHandler>,
        params: PathParams,
    },
    /// Permanent redirect to the slashed subtree root.
    Redirect(String),
    NotFound,
}

/// Route table plus the instrumentation wrapped around every handler.
pub struct Dispatcher {
    routes: Vec<Route>,
    metrics: Arc<ServerMetrics>,
}

impl Dispatcher {
    pub fn new(metrics: Arc<ServerMetrics>) -> Self {
        Self {
            routes: Vec::new(),
            metrics,
        }
    }

    pub fn register(&mut self, pattern: &str, handler: Arc<dyn RouteHandler>) -> Result<()> {
        let pattern = Pattern::parse(pattern)?;
        if self.routes.iter().any(|r| r.pattern.as_str() == pattern.as_str()) {
            return Err(SynthLoadError::Config(format!(
                "route pattern registered twice: {}",
                pattern.as_str()
            )));
        }
        self.routes.push(Route { pattern, handler });
        Ok(())
    }

    pub fn registered_patterns(&self) -> Vec<&str> {
        self.routes.iter().map(|r| r.pattern.as_str()).collect()
    }

    /// Most specific match wins. A subtree root requested without its
    /// trailing slash is redirected unless an exact pattern claims it.
    pub fn resolve(&self, path: &str) -> Resolution<'_> {
        let best = self
            .routes
            .iter()
            .filter_map(|r| r.pattern.matches(path).map(|p| (r, p)))
            .max_by_key(|(r, _)| r.pattern.specificity());

        match best {
            Some((route, params)) if !route.pattern.is_subtree() => Resolution::Route {
                handler: &route.handler,
                params,
            },
            _ if self.routes.iter().any(|r| r.pattern.wants_trailing_slash(path)) => {
                Resolution::Redirect(format!("{path}/"))
            }
            Some((route, params)) => Resolution::Route {
                handler: &route.handler,
                params,
            },
            None => Resolution::NotFound,
        }
    }

    /// Resolve, run, and record one request.
    pub async fn dispatch(&self, method: &Method, uri: &Uri) -> Response {
        let start = Instant::now();

        let (name, resp) = match self.resolve(uri.path()) {
            Resolution::Route { handler, params } => {
                let req = RouteRequest {
                    method: method.clone(),
                    params,
                };
                (handler.name(), handler.handle(req).await)
            }
            Resolution::Redirect(mut location) => {
                if let Some(q) = uri.query() {
                    location.push('?');
                    location.push_str(q);
                }
                let resp =
                    (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response();
                (REDIRECT_HANDLER, resp)
            }
            Resolution::NotFound => (UNROUTED_HANDLER, StatusCode::NOT_FOUND.into_response()),
        };

        let elapsed = start.elapsed();
        let code = resp.status().as_u16().to_string();
        let method_label = method.as_str().to_ascii_lowercase();
        self.metrics.record(&code, name, &method_label, elapsed);
        tracing::debug!(
            handler = name,
            method = %method,
            status = %code,
            ?elapsed,
            "request served"
        );

        resp
    }
}

//! Shared application state.
//!
//! Builds the metrics registry and the dispatcher once, registers every
//! synthetic endpoint, and hands both out by `Arc`.

use std::sync::Arc;

use synthload_core::error::Result;

use crate::dispatch::Dispatcher;
use crate::obs::ServerMetrics;
use crate::services::{GreetingService, HashService, MetricsService, StatusService, WaitService};

/// Version label reported by the `version` gauge.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Clone)]
pub struct AppState {
    metrics: Arc<ServerMetrics>,
    dispatcher: Arc<Dispatcher>,
}

impl AppState {
    /// Build state with the standard route table.
    pub fn new(app_version: &str) -> Result<Self> {
        let metrics = Arc::new(ServerMetrics::new(app_version));
        let mut dispatcher = Dispatcher::new(Arc::clone(&metrics));

        let wait = Arc::new(WaitService);
        let hash = Arc::new(HashService);

        dispatcher.register("/", Arc::new(GreetingService))?;
        dispatcher.register("/err", Arc::new(StatusService::not_found()))?;
        dispatcher.register("/internal-err", Arc::new(StatusService::internal_error()))?;
        dispatcher.register("/wait/{waitSec}", wait.clone())?;
        dispatcher.register("/wait/", wait)?;
        dispatcher.register("/hash/{mb}/{iterations}", hash.clone())?;
        dispatcher.register("/hash/{mb}", hash.clone())?;
        dispatcher.register("/hash/", hash)?;
        dispatcher.register("/metrics", Arc::new(MetricsService::new(Arc::clone(&metrics))))?;

        tracing::debug!(routes = ?dispatcher.registered_patterns(), "routes registered");

        Ok(Self {
            metrics,
            dispatcher: Arc::new(dispatcher),
        })
    }

    pub fn metrics(&self) -> Arc<ServerMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        Arc::clone(&self.dispatcher)
    }
}


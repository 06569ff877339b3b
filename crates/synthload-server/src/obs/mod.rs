//! In-process metrics rendered in Prometheus text exposition format.
//!
//! Samples live in `DashMap`s of atomics so every in-flight request can
//! record without taking a handler-level lock.

pub mod metrics;

pub use metrics::ServerMetrics;

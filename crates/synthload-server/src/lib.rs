//! synthload server library entry.
//!
//! Wires the CLI and config, the metrics registry, the dispatcher and its
//! synthetic services, and the transport loop into a runnable load target.
//! Consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod obs;
pub mod router;
pub mod services;
pub mod transport;

//! Synthetic endpoints.

pub mod greeting;
pub mod hash;
pub mod metrics;
pub mod status;
pub mod wait;

pub use greeting::GreetingService;
pub use hash::HashService;
pub use metrics::MetricsService;
pub use status::StatusService;
pub use wait::WaitService;

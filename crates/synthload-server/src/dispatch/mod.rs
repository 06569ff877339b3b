//! Request dispatch.
//!
//! Re-exports the dispatcher, the handler trait, and pattern types so the
//! services and router can depend on this module directly.

pub mod dispatcher;
pub mod pattern;

pub use dispatcher::{Dispatcher, Resolution, RouteHandler, RouteRequest};
pub use pattern::{PathParams, Pattern};

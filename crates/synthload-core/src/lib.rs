//! synthload core: transport-agnostic workload primitives and error types.
//!
//! This crate holds the pieces of the load target that do not care how a
//! request arrived: path parameter defaulting, the random-data hasher, and the
//! shared error surface. It carries no runtime or HTTP dependencies so the
//! workloads can be driven from tests or other front ends.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here.
//! All fallible paths surface as `SynthLoadError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod hasher;
pub mod params;

/// Shared result type.
pub use error::{Result, SynthLoadError};

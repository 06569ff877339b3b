//! Path parameter defaulting.
//!
//! Every numeric path parameter follows the same rule: a value that is
//! absent, fails to parse, or is rejected by the predicate silently becomes
//! the default. Nothing is ever reported back to the caller.

use std::str::FromStr;

/// Default sleep for `/wait` when no usable value is given.
pub const DEFAULT_WAIT_SECS: u64 = 5;
/// Default megabytes per hash iteration.
pub const DEFAULT_HASH_MB: u64 = 5;
/// Default number of hash iterations.
pub const DEFAULT_HASH_ITERATIONS: u64 = 5;

/// Parse `raw`, falling back to `default` on parse failure or when `accept`
/// rejects the parsed value.
pub fn parse_with_default<T, F>(raw: &str, default: T, accept: F) -> T
where
    T: FromStr,
    F: FnOnce(&T) -> bool,
{
    match raw.parse::<T>() {
        Ok(v) if accept(&v) => v,
        _ => default,
    }
}

/// Parse a strictly positive integer, else `default`.
///
/// Negative input never parses as `u64`, and zero is rejected explicitly.
pub fn positive_or(raw: &str, default: u64) -> u64 {
    parse_with_default(raw, default, |v| *v >= 1)
}

/// Resolved parameters for one `/hash` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    pub mb: u64,
    pub iterations: u64,
}

impl HashParams {
    /// Resolve both parameters independently from their raw path segments.
    pub fn from_raw(mb: &str, iterations: &str) -> Self {
        Self {
            mb: positive_or(mb, DEFAULT_HASH_MB),
            iterations: positive_or(iterations, DEFAULT_HASH_ITERATIONS),
        }
    }

    /// Bytes to hash per iteration (`mb` MiB), saturating on overflow.
    pub fn bytes_per_iteration(&self) -> u64 {
        self.mb.saturating_mul(1024 * 1024)
    }
}

/// Resolve the `/wait` duration in whole seconds.
pub fn wait_secs(raw: &str) -> u64 {
    positive_or(raw, DEFAULT_WAIT_SECS)
}

//! Shared error type across synthload crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, SynthLoadError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum SynthLoadError {
    #[error("invalid config: {0}")]
    Config(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("random source failed: {0}")]
    Entropy(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl SynthLoadError {
    /// Stable machine-readable code, used in error bodies and logs.
    pub fn code(&self) -> &'static str {
        match self {
            SynthLoadError::Config(_) => "CONFIG",
            SynthLoadError::UnsupportedVersion => "UNSUPPORTED_VERSION",
            SynthLoadError::Bind { .. } => "BIND",
            SynthLoadError::Entropy(_) => "ENTROPY",
            SynthLoadError::Internal(_) => "INTERNAL",
        }
    }
}

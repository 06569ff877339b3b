//! CPU-bound workload: SHA-256 over freshly generated random bytes.
//!
//! The buffer is refilled from the OS CSPRNG for every chunk, so the work
//! cannot be short-circuited by caching and the digest is never stable
//! across calls.

use sha2::{Digest, Sha256};

use crate::error::{Result, SynthLoadError};

/// Size of the random buffer fed to the digest per step.
pub const CHUNK_SIZE: usize = 1024;

/// Result of one hashing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashOutcome {
    /// Lowercase hex SHA-256 of everything processed (64 chars).
    pub digest: String,
    /// Bytes actually fed to the digest; a multiple of [`CHUNK_SIZE`].
    pub bytes_processed: u64,
}

/// Hash random data until at least `target_bytes` have been processed.
///
/// A target of zero is treated as one byte, so at least one chunk is always
/// hashed. The run may overshoot the target by up to one chunk.
pub fn hash_random_data(target_bytes: u64) -> Result<HashOutcome> {
    let target = target_bytes.max(1);
    let mut buffer = [0u8; CHUNK_SIZE];
    let mut hasher = Sha256::new();
    let mut processed: u64 = 0;

    while processed < target {
        getrandom::fill(&mut buffer).map_err(|e| SynthLoadError::Entropy(e.to_string()))?;
        hasher.update(buffer);
        processed += CHUNK_SIZE as u64;
    }

    Ok(HashOutcome {
        digest: hex::encode(hasher.finalize()),
        bytes_processed: processed,
    })
}

//! Hash workload accounting.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use synthload_core::params::HashParams;
use synthload_server::services::hash::HashService;

const MIB: u64 = 1024 * 1024;

#[test]
fn runs_the_hasher_once_per_iteration() {
    let run = HashService::run(HashParams { mb: 1, iterations: 3 }).unwrap();

    assert_eq!(run.outcomes.len(), 3);
    for out in &run.outcomes {
        assert!(out.bytes_processed >= MIB, "bytes={}", out.bytes_processed);
        assert_eq!(out.digest.len(), 64);
    }
}

#[test]
fn each_iteration_covers_the_requested_size() {
    let run = HashService::run(HashParams { mb: 2, iterations: 1 }).unwrap();

    assert_eq!(run.outcomes.len(), 1);
    assert!(run.outcomes[0].bytes_processed >= 2 * MIB);
}

#[test]
fn defaulted_params_hash_five_times() {
    let p = HashParams::from_raw("1", "nope");
    let run = HashService::run(p).unwrap();
    assert_eq!(run.outcomes.len(), 5);
}

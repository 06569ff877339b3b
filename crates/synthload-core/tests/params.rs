//! Path parameter defaulting rules.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use synthload_core::params::{
    parse_with_default, positive_or, wait_secs, HashParams, DEFAULT_HASH_ITERATIONS,
    DEFAULT_HASH_MB, DEFAULT_WAIT_SECS,
};

#[test]
fn positive_values_pass_through() {
    assert_eq!(positive_or("1", 9), 1);
    assert_eq!(positive_or("42", 9), 42);
    assert_eq!(positive_or("+7", 9), 7);
}

#[test]
fn unusable_values_fall_back() {
    for raw in ["", "abc", "0", "-3", "1.5", " 2", "99999999999999999999999"] {
        assert_eq!(positive_or(raw, 9), 9, "raw={raw:?}");
    }
}

#[test]
fn predicate_controls_acceptance() {
    assert_eq!(parse_with_default("10", 3i64, |v| *v % 2 == 0), 10);
    assert_eq!(parse_with_default("11", 3i64, |v| *v % 2 == 0), 3);
    assert_eq!(parse_with_default("-4", 3i64, |_| true), -4);
}

#[test]
fn wait_defaults_to_five_seconds() {
    assert_eq!(DEFAULT_WAIT_SECS, 5);
    assert_eq!(wait_secs("2"), 2);
    assert_eq!(wait_secs("abc"), 5);
    assert_eq!(wait_secs(""), 5);
    assert_eq!(wait_secs("-1"), 5);
}

#[test]
fn hash_params_default_independently() {
    let p = HashParams::from_raw("3", "");
    assert_eq!(p.mb, 3);
    assert_eq!(p.iterations, DEFAULT_HASH_ITERATIONS);

    let p = HashParams::from_raw("x", "2");
    assert_eq!(p.mb, DEFAULT_HASH_MB);
    assert_eq!(p.iterations, 2);
}

#[test]
fn bytes_per_iteration_is_mebibytes() {
    assert_eq!(HashParams::from_raw("1", "1").bytes_per_iteration(), 1024 * 1024);
    let huge = HashParams { mb: u64::MAX, iterations: 1 };
    assert_eq!(huge.bytes_per_iteration(), u64::MAX);
}

//! Counter, gauge, and histogram vectors with dynamic labels.
//!
//! Labels are flattened into sorted key vectors so each label set maps to a
//! single series regardless of the order callers pass them in. Histogram
//! thresholds and sums are kept in microseconds to stay on integer atomics;
//! they are converted to seconds only when rendering.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::time::Duration;

/// Content type for the text exposition format.
pub const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

type LabelKey = Vec<(String, String)>;

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

fn label_str(key: &LabelKey) -> String {
    key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

fn write_header(out: &mut String, name: &str, help: &str, kind: &str) {
    let _ = writeln!(out, "# HELP {} {}", name, help);
    let _ = writeln!(out, "# TYPE {} {}", name, kind);
}

fn write_sample(out: &mut String, name: &str, labels: &str, value: impl std::fmt::Display) {
    if labels.is_empty() {
        let _ = writeln!(out, "{} {}", name, value);
    } else {
        let _ = writeln!(out, "{}{{{}}} {}", name, labels, value);
    }
}

/// Snapshot a map into label-sorted order so output is stable between scrapes.
fn sorted_snapshot<V, T>(map: &DashMap<LabelKey, V>, read: impl Fn(&V) -> T) -> Vec<(LabelKey, T)> {
    let mut rows: Vec<_> = map.iter().map(|r| (r.key().clone(), read(r.value()))).collect();
    rows.sort_by(|a, b| a.0.cmp(&b.0));
    rows
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value for one label set, zero if never touched.
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map_or(0, |c| c.load(Ordering::Relaxed))
    }

    /// Sum across every label set.
    pub fn total(&self) -> u64 {
        self.map.iter().map(|r| r.value().load(Ordering::Relaxed)).sum()
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        write_header(out, name, help, "counter");
        for (key, val) in sorted_snapshot(&self.map, |c| c.load(Ordering::Relaxed)) {
            write_sample(out, name, &label_str(&key), val);
        }
    }
}

#[derive(Default)]
pub struct GaugeVec {
    map: DashMap<LabelKey, AtomicI64>,
}

impl GaugeVec {
    /// Overwrite the value for a label set.
    pub fn set(&self, labels: &[(&str, &str)], v: i64) {
        let gauge = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicI64::new(0));
        gauge.store(v, Ordering::Relaxed);
    }

    pub fn get(&self, labels: &[(&str, &str)]) -> Option<i64> {
        self.map
            .get(&label_key(labels))
            .map(|g| g.load(Ordering::Relaxed))
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        write_header(out, name, help, "gauge");
        for (key, val) in sorted_snapshot(&self.map, |g| g.load(Ordering::Relaxed)) {
            write_sample(out, name, &label_str(&key), val);
        }
    }
}

// Prometheus default buckets, in microseconds:
// 5ms, 10ms, 25ms, 50ms, 100ms, 250ms, 500ms, 1s, 2.5s, 5s, 10s
const BUCKETS_MICROS: [u64; 11] = [
    5_000, 10_000, 25_000, 50_000, 100_000, 250_000, 500_000, 1_000_000, 2_500_000, 5_000_000,
    10_000_000,
];

#[derive(Default)]
struct AtomicHistogram {
    count: AtomicU64,
    sum_micros: AtomicU64,
    buckets: [AtomicU64; BUCKETS_MICROS.len()],
}

struct HistogramSnapshot {
    count: u64,
    sum_micros: u64,
    buckets: [u64; BUCKETS_MICROS.len()],
}

impl AtomicHistogram {
    fn snapshot(&self) -> HistogramSnapshot {
        HistogramSnapshot {
            count: self.count.load(Ordering::Relaxed),
            sum_micros: self.sum_micros.load(Ordering::Relaxed),
            buckets: std::array::from_fn(|i| self.buckets[i].load(Ordering::Relaxed)),
        }
    }
}

#[derive(Default)]
pub struct HistogramVec {
    map: DashMap<LabelKey, AtomicHistogram>,
}

impl HistogramVec {
    /// Observe a duration; every bucket whose bound covers it is incremented,
    /// which keeps the buckets cumulative.
    pub fn observe(&self, labels: &[(&str, &str)], duration: Duration) {
        let hist = self.map.entry(label_key(labels)).or_default();
        let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);

        hist.count.fetch_add(1, Ordering::Relaxed);
        hist.sum_micros.fetch_add(micros, Ordering::Relaxed);

        for (i, &b) in BUCKETS_MICROS.iter().enumerate() {
            if micros <= b {
                hist.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Number of observations for one label set.
    pub fn count(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map_or(0, |h| h.count.load(Ordering::Relaxed))
    }

    /// Render with `le` bounds and `_sum` in seconds.
    fn render(&self, name: &str, help: &str, out: &mut String) {
        write_header(out, name, help, "histogram");
        for (key, hist) in sorted_snapshot(&self.map, AtomicHistogram::snapshot) {
            let labels = label_str(&key);
            let prefix = if labels.is_empty() {
                String::new()
            } else {
                format!("{},", labels)
            };

            for (i, &le) in BUCKETS_MICROS.iter().enumerate() {
                let le_secs = le as f64 / 1_000_000.0;
                let _ = writeln!(
                    out,
                    "{}_bucket{{{}le=\"{}\"}} {}",
                    name, prefix, le_secs, hist.buckets[i]
                );
            }
            let _ = writeln!(out, "{}_bucket{{{}le=\"+Inf\"}} {}", name, prefix, hist.count);

            let sum_secs = hist.sum_micros as f64 / 1_000_000.0;
            write_sample(out, &format!("{name}_sum"), &labels, sum_secs);
            write_sample(out, &format!("{name}_count"), &labels, hist.count);
        }
    }
}

/// Process-wide registry for the load target.
///
/// Built once at startup and shared by `Arc`; nothing here is global.
pub struct ServerMetrics {
    pub http_requests_total: CounterVec,
    pub http_request_duration_seconds: HistogramVec,
    pub version: GaugeVec,
}

impl ServerMetrics {
    /// Create the registry with the version gauge already set to 1.
    pub fn new(app_version: &str) -> Self {
        let version = GaugeVec::default();
        version.set(&[("version", app_version)], 1);
        Self {
            http_requests_total: CounterVec::default(),
            http_request_duration_seconds: HistogramVec::default(),
            version,
        }
    }

    /// Record one completed request.
    pub fn record(&self, code: &str, handler: &str, method: &str, elapsed: Duration) {
        self.http_requests_total
            .inc(&[("code", code), ("method", method)]);
        self.http_request_duration_seconds
            .observe(&[("code", code), ("handler", handler), ("method", method)], elapsed);
    }

    /// Render every registered metric.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.http_request_duration_seconds.render(
            "http_request_duration_seconds",
            "Duration of all HTTP requests",
            &mut out,
        );
        self.http_requests_total
            .render("http_requests_total", "Count of all HTTP requests", &mut out);
        self.version
            .render("version", "Version information about this binary", &mut out);
        out
    }
}

//! Prometheus metrics for registry activity and request latency.
//!
//! This module provides metrics for:
//! - Student create/update/delete counts
//! - Lookups that found no matching record
//! - Current collection size
//! - Per-endpoint handler latency

use std::time::Instant;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// Students created counter metric name.
pub const METRIC_STUDENTS_CREATED: &str = "students_created_total";
/// Students updated counter metric name.
pub const METRIC_STUDENTS_UPDATED: &str = "students_updated_total";
/// Students deleted counter metric name.
pub const METRIC_STUDENTS_DELETED: &str = "students_deleted_total";
/// Lookups without a matching record counter metric name.
pub const METRIC_STUDENTS_NOT_FOUND: &str = "students_not_found_total";
/// Collection size gauge metric name.
pub const METRIC_STUDENTS_STORED: &str = "students_stored";

/// Initialize all metric descriptions.
/// Call this once at startup, after the recorder is installed.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP handler latency in milliseconds"
    );

    describe_counter!(METRIC_STUDENTS_CREATED, "Total number of students created");
    describe_counter!(METRIC_STUDENTS_UPDATED, "Total number of students updated");
    describe_counter!(METRIC_STUDENTS_DELETED, "Total number of students deleted");
    describe_counter!(
        METRIC_STUDENTS_NOT_FOUND,
        "Total number of requests for a student that does not exist"
    );

    describe_gauge!(METRIC_STUDENTS_STORED, "Number of students currently stored");

    debug!("Metrics initialized");
}

/// Install the global Prometheus recorder and return a handle for rendering.
pub fn install_prometheus() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Record HTTP handler latency.
pub fn record_http_latency(start: Instant, endpoint: &'static str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_HTTP_REQUEST_LATENCY, "endpoint" => endpoint).record(latency_ms);
}

/// Increment students created counter.
pub fn inc_students_created() {
    counter!(METRIC_STUDENTS_CREATED).increment(1);
}

/// Increment students updated counter.
pub fn inc_students_updated() {
    counter!(METRIC_STUDENTS_UPDATED).increment(1);
}

/// Increment students deleted counter.
pub fn inc_students_deleted() {
    counter!(METRIC_STUDENTS_DELETED).increment(1);
}

/// Increment not-found counter.
pub fn inc_students_not_found() {
    counter!(METRIC_STUDENTS_NOT_FOUND).increment(1);
}

/// Set the collection size gauge.
pub fn set_students_stored(count: usize) {
    gauge!(METRIC_STUDENTS_STORED).set(count as f64);
}

/// RAII guard for timing a handler.
/// Records latency under its endpoint label when dropped.
pub struct LatencyTimer {
    start: Instant,
    endpoint: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given endpoint.
    pub fn new(endpoint: &'static str) -> Self {
        Self {
            start: Instant::now(),
            endpoint,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        record_http_latency(self.start, self.endpoint);
    }
}

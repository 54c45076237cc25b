//! Prometheus Metrics Module
//!
//! Provides application-wide metrics collection using Prometheus.
//!
//! # Metrics Collected
//! - Guild operation counts by operation and outcome
//! - Guild operation latency histograms
//! - HTTP request counts by method, path, and status

use std::time::Instant;

use once_cell::sync::Lazy;
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};

use crate::shared::error::AppError;

/// Global metrics registry
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// Guild operations by operation name and outcome ("ok" or an error kind)
pub static GUILD_OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("guild_operations_total", "Total number of guild operations").namespace("guild_server"),
        &["operation", "outcome"],
    )
    .expect("Failed to create GUILD_OPERATIONS_TOTAL metric")
});

/// Guild operation latency histogram, deadline included
pub static GUILD_OPERATION_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    let buckets = vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];
    HistogramVec::new(
        HistogramOpts::new(
            "guild_operation_duration_seconds",
            "Guild operation latency in seconds",
        )
        .namespace("guild_server")
        .buckets(buckets),
        &["operation"],
    )
    .expect("Failed to create GUILD_OPERATION_DURATION_SECONDS metric")
});

/// HTTP request counter - tracks total requests by method, path, and status code
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests").namespace("guild_server"),
        &["method", "path", "status"],
    )
    .expect("Failed to create HTTP_REQUESTS_TOTAL metric")
});

/// Register all metrics with the registry
fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(GUILD_OPERATIONS_TOTAL.clone()))
        .expect("Failed to register GUILD_OPERATIONS_TOTAL");
    registry
        .register(Box::new(GUILD_OPERATION_DURATION_SECONDS.clone()))
        .expect("Failed to register GUILD_OPERATION_DURATION_SECONDS");
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .expect("Failed to register HTTP_REQUESTS_TOTAL");
}

/// Collect and encode all metrics as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return String::new();
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Record the outcome and latency of one guild operation.
pub fn record_guild_operation<T>(operation: &str, started: Instant, result: &Result<T, AppError>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    };
    GUILD_OPERATIONS_TOTAL
        .with_label_values(&[operation, outcome])
        .inc();
    GUILD_OPERATION_DURATION_SECONDS
        .with_label_values(&[operation])
        .observe(started.elapsed().as_secs_f64());
}

/// Helper to record HTTP request metrics
pub fn record_http_request(method: &str, path: &str, status: u16) {
    let status = status.to_string();
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, status.as_str()])
        .inc();
}

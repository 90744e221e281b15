//! Metrics and observability utilities
//!
//! Provides Prometheus-friendly metrics with standardized naming
//! conventions. Recording is a no-op until a recorder is installed.

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use std::time::Instant;

/// Metrics prefix for all Rekayasa metrics
pub const METRICS_PREFIX: &str = "rekayasa";

/// Histogram buckets for request and store latency (in seconds)
pub const LATENCY_BUCKETS: &[f64] = &[
    0.001, // 1ms
    0.005, // 5ms
    0.010, // 10ms
    0.025, // 25ms
    0.050, // 50ms
    0.100, // 100ms
    0.250, // 250ms
    0.500, // 500ms
    1.000, // 1s
    2.500, // 2.5s
    5.000, // 5s
    10.00, // 10s
];

/// Register all metric descriptions
pub fn register_metrics() {
    describe_counter!(
        format!("{}_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of HTTP requests"
    );

    describe_histogram!(
        format!("{}_request_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "HTTP request latency in seconds"
    );

    describe_counter!(
        format!("{}_store_queries_total", METRICS_PREFIX),
        Unit::Count,
        "Total reads issued to the content store"
    );

    describe_histogram!(
        format!("{}_store_query_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Content store read latency in seconds"
    );

    describe_counter!(
        format!("{}_store_errors_total", METRICS_PREFIX),
        Unit::Count,
        "Reads that degraded to an empty result"
    );

    describe_counter!(
        format!("{}_listings_total", METRICS_PREFIX),
        Unit::Count,
        "Listing pages rendered"
    );

    describe_histogram!(
        format!("{}_listing_matched_items", METRICS_PREFIX),
        Unit::Count,
        "Items left after filtering a listing"
    );

    describe_counter!(
        format!("{}_outbound_clicks_total", METRICS_PREFIX),
        Unit::Count,
        "Redirects to external destinations"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record request metrics
pub struct RequestMetrics {
    start: Instant,
    endpoint: String,
    method: String,
}

impl RequestMetrics {
    /// Start tracking a request
    pub fn start(method: &str, endpoint: &str) -> Self {
        Self {
            start: Instant::now(),
            endpoint: endpoint.to_string(),
            method: method.to_string(),
        }
    }

    /// Record request completion
    pub fn finish(self, status: u16) {
        let duration = self.start.elapsed().as_secs_f64();

        counter!(
            format!("{}_requests_total", METRICS_PREFIX),
            "method" => self.method.clone(),
            "endpoint" => self.endpoint.clone(),
            "status" => status.to_string()
        )
        .increment(1);

        histogram!(
            format!("{}_request_duration_seconds", METRICS_PREFIX),
            "method" => self.method,
            "endpoint" => self.endpoint
        )
        .record(duration);
    }
}

/// Helper to record one content store read
pub fn record_store_query(collection: &str, backend: &str, duration_secs: f64, success: bool) {
    let status = if success { "success" } else { "error" };

    counter!(
        format!("{}_store_queries_total", METRICS_PREFIX),
        "collection" => collection.to_string(),
        "backend" => backend.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        format!("{}_store_query_duration_seconds", METRICS_PREFIX),
        "collection" => collection.to_string()
    )
    .record(duration_secs);

    if !success {
        counter!(
            format!("{}_store_errors_total", METRICS_PREFIX),
            "collection" => collection.to_string()
        )
        .increment(1);
    }
}

/// Helper to record a rendered listing
pub fn record_listing(kind: &str, total: usize, matched: usize) {
    let outcome = if matched > 0 {
        "results"
    } else if total > 0 {
        "no_matches"
    } else {
        "no_content"
    };

    counter!(
        format!("{}_listings_total", METRICS_PREFIX),
        "kind" => kind.to_string(),
        "outcome" => outcome
    )
    .increment(1);

    histogram!(
        format!("{}_listing_matched_items", METRICS_PREFIX),
        "kind" => kind.to_string()
    )
    .record(matched as f64);
}

/// Helper to record an outbound click-through
pub fn record_outbound(kind: &str) {
    counter!(
        format!("{}_outbound_clicks_total", METRICS_PREFIX),
        "kind" => kind.to_string()
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latency_buckets_sorted() {
        let mut prev = 0.0;
        for &bucket in LATENCY_BUCKETS {
            assert!(bucket > prev);
            prev = bucket;
        }
    }

    #[test]
    fn test_helpers_without_recorder() {
        let metrics = RequestMetrics::start("GET", "/api/papers");
        metrics.finish(200);
        record_store_query("papers", "memory", 0.002, false);
        record_listing("konsep", 3, 0);
        record_outbound("ebook");
    }
}

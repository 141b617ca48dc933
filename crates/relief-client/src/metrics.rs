//! Generation request metrics.
//!
//! Nothing is exported unless the host installs a recorder.

use metrics::{counter, histogram};

// =============================================================================
// Metric Names
// =============================================================================

pub mod names {
    /// Total generation requests by outcome.
    pub const REQUESTS_TOTAL: &str = "relief_generation_requests_total";

    /// Generation latency in seconds by outcome.
    pub const LATENCY_SECONDS: &str = "relief_generation_latency_seconds";
}

// =============================================================================
// Recording Functions
// =============================================================================

/// Record a settled generation request.
///
/// `status` is the HTTP status code, or `cancelled` / `network` when no
/// response was received.
pub fn record_request(status: &str, latency_ms: f64) {
    counter!(
        names::REQUESTS_TOTAL,
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        names::LATENCY_SECONDS,
        "status" => status.to_string()
    )
    .record(latency_ms / 1000.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names() {
        assert!(names::REQUESTS_TOTAL.starts_with("relief_"));
        assert!(names::LATENCY_SECONDS.contains("latency"));
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_request("200", 12.5);
        record_request("cancelled", 0.0);
    }
}

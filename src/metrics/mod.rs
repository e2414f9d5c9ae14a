// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

pub use registry::{
    gather_metrics, DISPATCH_EXHAUSTED, GEMINI_API_DURATION, GEMINI_ATTEMPTS, REQUESTS_TOTAL,
    REQUEST_DURATION,
};

/// Helper to record request metrics
pub fn record_request(mode: &str, status_code: u16, duration_secs: f64) {
    let status = status_code.to_string();
    REQUESTS_TOTAL.with_label_values(&[mode, &status]).inc();
    REQUEST_DURATION
        .with_label_values(&[mode, &status])
        .observe(duration_secs);
}

/// Helper to record a single attempt against a model
pub fn record_attempt(model: &str, outcome: &str, duration_secs: f64) {
    GEMINI_ATTEMPTS.with_label_values(&[model, outcome]).inc();
    GEMINI_API_DURATION
        .with_label_values(&[model])
        .observe(duration_secs);
}

pub fn record_exhausted(last_outcome: &str) {
    DISPATCH_EXHAUSTED.with_label_values(&[last_outcome]).inc();
}

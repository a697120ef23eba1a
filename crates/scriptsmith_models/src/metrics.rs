//! Metrics for backend calls.
//!
//! Provides OpenTelemetry-based metrics for tracking model and lookup call
//! performance, errors, and token usage. Instruments are no-ops until the
//! host application installs a meter provider.

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram, Meter},
};
use std::sync::OnceLock;

static METRICS: OnceLock<LlmMetrics> = OnceLock::new();

/// Metrics for backend interactions.
///
/// Model calls are labeled with provider, backend role and model; lookups
/// (search, originality) are labeled with the service name.
#[derive(Clone)]
pub struct LlmMetrics {
    /// Meter handle kept alive for metric instruments
    _meter: Meter,
    /// Total model requests
    pub requests: Counter<u64>,
    /// Failed model requests
    pub errors: Counter<u64>,
    /// Model call duration in seconds
    pub duration: Histogram<f64>,
    /// Total tokens reported by the provider
    pub tokens_used: Counter<u64>,
    /// Search and originality lookups
    pub lookups: Counter<u64>,
    /// Failed lookups
    pub lookup_errors: Counter<u64>,
}

impl LlmMetrics {
    fn init() -> Self {
        let meter = global::meter("scriptsmith_llm");

        Self {
            _meter: meter.clone(),
            requests: meter
                .u64_counter("llm.requests")
                .with_description("Total model requests")
                .build(),
            errors: meter
                .u64_counter("llm.errors")
                .with_description("Failed model requests")
                .build(),
            duration: meter
                .f64_histogram("llm.duration")
                .with_unit("seconds")
                .with_description("Model call duration")
                .build(),
            tokens_used: meter
                .u64_counter("llm.tokens")
                .with_description("Total tokens reported by the provider")
                .build(),
            lookups: meter
                .u64_counter("lookup.requests")
                .with_description("Search and originality lookups")
                .build(),
            lookup_errors: meter
                .u64_counter("lookup.errors")
                .with_description("Failed search and originality lookups")
                .build(),
        }
    }

    /// Get the global metrics instance.
    pub fn get() -> &'static Self {
        METRICS.get_or_init(Self::init)
    }

    /// Record a completed model request.
    pub fn record_request(&self, provider: &str, backend: &str, model: &str, duration_secs: f64) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("backend", backend.to_string()),
            KeyValue::new("model", model.to_string()),
        ];
        self.requests.add(1, labels);
        self.duration.record(duration_secs, labels);
    }

    /// Record a failed model request.
    pub fn record_error(&self, provider: &str, model: &str, error_type: &str) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
            KeyValue::new("error_type", error_type.to_string()),
        ];
        self.errors.add(1, labels);
    }

    /// Record token usage from a model response.
    pub fn record_tokens(&self, model: &str, total_tokens: u64) {
        let labels = &[KeyValue::new("model", model.to_string())];
        self.tokens_used.add(total_tokens, labels);
    }

    /// Record a lookup against an external service.
    pub fn record_lookup(&self, service: &str, succeeded: bool) {
        let labels = &[KeyValue::new("service", service.to_string())];
        self.lookups.add(1, labels);
        if !succeeded {
            self.lookup_errors.add(1, labels);
        }
    }
}

impl Default for LlmMetrics {
    fn default() -> Self {
        Self::get().clone()
    }
}

/// Classify error type for metrics labeling.
///
/// Returns one of: "rate_limit", "auth", "network", "timeout", "invalid_request", "unknown"
pub fn classify_error(error: &dyn std::error::Error) -> &'static str {
    let error_str = error.to_string().to_lowercase();

    if error_str.contains("rate limit") || error_str.contains("429") {
        "rate_limit"
    } else if error_str.contains("auth") || error_str.contains("401") || error_str.contains("403")
    {
        "auth"
    } else if error_str.contains("timed out") || error_str.contains("timeout") {
        "timeout"
    } else if error_str.contains("network")
        || error_str.contains("connection")
        || error_str.contains("dns")
    {
        "network"
    } else if error_str.contains("400") || error_str.contains("invalid") {
        "invalid_request"
    } else {
        "unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scriptsmith_error::{HttpError, ScriptsmithError};

    #[test]
    fn test_classify_status_errors() {
        let err = ScriptsmithError::from(HttpError::with_status(429, "slow down"));
        assert_eq!(classify_error(&err), "rate_limit");

        let err = ScriptsmithError::from(HttpError::with_status(401, "bad key"));
        assert_eq!(classify_error(&err), "auth");

        let err = ScriptsmithError::from(HttpError::new("operation timed out"));
        assert_eq!(classify_error(&err), "timeout");
    }
}

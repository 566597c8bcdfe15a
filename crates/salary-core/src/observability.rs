//! Observability infrastructure for the salary service
//!
//! Provides:
//! - Prometheus metrics (prediction latency, fallbacks, generator outcomes, model info)
//! - Structured JSON logging with tracing

use prometheus::{
    register_gauge_vec, register_histogram, register_int_counter, register_int_counter_vec,
    register_int_gauge, GaugeVec, Histogram, IntCounter, IntCounterVec, IntGauge,
};
use std::sync::OnceLock;
use tracing::{debug, info, warn};

/// Histogram buckets for in-process prediction latency (seconds)
const PREDICTION_BUCKETS: &[f64] = &[
    0.00001, 0.00005, 0.0001, 0.00025, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.05,
];

/// Histogram buckets for generator round trips (seconds)
const GENERATOR_BUCKETS: &[f64] = &[0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 30.0, 60.0];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<ServiceMetricsInner> = OnceLock::new();

struct ServiceMetricsInner {
    prediction_latency_seconds: Histogram,
    predictions_total: IntCounter,
    prediction_errors_total: IntCounterVec,
    category_fallbacks_total: IntCounterVec,
    insight_requests_total: IntCounter,
    generator_latency_seconds: Histogram,
    generator_failures_total: IntCounter,
    history_records: IntGauge,
    model_info: GaugeVec,
}

impl ServiceMetricsInner {
    fn new() -> Self {
        Self {
            prediction_latency_seconds: register_histogram!(
                "salary_service_prediction_latency_seconds",
                "Time spent scoring a prediction request",
                PREDICTION_BUCKETS.to_vec()
            )
            .expect("Failed to register prediction_latency_seconds"),

            predictions_total: register_int_counter!(
                "salary_service_predictions_total",
                "Total number of salary predictions served"
            )
            .expect("Failed to register predictions_total"),

            prediction_errors_total: register_int_counter_vec!(
                "salary_service_prediction_errors_total",
                "Prediction requests rejected, by error code",
                &["code"]
            )
            .expect("Failed to register prediction_errors_total"),

            category_fallbacks_total: register_int_counter_vec!(
                "salary_service_category_fallbacks_total",
                "Labels resolved through the default score, by field",
                &["field"]
            )
            .expect("Failed to register category_fallbacks_total"),

            insight_requests_total: register_int_counter!(
                "salary_service_insight_requests_total",
                "Total number of insight requests"
            )
            .expect("Failed to register insight_requests_total"),

            generator_latency_seconds: register_histogram!(
                "salary_service_generator_latency_seconds",
                "Round-trip time of insight generator calls",
                GENERATOR_BUCKETS.to_vec()
            )
            .expect("Failed to register generator_latency_seconds"),

            generator_failures_total: register_int_counter!(
                "salary_service_generator_failures_total",
                "Insight generator calls that failed or timed out"
            )
            .expect("Failed to register generator_failures_total"),

            history_records: register_int_gauge!(
                "salary_service_history_records",
                "Number of historical records loaded"
            )
            .expect("Failed to register history_records"),

            model_info: register_gauge_vec!(
                "salary_service_model_info",
                "Information about the loaded scoring model",
                &["version", "transform"]
            )
            .expect("Failed to register model_info"),
        }
    }
}

/// Cloneable handle to the process-wide metrics
#[derive(Clone)]
pub struct ServiceMetrics {
    _private: (),
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceMetrics {
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(ServiceMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &ServiceMetricsInner {
        GLOBAL_METRICS.get().expect("Metrics not initialized")
    }

    pub fn observe_prediction_latency(&self, duration_secs: f64) {
        self.inner().prediction_latency_seconds.observe(duration_secs);
    }

    pub fn inc_predictions(&self) {
        self.inner().predictions_total.inc();
    }

    pub fn inc_prediction_errors(&self, code: &str) {
        self.inner()
            .prediction_errors_total
            .with_label_values(&[code])
            .inc();
    }

    /// Count a label that fell back to its default score
    pub fn inc_category_fallback(&self, field: &str) {
        self.inner()
            .category_fallbacks_total
            .with_label_values(&[field])
            .inc();
    }

    pub fn inc_insight_requests(&self) {
        self.inner().insight_requests_total.inc();
    }

    pub fn observe_generator_latency(&self, duration_secs: f64) {
        self.inner().generator_latency_seconds.observe(duration_secs);
    }

    pub fn inc_generator_failures(&self) {
        self.inner().generator_failures_total.inc();
    }

    pub fn set_history_records(&self, count: usize) {
        self.inner().history_records.set(count as i64);
    }

    pub fn set_model_info(&self, version: &str, transform: &str) {
        self.inner().model_info.reset();
        self.inner()
            .model_info
            .with_label_values(&[version, transform])
            .set(1.0);
    }
}

/// Structured logger for service events
///
/// Every event carries the `instance` field so logs from several replicas can
/// be told apart.
#[derive(Clone)]
pub struct StructuredLogger {
    instance: String,
}

impl StructuredLogger {
    pub fn new(instance: impl Into<String>) -> Self {
        Self {
            instance: instance.into(),
        }
    }

    pub fn log_startup(&self, version: &str, port: u16) {
        info!(
            event = "service_started",
            instance = %self.instance,
            service_version = %version,
            port = port,
            "Salary service started"
        );
    }

    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "service_shutdown",
            instance = %self.instance,
            reason = %reason,
            "Salary service shutting down"
        );
    }

    pub fn log_artifact_loaded(&self, path: &str, version: &str, transform: &str, job_count: usize) {
        info!(
            event = "artifact_loaded",
            instance = %self.instance,
            path = %path,
            model_version = %version,
            transform = %transform,
            job_count = job_count,
            "Model artifact loaded"
        );
    }

    pub fn log_artifact_unavailable(&self, path: &str, error: &str) {
        warn!(
            event = "artifact_unavailable",
            instance = %self.instance,
            path = %path,
            error = %error,
            "Model artifact unavailable, predictions will fail"
        );
    }

    pub fn log_history_loaded(&self, path: &str, records: usize) {
        info!(
            event = "history_loaded",
            instance = %self.instance,
            path = %path,
            records = records,
            "Historical dataset loaded"
        );
    }

    pub fn log_history_unavailable(&self, path: &str, error: &str) {
        warn!(
            event = "history_unavailable",
            instance = %self.instance,
            path = %path,
            error = %error,
            "Historical dataset unavailable, stats will be empty"
        );
    }

    #[allow(clippy::too_many_arguments)]
    pub fn log_prediction(
        &self,
        job_title: &str,
        education_level: &str,
        years_experience: f64,
        predicted_salary: f64,
        education_known: bool,
        job_known: bool,
        history_count: usize,
    ) {
        debug!(
            event = "prediction_generated",
            instance = %self.instance,
            job_title = %job_title,
            education_level = %education_level,
            years_experience = years_experience,
            predicted_salary = predicted_salary,
            education_known = education_known,
            job_known = job_known,
            history_count = history_count,
            "Generated salary prediction"
        );
    }

    pub fn log_generator_failure(&self, job_title: &str, error: &str) {
        warn!(
            event = "generator_failed",
            instance = %self.instance,
            job_title = %job_title,
            error = %error,
            "Insight generation failed, returning fallback message"
        );
    }
}

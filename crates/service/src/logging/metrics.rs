use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_histogram_vec_with_registry, register_int_counter_vec,
    register_int_counter_vec_with_registry, Encoder, HistogramVec, IntCounterVec, Registry, TextEncoder,
};

use models::log::LogType;

const DURATION_BUCKETS: &[f64] = &[0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];

// Prometheus metrics (default registry)
pub static OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "back_office_operations_total",
        "Intercepted operations by record kind and level",
        &["kind", "level"]
    )
    .expect("register operations_total")
});

pub static OPERATION_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "back_office_operation_duration_seconds",
        "Duration of intercepted operations in seconds",
        &["kind"],
        DURATION_BUCKETS.to_vec()
    )
    .expect("register operation_duration")
});

/// Counter and duration histogram for intercepted calls.
#[derive(Clone)]
pub struct OperationMetrics {
    total: IntCounterVec,
    duration: HistogramVec,
}

impl OperationMetrics {
    /// Handles on the default registry served at `/metrics`.
    pub fn global() -> Self {
        Self { total: OPERATIONS_TOTAL.clone(), duration: OPERATION_DURATION.clone() }
    }

    pub fn register(registry: &Registry) -> prometheus::Result<Self> {
        let total = register_int_counter_vec_with_registry!(
            "back_office_operations_total",
            "Intercepted operations by record kind and level",
            &["kind", "level"],
            registry
        )?;
        let duration = register_histogram_vec_with_registry!(
            "back_office_operation_duration_seconds",
            "Duration of intercepted operations in seconds",
            &["kind"],
            DURATION_BUCKETS.to_vec(),
            registry
        )?;
        Ok(Self { total, duration })
    }

    /// One observation per intercepted call.
    pub fn observe(&self, kind: &str, level: LogType, millis: i64) {
        self.total.with_label_values(&[kind, level.as_str()]).inc();
        self.duration.with_label_values(&[kind]).observe(millis.max(0) as f64 / 1000.0);
    }

    pub fn count(&self, kind: &str, level: LogType) -> u64 {
        self.total.with_label_values(&[kind, level.as_str()]).get()
    }

    pub fn duration_samples(&self, kind: &str) -> u64 {
        self.duration.with_label_values(&[kind]).get_sample_count()
    }
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (StatusCode::INTERNAL_SERVER_ERROR, format!("metrics encode error: {e}"));
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}

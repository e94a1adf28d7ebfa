use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

use crate::errors::ApiError;

// Prometheus metrics (default registry)
pub static CUSTOMER_OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "customer_service_operations_total",
        "Customer API operations by outcome",
        &["operation", "outcome"]
    )
    .expect("register customer_operations_total")
});

/// Count one handled operation and pass the result through.
pub fn observe<T>(operation: &str, res: Result<T, ApiError>) -> Result<T, ApiError> {
    let outcome = match &res {
        Ok(_) => "ok",
        Err(e) => e.outcome(),
    };
    CUSTOMER_OPERATIONS_TOTAL.with_label_values(&[operation, outcome]).inc();
    res
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (StatusCode::INTERNAL_SERVER_ERROR, format!("metrics encode error: {e}"));
    }
    text_response(buffer)
}

fn text_response(buffer: Vec<u8>) -> (StatusCode, String) {
    match String::from_utf8(buffer) {
        Ok(text) => (StatusCode::OK, text),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("metrics encode error: {e}")),
    }
}

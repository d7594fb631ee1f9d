use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static CHARACTER_OPS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "dragonball_character_ops_total",
        "Character service operations by kind",
        &["op"]
    )
    .expect("register character_ops_total")
});

pub static IMAGE_UPLOADS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "dragonball_image_uploads_total",
        "Image uploads by outcome",
        &["outcome"]
    )
    .expect("register image_uploads_total")
});

pub static IMAGE_DELETES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "dragonball_image_deletes_total",
        "Image deletions by outcome",
        &["outcome"]
    )
    .expect("register image_deletes_total")
});

pub fn record_character_op(op: &str) {
    CHARACTER_OPS_TOTAL.with_label_values(&[op]).inc();
}

pub fn record_image_upload(ok: bool) {
    IMAGE_UPLOADS_TOTAL
        .with_label_values(&[if ok { "ok" } else { "error" }])
        .inc();
}

pub fn record_image_delete(ok: bool) {
    IMAGE_DELETES_TOTAL
        .with_label_values(&[if ok { "ok" } else { "error" }])
        .inc();
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}

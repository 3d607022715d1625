use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, register_int_gauge, Encoder, IntCounterVec, IntGauge, TextEncoder};

// Prometheus metrics (default registry)
pub static ITEM_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "item_store_requests_total",
        "Item operations handled, by operation and outcome",
        &["operation", "outcome"]
    )
    .expect("register item_store_requests_total")
});

pub static ITEMS_STORED: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "item_store_items",
        "Number of items currently in the collection"
    )
    .expect("register item_store_items")
});

/// Count one finished item operation. `outcome` is `ok` or the error message.
pub fn record(operation: &str, outcome: &str) {
    ITEM_REQUESTS_TOTAL.with_label_values(&[operation, outcome]).inc();
}

pub fn set_items_stored(n: usize) {
    ITEMS_STORED.set(n as i64);
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

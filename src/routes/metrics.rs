use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use prometheus::Encoder;

use crate::metrics::REGISTRY;

pub async fn metrics_handler() -> Response {
    let encoder = prometheus::TextEncoder::new();

    let mut metrics = encode(&encoder, &REGISTRY.gather(), "custom");
    metrics.push_str(&encode(&encoder, &prometheus::gather(), "prometheus"));

    (StatusCode::OK, metrics).into_response()
}

fn encode(
    encoder: &prometheus::TextEncoder,
    families: &[prometheus::proto::MetricFamily],
    kind: &str,
) -> String {
    let mut buffer = Vec::new();
    if let Err(error) = encoder.encode(families, &mut buffer) {
        log::error!("Could not encode {kind} metrics. Error: '{error}'.");
    };
    String::from_utf8(buffer).unwrap_or_else(|error| {
        log::error!("The {kind} metrics are not valid UTF-8. Error: '{error}'.");
        String::default()
    })
}

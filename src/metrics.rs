use anyhow::Context;
use axum::http::StatusCode;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Requests handled, labeled by final response status code.
const REQUESTS_TOTAL: &str = "bookstore_requests_total";

/// Books currently in the store, labeled by genre.
const BOOKS: &str = "bookstore_books";

/// Installs the process-wide Prometheus recorder.
///
/// Must run once, before the first metric is emitted. The returned handle
/// renders the exposition text for the metrics endpoint.
pub fn install_recorder() -> anyhow::Result<PrometheusHandle> {
    PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus metrics recorder")
}

pub fn record_response(status: StatusCode) {
    metrics::counter!(REQUESTS_TOTAL, "status" => status.as_u16().to_string()).increment(1);
}

pub fn book_created(genre: Option<&str>) {
    metrics::gauge!(BOOKS, "genre" => genre_label(genre)).increment(1.0);
}

pub fn book_removed(genre: Option<&str>) {
    metrics::gauge!(BOOKS, "genre" => genre_label(genre)).decrement(1.0);
}

fn genre_label(genre: Option<&str>) -> String {
    genre.unwrap_or("none").to_owned()
}

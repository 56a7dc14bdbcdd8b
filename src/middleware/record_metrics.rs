use axum::{extract::Request, middleware::Next, response::Response};

use crate::metrics;

/// Middleware to count every handled request by its final status code.
///
/// Runs outside the not-found and method rewrites so the counted status is
/// the one the client sees.
pub async fn record_metrics(req: Request, next: Next) -> Response {
    let resp = next.run(req).await;

    metrics::record_response(resp.status());

    resp
}

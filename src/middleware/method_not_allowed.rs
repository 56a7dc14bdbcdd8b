use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::IntoResponse,
};

use crate::{
    error::{ApiError, ErrorVerbosityProvider, NotFoundError},
    state::ApiState,
};

/// Middleware to map axum's `MethodNotAllowed` rejection to our [`ApiError`].
///
/// The API reports an unknown method on a known path as not found, so the
/// rejection maps to [`NotFoundError`] rather than a 405.
pub async fn method_not_allowed(
    State(state): State<ApiState>,
    req: Request,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let resp = next.run(req).await;

    match resp.status() {
        StatusCode::METHOD_NOT_ALLOWED => Err(NotFoundError::new(state.error_verbosity()).into()),
        _ => Ok(resp),
    }
}

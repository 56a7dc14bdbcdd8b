use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{ApiError, ErrorVerbosityProvider},
    metrics,
    state::ApiState,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteBooksResponse {
    pub deleted: u64,
}

impl IntoResponse for DeleteBooksResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub async fn delete_books(State(state): State<ApiState>) -> Result<DeleteBooksResponse, ApiError> {
    let verbosity = state.error_verbosity();

    // The genre gauge needs the genres of everything about to go away.
    let books = state
        .store()
        .list()
        .await
        .map_err(|err| ApiError::from_store_error(verbosity, err))?;

    let deleted = state
        .store()
        .clear()
        .await
        .map_err(|err| ApiError::from_store_error(verbosity, err))?;

    for book in &books {
        metrics::book_removed(book.genre.as_deref());
    }

    Ok(DeleteBooksResponse { deleted })
}

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ApiError, ErrorVerbosityProvider},
    extractor::path::ApiPath,
    metrics,
    state::ApiState,
    store::BookStore,
};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteBookPath {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeleteBookResponse {
    pub id: String,
}

impl IntoResponse for DeleteBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub async fn delete_book(
    State(state): State<ApiState>,
    ApiPath(path): ApiPath<DeleteBookPath>,
) -> Result<DeleteBookResponse, ApiError> {
    let verbosity = state.error_verbosity();

    let id = BookStore::parse_id(&path.id)
        .map_err(|err| ApiError::from_store_error(verbosity, err))?;

    let book = state
        .store()
        .remove(id)
        .await
        .map_err(|err| ApiError::from_store_error(verbosity, err))?;

    metrics::book_removed(book.genre.as_deref());

    Ok(DeleteBookResponse { id: path.id })
}

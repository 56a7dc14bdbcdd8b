use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::{
    error::{ApiError, ErrorVerbosityProvider},
    extractor::path::ApiPath,
    state::ApiState,
    store::BookStore,
};

use super::Book;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetBookPath {
    pub id: String,
}

/// Responds with the bare JSON book object.
#[derive(Debug)]
pub struct GetBookResponse {
    pub book: Book,
}

impl IntoResponse for GetBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.book)).into_response()
    }
}

pub async fn get_book(
    State(state): State<ApiState>,
    ApiPath(path): ApiPath<GetBookPath>,
) -> Result<GetBookResponse, ApiError> {
    let verbosity = state.error_verbosity();

    let id = BookStore::parse_id(&path.id)
        .map_err(|err| ApiError::from_store_error(verbosity, err))?;

    let book = state
        .store()
        .get(id)
        .await
        .map_err(|err| ApiError::from_store_error(verbosity, err))?
        .into();

    Ok(GetBookResponse { book })
}

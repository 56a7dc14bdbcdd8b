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
    extractor::json::ApiJson,
    metrics,
    state::ApiState,
};

use super::BookFields;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateBookResponse {
    /// The id the store assigned to the new book.
    pub id: String,
}

impl IntoResponse for CreateBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

pub async fn create_book(
    State(state): State<ApiState>,
    ApiJson(fields): ApiJson<BookFields>,
) -> Result<CreateBookResponse, ApiError> {
    let genre = fields.genre.clone();

    let id = state
        .store()
        .insert(fields.into_document())
        .await
        .map_err(|err| ApiError::from_store_error(state.error_verbosity(), err))?;

    metrics::book_created(genre.as_deref());

    Ok(CreateBookResponse { id: id.to_hex() })
}

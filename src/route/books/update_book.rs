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
    extractor::{json::ApiJson, path::ApiPath},
    state::ApiState,
    store::BookStore,
};

use super::BookFields;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateBookPath {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateBookResponse {
    pub id: String,
}

impl IntoResponse for UpdateBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

/// Replaces all four text fields of the book. Fields absent from the payload
/// become absent in the stored record.
pub async fn update_book(
    State(state): State<ApiState>,
    ApiPath(path): ApiPath<UpdateBookPath>,
    ApiJson(fields): ApiJson<BookFields>,
) -> Result<UpdateBookResponse, ApiError> {
    let verbosity = state.error_verbosity();

    let id = BookStore::parse_id(&path.id)
        .map_err(|err| ApiError::from_store_error(verbosity, err))?;

    state
        .store()
        .replace(id, fields.into_document())
        .await
        .map_err(|err| ApiError::from_store_error(verbosity, err))?;

    Ok(UpdateBookResponse { id: path.id })
}

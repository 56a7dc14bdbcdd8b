use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::{
    error::{ApiError, ErrorVerbosityProvider},
    state::ApiState,
};

use super::Book;

/// Responds with a bare JSON array of books.
#[derive(Debug, Serialize)]
pub struct ListBooksResponse {
    pub books: Vec<Book>,
}

impl IntoResponse for ListBooksResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.books)).into_response()
    }
}

pub async fn list_books(State(state): State<ApiState>) -> Result<ListBooksResponse, ApiError> {
    let books = state
        .store()
        .list()
        .await
        .map_err(|err| ApiError::from_store_error(state.error_verbosity(), err))?
        .into_iter()
        .map(Book::from)
        .collect();

    Ok(ListBooksResponse { books })
}

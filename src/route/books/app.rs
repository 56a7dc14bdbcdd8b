use axum::{
    routing::{get, put},
    Router,
};

use crate::state::ApiState;

pub fn app() -> Router<ApiState> {
    Router::<ApiState>::new()
        .route(
            "/books",
            get(super::list_books::list_books)
                .post(super::create_book::create_book)
                .delete(super::delete_books::delete_books),
        )
        .route(
            "/book/:id",
            put(super::update_book::update_book)
                .get(super::get_book::get_book)
                .delete(super::delete_book::delete_book),
        )
}

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_book, delete_book, favorite_book, get_book, get_books, get_favorite_books,
    search_books, unfavorite_book, update_book,
};

pub fn init_books_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_book).get(get_books))
        .route("/search", get(search_books))
        .route("/favorites", get(get_favorite_books))
        .route(
            "/{book_id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route(
            "/{book_id}/favorite",
            post(favorite_book).delete(unfavorite_book),
        )
}

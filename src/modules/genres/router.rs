use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{create_genre, delete_genre, get_genre_by_id, get_genres, update_genre};

pub fn init_genres_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_genre).get(get_genres))
        .route(
            "/{genre_id}",
            get(get_genre_by_id).put(update_genre).delete(delete_genre),
        )
}

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_author, delete_author, get_author_by_id, get_authors, update_author,
};

pub fn init_authors_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_author).get(get_authors))
        .route(
            "/{author_id}",
            get(get_author_by_id).put(update_author).delete(delete_author),
        )
}

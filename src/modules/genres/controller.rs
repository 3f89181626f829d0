use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use crate::middleware::role::RequireAdmin;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::MessageResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{CreateGenreDto, Genre, UpdateGenreDto};
use super::service::GenreService;

/// Create a genre (admin only)
#[utoipa::path(
    post,
    path = "/api/genres",
    request_body = CreateGenreDto,
    responses(
        (status = 201, description = "Genre created", body = Genre),
        (status = 400, description = "Genre name already exists", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin role required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Genres"
)]
#[instrument(skip(state))]
pub async fn create_genre(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateGenreDto>,
) -> Result<(StatusCode, Json<Genre>), AppError> {
    let genre = GenreService::create_genre(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(genre)))
}

/// List genres
#[utoipa::path(
    get,
    path = "/api/genres",
    responses(
        (status = 200, description = "Genres", body = Vec<Genre>)
    ),
    tag = "Genres"
)]
#[instrument(skip(state))]
pub async fn get_genres(State(state): State<AppState>) -> Result<Json<Vec<Genre>>, AppError> {
    let genres = GenreService::get_genres(&state.db).await?;
    Ok(Json(genres))
}

/// Get a genre by id
#[utoipa::path(
    get,
    path = "/api/genres/{genre_id}",
    params(("genre_id" = i32, Path, description = "Genre id")),
    responses(
        (status = 200, description = "Genre", body = Genre),
        (status = 404, description = "Genre not found", body = ErrorResponse)
    ),
    tag = "Genres"
)]
#[instrument(skip(state))]
pub async fn get_genre_by_id(
    State(state): State<AppState>,
    Path(genre_id): Path<i32>,
) -> Result<Json<Genre>, AppError> {
    let genre = GenreService::get_genre_by_id(&state.db, genre_id).await?;
    Ok(Json(genre))
}

/// Rename a genre (admin only)
#[utoipa::path(
    put,
    path = "/api/genres/{genre_id}",
    params(("genre_id" = i32, Path, description = "Genre id")),
    request_body = UpdateGenreDto,
    responses(
        (status = 200, description = "Updated genre", body = Genre),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin role required", body = ErrorResponse),
        (status = 404, description = "Genre not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Genres"
)]
#[instrument(skip(state))]
pub async fn update_genre(
    State(state): State<AppState>,
    Path(genre_id): Path<i32>,
    _admin: RequireAdmin,
    ValidatedJson(dto): ValidatedJson<UpdateGenreDto>,
) -> Result<Json<Genre>, AppError> {
    let genre = GenreService::update_genre(&state.db, genre_id, dto).await?;
    Ok(Json(genre))
}

/// Delete a genre (admin only)
#[utoipa::path(
    delete,
    path = "/api/genres/{genre_id}",
    params(("genre_id" = i32, Path, description = "Genre id")),
    responses(
        (status = 200, description = "Genre deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin role required", body = ErrorResponse),
        (status = 404, description = "Genre not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Genres"
)]
#[instrument(skip(state))]
pub async fn delete_genre(
    State(state): State<AppState>,
    Path(genre_id): Path<i32>,
    _admin: RequireAdmin,
) -> Result<Json<MessageResponse>, AppError> {
    GenreService::delete_genre(&state.db, genre_id).await?;
    Ok(Json(MessageResponse {
        message: "Genre deleted".to_string(),
    }))
}

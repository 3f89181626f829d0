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

use super::model::{AuthorResponse, CreateAuthorDto, UpdateAuthorDto};
use super::service::AuthorService;

/// Create an author (admin only)
#[utoipa::path(
    post,
    path = "/api/authors",
    request_body = CreateAuthorDto,
    responses(
        (status = 201, description = "Author created", body = AuthorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin role required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authors"
)]
#[instrument(skip(state))]
pub async fn create_author(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateAuthorDto>,
) -> Result<(StatusCode, Json<AuthorResponse>), AppError> {
    let author = AuthorService::create_author(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(author.into())))
}

/// List authors
#[utoipa::path(
    get,
    path = "/api/authors",
    responses(
        (status = 200, description = "Authors", body = Vec<AuthorResponse>)
    ),
    tag = "Authors"
)]
#[instrument(skip(state))]
pub async fn get_authors(
    State(state): State<AppState>,
) -> Result<Json<Vec<AuthorResponse>>, AppError> {
    let authors = AuthorService::get_authors(&state.db).await?;
    Ok(Json(authors.into_iter().map(Into::into).collect()))
}

/// Get an author by id
#[utoipa::path(
    get,
    path = "/api/authors/{author_id}",
    params(("author_id" = i32, Path, description = "Author id")),
    responses(
        (status = 200, description = "Author", body = AuthorResponse),
        (status = 404, description = "Author not found", body = ErrorResponse)
    ),
    tag = "Authors"
)]
#[instrument(skip(state))]
pub async fn get_author_by_id(
    State(state): State<AppState>,
    Path(author_id): Path<i32>,
) -> Result<Json<AuthorResponse>, AppError> {
    let author = AuthorService::get_author_by_id(&state.db, author_id).await?;
    Ok(Json(author.into()))
}

/// Update an author (admin only)
#[utoipa::path(
    put,
    path = "/api/authors/{author_id}",
    params(("author_id" = i32, Path, description = "Author id")),
    request_body = UpdateAuthorDto,
    responses(
        (status = 200, description = "Updated author", body = AuthorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin role required", body = ErrorResponse),
        (status = 404, description = "Author not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authors"
)]
#[instrument(skip(state))]
pub async fn update_author(
    State(state): State<AppState>,
    Path(author_id): Path<i32>,
    _admin: RequireAdmin,
    ValidatedJson(dto): ValidatedJson<UpdateAuthorDto>,
) -> Result<Json<AuthorResponse>, AppError> {
    let author = AuthorService::update_author(&state.db, author_id, dto).await?;
    Ok(Json(author.into()))
}

/// Delete an author (admin only)
#[utoipa::path(
    delete,
    path = "/api/authors/{author_id}",
    params(("author_id" = i32, Path, description = "Author id")),
    responses(
        (status = 200, description = "Author deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin role required", body = ErrorResponse),
        (status = 404, description = "Author not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authors"
)]
#[instrument(skip(state))]
pub async fn delete_author(
    State(state): State<AppState>,
    Path(author_id): Path<i32>,
    _admin: RequireAdmin,
) -> Result<Json<MessageResponse>, AppError> {
    AuthorService::delete_author(&state.db, author_id).await?;
    Ok(Json(MessageResponse {
        message: "Author deleted".to_string(),
    }))
}

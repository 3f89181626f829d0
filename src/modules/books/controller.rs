use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use crate::middleware::auth::CurrentUser;
use crate::middleware::role::RequireAdmin;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::MessageResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::{PaginationMeta, PaginationParams};
use crate::validator::ValidatedJson;

use super::model::{
    BookResponse, BookSearchParams, CreateBookDto, PaginatedBooksResponse, UpdateBookDto,
};
use super::service::BookService;

/// Create a book (admin only)
#[utoipa::path(
    post,
    path = "/api/books",
    request_body = CreateBookDto,
    responses(
        (status = 201, description = "Book created", body = BookResponse),
        (status = 400, description = "Unknown author or genre id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin role required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Books"
)]
#[instrument(skip(state))]
pub async fn create_book(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateBookDto>,
) -> Result<(StatusCode, Json<BookResponse>), AppError> {
    let book = BookService::create_book(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// List books with pagination
#[utoipa::path(
    get,
    path = "/api/books",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated book list", body = PaginatedBooksResponse)
    ),
    tag = "Books"
)]
#[instrument(skip(state))]
pub async fn get_books(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedBooksResponse>, AppError> {
    let (data, total) = BookService::get_all_books(&state.db, &params).await?;
    Ok(Json(PaginatedBooksResponse {
        data,
        meta: PaginationMeta::new(&params, total),
    }))
}

/// Search books by title substring
#[utoipa::path(
    get,
    path = "/api/books/search",
    params(BookSearchParams),
    responses(
        (status = 200, description = "Matching books", body = Vec<BookResponse>)
    ),
    tag = "Books"
)]
#[instrument(skip(state))]
pub async fn search_books(
    State(state): State<AppState>,
    Query(params): Query<BookSearchParams>,
) -> Result<Json<Vec<BookResponse>>, AppError> {
    let books = BookService::search_books(&state.db, &params.title).await?;
    Ok(Json(books))
}

/// List the authenticated user's favorite books
#[utoipa::path(
    get,
    path = "/api/books/favorites",
    responses(
        (status = 200, description = "Favorite books", body = Vec<BookResponse>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Books"
)]
#[instrument(skip(state))]
pub async fn get_favorite_books(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<BookResponse>>, AppError> {
    let books = BookService::get_favorites(&state.db, user.id).await?;
    Ok(Json(books))
}

/// Get a book by id
#[utoipa::path(
    get,
    path = "/api/books/{book_id}",
    params(("book_id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book", body = BookResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    ),
    tag = "Books"
)]
#[instrument(skip(state))]
pub async fn get_book(
    State(state): State<AppState>,
    Path(book_id): Path<i32>,
) -> Result<Json<BookResponse>, AppError> {
    let book = BookService::get_book_by_id(&state.db, book_id).await?;
    Ok(Json(book))
}

/// Update a book (admin only)
#[utoipa::path(
    put,
    path = "/api/books/{book_id}",
    params(("book_id" = i32, Path, description = "Book id")),
    request_body = UpdateBookDto,
    responses(
        (status = 200, description = "Updated book", body = BookResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin role required", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Books"
)]
#[instrument(skip(state))]
pub async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<i32>,
    _admin: RequireAdmin,
    ValidatedJson(dto): ValidatedJson<UpdateBookDto>,
) -> Result<Json<BookResponse>, AppError> {
    let book = BookService::update_book(&state.db, book_id, dto).await?;
    Ok(Json(book))
}

/// Delete a book (admin only)
#[utoipa::path(
    delete,
    path = "/api/books/{book_id}",
    params(("book_id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin role required", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Books"
)]
#[instrument(skip(state))]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(book_id): Path<i32>,
    _admin: RequireAdmin,
) -> Result<Json<MessageResponse>, AppError> {
    BookService::delete_book(&state.db, book_id).await?;
    Ok(Json(MessageResponse {
        message: "Book deleted".to_string(),
    }))
}

/// Mark a book as a favorite of the authenticated user
#[utoipa::path(
    post,
    path = "/api/books/{book_id}/favorite",
    params(("book_id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book favorited", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Books"
)]
#[instrument(skip(state))]
pub async fn favorite_book(
    State(state): State<AppState>,
    Path(book_id): Path<i32>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<MessageResponse>, AppError> {
    BookService::add_favorite(&state.db, user.id, book_id).await?;
    Ok(Json(MessageResponse {
        message: "Book added to favorites".to_string(),
    }))
}

/// Remove a book from the authenticated user's favorites
#[utoipa::path(
    delete,
    path = "/api/books/{book_id}/favorite",
    params(("book_id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Favorite removed", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Book is not a favorite", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Books"
)]
#[instrument(skip(state))]
pub async fn unfavorite_book(
    State(state): State<AppState>,
    Path(book_id): Path<i32>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<MessageResponse>, AppError> {
    BookService::remove_favorite(&state.db, user.id, book_id).await?;
    Ok(Json(MessageResponse {
        message: "Book removed from favorites".to_string(),
    }))
}

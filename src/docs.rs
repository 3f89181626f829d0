use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    LoginForm, MessageResponse, RegisterRequestDto, TokenResponse,
};
use crate::modules::authors::model::{AuthorResponse, CreateAuthorDto, UpdateAuthorDto};
use crate::modules::books::model::{
    Book, BookResponse, BookSearchParams, CreateBookDto, PaginatedBooksResponse, UpdateBookDto,
};
use crate::modules::genres::model::{CreateGenreDto, Genre, UpdateGenreDto};
use crate::modules::users::model::{User, UserRole};
use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::refresh_token,
        crate::modules::auth::controller::logout_user,
        crate::modules::users::controller::get_profile,
        crate::modules::users::controller::get_users,
        crate::modules::books::controller::create_book,
        crate::modules::books::controller::get_books,
        crate::modules::books::controller::search_books,
        crate::modules::books::controller::get_favorite_books,
        crate::modules::books::controller::get_book,
        crate::modules::books::controller::update_book,
        crate::modules::books::controller::delete_book,
        crate::modules::books::controller::favorite_book,
        crate::modules::books::controller::unfavorite_book,
        crate::modules::authors::controller::create_author,
        crate::modules::authors::controller::get_authors,
        crate::modules::authors::controller::get_author_by_id,
        crate::modules::authors::controller::update_author,
        crate::modules::authors::controller::delete_author,
        crate::modules::genres::controller::create_genre,
        crate::modules::genres::controller::get_genres,
        crate::modules::genres::controller::get_genre_by_id,
        crate::modules::genres::controller::update_genre,
        crate::modules::genres::controller::delete_genre,
    ),
    components(
        schemas(
            User,
            UserRole,
            RegisterRequestDto,
            LoginForm,
            TokenResponse,
            MessageResponse,
            ErrorResponse,
            Book,
            BookResponse,
            CreateBookDto,
            UpdateBookDto,
            BookSearchParams,
            PaginatedBooksResponse,
            AuthorResponse,
            CreateAuthorDto,
            UpdateAuthorDto,
            Genre,
            CreateGenreDto,
            UpdateGenreDto,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and session renewal"),
        (name = "Users", description = "User profile and administration"),
        (name = "Books", description = "Book catalog and favorites"),
        (name = "Authors", description = "Author catalog"),
        (name = "Genres", description = "Genre catalog")
    ),
    info(
        title = "Shelfmark API",
        version = "0.1.0",
        description = "Library catalog REST API with JWT-based authentication and role-based access control.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

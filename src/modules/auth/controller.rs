use axum::Json;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::instrument;
use utoipa::ToSchema;

use crate::config::jwt::JwtConfig;
use crate::modules::users::model::User;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{LoginForm, MessageResponse, RegisterRequestDto, TokenResponse};
use super::service::AuthService;

pub const REFRESH_COOKIE: &str = "refresh_token";
const REFRESH_COOKIE_PATH: &str = "/api/auth";

#[derive(serde::Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// The refresh token travels only in this cookie, never in response bodies.
fn refresh_cookie(token: String, jwt_config: &JwtConfig) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, token))
        .path(REFRESH_COOKIE_PATH)
        .http_only(true)
        .secure(jwt_config.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(jwt_config.refresh_token_expiry))
        .build()
}

fn removal_cookie() -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, "")).path(REFRESH_COOKIE_PATH).build()
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequestDto,
    responses(
        (status = 201, description = "User registered successfully", body = User),
        (status = 400, description = "Bad request - email already exists", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequestDto>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = AuthService::register_user(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Login with email and password, receive an access token and refresh cookie
#[utoipa::path(
    post,
    path = "/api/auth/login",
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(dto): Form<LoginForm>,
) -> Result<(CookieJar, Json<TokenResponse>), AppError> {
    let pair = AuthService::login_user(&state.db, dto, &state.jwt_config).await?;

    let jar = jar.add(refresh_cookie(pair.refresh_token, &state.jwt_config));
    Ok((jar, Json(TokenResponse::bearer(pair.access_token))))
}

/// Exchange the refresh cookie for a new access token and rotated cookie
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    responses(
        (status = 200, description = "Token refreshed", body = TokenResponse),
        (status = 401, description = "Missing or invalid refresh token", body = ErrorResponse),
        (status = 404, description = "User no longer exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar))]
pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<TokenResponse>), AppError> {
    let token = jar
        .get(REFRESH_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| AppError::unauthorized("Missing refresh token"))?;

    let pair = AuthService::refresh_session(&state.db, &token, &state.jwt_config).await?;

    let jar = jar.add(refresh_cookie(pair.refresh_token, &state.jwt_config));
    Ok((jar, Json(TokenResponse::bearer(pair.access_token))))
}

/// Clear the refresh cookie
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(jar))]
pub async fn logout_user(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    // Access tokens stay valid until expiry; stateless tokens cannot be
    // revoked early. Logout only drops the renewal path.
    let jar = jar.remove(removal_cookie());
    (
        jar,
        Json(MessageResponse {
            message: "Logged out".to_string(),
        }),
    )
}

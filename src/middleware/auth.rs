use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};

use crate::modules::auth::model::TokenKind;
use crate::modules::users::model::User;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_token;

/// Extractor that validates the bearer access token and resolves the acting
/// user with a fresh directory lookup.
///
/// The lookup means role enforcement always sees live data; the token's own
/// role claim is only an issuance-time snapshot. Every failure mode here
/// (missing header, bad signature, expiry, unparsable id, vanished user) is
/// the same 401.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        let claims = verify_token(TokenKind::Access, token, &state.jwt_config)?;

        let user_id: i32 = claims
            .sub
            .parse()
            .map_err(|_| AppError::unauthorized("Invalid user id in token"))?;

        let user = UserService::find_by_id(&state.db, user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("Could not validate credentials"))?;

        Ok(CurrentUser(user))
    }
}

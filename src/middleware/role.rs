use axum::{extract::FromRequestParts, http::request::Parts};

use crate::middleware::auth::CurrentUser;
use crate::modules::users::model::{User, UserRole};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Extractor for admin-gated handlers. Authenticates first, then checks the
/// resolved user's current role, so a role change takes effect on the next
/// request rather than at the next token issuance.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub User);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        check_role(&user, UserRole::Admin)?;
        Ok(RequireAdmin(user))
    }
}

pub fn check_role(user: &User, required_role: UserRole) -> Result<(), AppError> {
    if user.role != required_role {
        return Err(AppError::forbidden("Not enough privileges"));
    }
    Ok(())
}

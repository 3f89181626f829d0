//! Operator commands that run against the database directly, outside the
//! HTTP surface. Role changes are deliberately not exposed as an API
//! endpoint; they go through `shelfmark set-role` only.

use sqlx::PgPool;

use crate::modules::users::model::{User, UserRole};
use crate::modules::users::service::UserService;
use crate::utils::errors::AppError;

pub fn parse_role(input: &str) -> Option<UserRole> {
    match input.to_ascii_lowercase().as_str() {
        "user" => Some(UserRole::User),
        "admin" => Some(UserRole::Admin),
        _ => None,
    }
}

pub async fn set_user_role(db: &PgPool, email: &str, role: UserRole) -> Result<User, AppError> {
    UserService::set_role(db, email, role).await
}

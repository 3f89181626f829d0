use anyhow::Context;
use sqlx::{FromRow, PgPool};

use crate::modules::users::model::{User, UserRole};
use crate::utils::errors::AppError;

/// User row including the password hash. Only the user directory and the
/// login path ever see this shape.
#[derive(FromRow)]
pub struct UserWithPassword {
    pub id: i32,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

pub struct UserService;

impl UserService {
    pub async fn create_user(
        db: &PgPool,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        let existing = sqlx::query_as::<_, User>("SELECT id, email, role FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(db)
            .await
            .context("Failed to check for existing user")
            .map_err(AppError::database)?;

        if existing.is_some() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "User with this email already exists"
            )));
        }

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password) VALUES ($1, $2) RETURNING id, email, role",
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await
        .context("Failed to insert user")
        .map_err(AppError::database)?;

        Ok(user)
    }

    pub async fn find_by_email_with_password(
        db: &PgPool,
        email: &str,
    ) -> Result<Option<UserWithPassword>, AppError> {
        sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, email, password, role FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(db)
        .await
        .context("Failed to fetch user by email")
        .map_err(AppError::database)
    }

    pub async fn find_by_id(db: &PgPool, id: i32) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT id, email, role FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch user by id")
            .map_err(AppError::database)
    }

    pub async fn get_users(db: &PgPool) -> Result<Vec<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT id, email, role FROM users ORDER BY id")
            .fetch_all(db)
            .await
            .context("Failed to fetch users")
            .map_err(AppError::database)
    }

    /// Privileged role mutation. Only reachable from the set-role CLI.
    pub async fn set_role(db: &PgPool, email: &str, role: UserRole) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET role = $1 WHERE email = $2 RETURNING id, email, role",
        )
        .bind(role)
        .bind(email)
        .fetch_optional(db)
        .await
        .context("Failed to update user role")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User with email {} not found", email)))
    }
}

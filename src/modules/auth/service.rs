use sqlx::PgPool;
use tracing::instrument;

use crate::config::jwt::JwtConfig;
use crate::modules::users::model::User;
use crate::modules::users::service::UserService;
use crate::utils::errors::AppError;
use crate::utils::jwt::{create_token, verify_token};
use crate::utils::password::{hash_password, verify_password};

use super::model::{LoginForm, RegisterRequestDto, TokenKind};

/// A freshly issued access/refresh pair.
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto), fields(email = %dto.email))]
    pub async fn register_user(db: &PgPool, dto: RegisterRequestDto) -> Result<User, AppError> {
        let hashed_password = hash_password(&dto.password)?;
        UserService::create_user(db, &dto.email, &hashed_password).await
    }

    /// Verifies credentials and issues a token pair.
    ///
    /// Unknown email and wrong password produce the same rejection so the
    /// response cannot be used to enumerate accounts. No session state is
    /// written; the tokens are self-contained.
    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginForm,
        jwt_config: &JwtConfig,
    ) -> Result<TokenPair, AppError> {
        let user = UserService::find_by_email_with_password(db, &dto.username)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        if !verify_password(&dto.password, &user.password) {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        Ok(TokenPair {
            access_token: create_token(TokenKind::Access, user.id, user.role, jwt_config)?,
            refresh_token: create_token(TokenKind::Refresh, user.id, user.role, jwt_config)?,
        })
    }

    /// Exchanges a refresh token for a fresh token pair.
    ///
    /// The refresh token is rotated on every use. Previously issued refresh
    /// tokens stay valid until their own expiry; there is no server-side
    /// revocation in this design.
    #[instrument(skip(db, refresh_token, jwt_config))]
    pub async fn refresh_session(
        db: &PgPool,
        refresh_token: &str,
        jwt_config: &JwtConfig,
    ) -> Result<TokenPair, AppError> {
        let claims = verify_token(TokenKind::Refresh, refresh_token, jwt_config)
            .map_err(|_| AppError::unauthorized("Invalid refresh token"))?;

        let user_id: i32 = claims
            .sub
            .parse()
            .map_err(|_| AppError::unauthorized("Invalid refresh token"))?;

        let user = UserService::find_by_id(db, user_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        Ok(TokenPair {
            access_token: create_token(TokenKind::Access, user.id, user.role, jwt_config)?,
            refresh_token: create_token(TokenKind::Refresh, user.id, user.role, jwt_config)?,
        })
    }
}

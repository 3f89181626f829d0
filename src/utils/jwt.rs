use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::{Claims, TokenKind};
use crate::modules::users::model::UserRole;
use crate::utils::errors::AppError;

fn secret<'a>(kind: TokenKind, jwt_config: &'a JwtConfig) -> &'a str {
    match kind {
        TokenKind::Access => &jwt_config.access_secret,
        TokenKind::Refresh => &jwt_config.refresh_secret,
    }
}

fn expiry_seconds(kind: TokenKind, jwt_config: &JwtConfig) -> i64 {
    match kind {
        TokenKind::Access => jwt_config.access_token_expiry,
        TokenKind::Refresh => jwt_config.refresh_token_expiry,
    }
}

/// Creates a signed token of the given kind for a user.
///
/// Access and refresh tokens are signed with distinct secrets and expiry
/// horizons, so one kind never verifies as the other. The embedded role is a
/// snapshot taken at issuance.
pub fn create_token(
    kind: TokenKind,
    user_id: i32,
    role: UserRole,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + expiry_seconds(kind, jwt_config) as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        role,
        exp,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::new(jwt_config.algorithm),
        &claims,
        &EncodingKey::from_secret(secret(kind, jwt_config).as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

/// Verifies signature and expiry against the secret for `kind`.
///
/// Bad signature, malformed structure and expiry all collapse into the same
/// rejection; callers treat them identically and require re-authentication.
pub fn verify_token(
    kind: TokenKind,
    token: &str,
    jwt_config: &JwtConfig,
) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret(kind, jwt_config).as_bytes()),
        &Validation::new(jwt_config.algorithm),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token"))
}

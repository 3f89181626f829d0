use std::env;

use jsonwebtoken::Algorithm;

/// Token signing configuration, loaded once at startup and immutable after.
///
/// Access and refresh tokens use independent secrets so that compromise of
/// one cannot forge the other.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    /// Access token lifetime in seconds.
    pub access_token_expiry: i64,
    /// Refresh token lifetime in seconds.
    pub refresh_token_expiry: i64,
    pub algorithm: Algorithm,
    /// `Secure` flag on the refresh cookie. Defaults to true; only disable
    /// for plain-HTTP local development.
    pub cookie_secure: bool,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            access_secret: env::var("ACCESS_TOKEN_SECRET")
                .unwrap_or_else(|_| "access-secret-change-in-production".to_string()),
            refresh_secret: env::var("REFRESH_TOKEN_SECRET")
                .unwrap_or_else(|_| "refresh-secret-change-in-production".to_string()),
            access_token_expiry: env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
                .ok()
                .and_then(|s| s.parse::<i64>().ok())
                .unwrap_or(15)
                * 60,
            refresh_token_expiry: env::var("REFRESH_TOKEN_EXPIRE_DAYS")
                .ok()
                .and_then(|s| s.parse::<i64>().ok())
                .unwrap_or(7)
                * 86400,
            algorithm: env::var("JWT_ALGORITHM")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Algorithm::HS256),
            cookie_secure: env::var("REFRESH_COOKIE_SECURE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(true),
        }
    }
}

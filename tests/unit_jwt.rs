use jsonwebtoken::{EncodingKey, Header, encode};

use shelfmark::config::jwt::JwtConfig;
use shelfmark::modules::auth::model::{Claims, TokenKind};
use shelfmark::modules::users::model::UserRole;
use shelfmark::utils::jwt::{create_token, verify_token};

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        access_secret: "test-access-secret-for-testing-purposes".to_string(),
        refresh_secret: "test-refresh-secret-for-testing-purposes".to_string(),
        access_token_expiry: 900,
        refresh_token_expiry: 604800,
        algorithm: jsonwebtoken::Algorithm::HS256,
        cookie_secure: true,
    }
}

#[test]
fn test_create_access_token_success() {
    let jwt_config = get_test_jwt_config();

    let result = create_token(TokenKind::Access, 42, UserRole::User, &jwt_config);

    assert!(result.is_ok());
    assert!(!result.unwrap().is_empty());
}

#[test]
fn test_verify_access_token_roundtrip() {
    let jwt_config = get_test_jwt_config();

    let token = create_token(TokenKind::Access, 42, UserRole::User, &jwt_config).unwrap();
    let claims = verify_token(TokenKind::Access, &token, &jwt_config).unwrap();

    assert_eq!(claims.sub, "42");
    assert_eq!(claims.role, UserRole::User);
}

#[test]
fn test_verify_refresh_token_roundtrip() {
    let jwt_config = get_test_jwt_config();

    let token = create_token(TokenKind::Refresh, 7, UserRole::Admin, &jwt_config).unwrap();
    let claims = verify_token(TokenKind::Refresh, &token, &jwt_config).unwrap();

    assert_eq!(claims.sub, "7");
    assert_eq!(claims.role, UserRole::Admin);
}

#[test]
fn test_access_token_rejected_as_refresh() {
    let jwt_config = get_test_jwt_config();

    let access = create_token(TokenKind::Access, 42, UserRole::User, &jwt_config).unwrap();

    assert!(verify_token(TokenKind::Refresh, &access, &jwt_config).is_err());
}

#[test]
fn test_refresh_token_rejected_as_access() {
    let jwt_config = get_test_jwt_config();

    let refresh = create_token(TokenKind::Refresh, 42, UserRole::User, &jwt_config).unwrap();

    assert!(verify_token(TokenKind::Access, &refresh, &jwt_config).is_err());
}

#[test]
fn test_verify_token_wrong_secret() {
    let jwt_config = get_test_jwt_config();
    let token = create_token(TokenKind::Access, 42, UserRole::User, &jwt_config).unwrap();

    let wrong_config = JwtConfig {
        access_secret: "a-completely-different-secret-key-here".to_string(),
        ..get_test_jwt_config()
    };

    assert!(verify_token(TokenKind::Access, &token, &wrong_config).is_err());
}

#[test]
fn test_verify_token_malformed() {
    let jwt_config = get_test_jwt_config();

    let malformed_tokens = vec![
        "",
        "not.enough",
        "too.many.parts.here.extra",
        "!!!.invalid.chars",
        "header.payload.",
    ];

    for token in malformed_tokens {
        assert!(verify_token(TokenKind::Access, token, &jwt_config).is_err());
    }
}

#[test]
fn test_expired_token_rejected() {
    let jwt_config = get_test_jwt_config();

    // Issued two hours ago, expired one hour ago. Well past any leeway.
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: "42".to_string(),
        role: UserRole::User,
        exp: now - 3600,
        iat: now - 7200,
        jti: "expired-token-test".to_string(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.access_secret.as_bytes()),
    )
    .unwrap();

    assert!(verify_token(TokenKind::Access, &token, &jwt_config).is_err());
}

#[test]
fn test_token_expiry_matches_config() {
    let jwt_config = get_test_jwt_config();

    let access = create_token(TokenKind::Access, 42, UserRole::User, &jwt_config).unwrap();
    let refresh = create_token(TokenKind::Refresh, 42, UserRole::User, &jwt_config).unwrap();

    let access_claims = verify_token(TokenKind::Access, &access, &jwt_config).unwrap();
    let refresh_claims = verify_token(TokenKind::Refresh, &refresh, &jwt_config).unwrap();

    assert_eq!(
        access_claims.exp - access_claims.iat,
        jwt_config.access_token_expiry as usize
    );
    assert_eq!(
        refresh_claims.exp - refresh_claims.iat,
        jwt_config.refresh_token_expiry as usize
    );
    assert!(refresh_claims.exp > access_claims.exp);
}

#[test]
fn test_tokens_are_unique_per_issuance() {
    let jwt_config = get_test_jwt_config();

    let token1 = create_token(TokenKind::Access, 42, UserRole::User, &jwt_config).unwrap();
    let token2 = create_token(TokenKind::Access, 42, UserRole::User, &jwt_config).unwrap();

    // jti differs even when both are minted within the same second
    assert_ne!(token1, token2);
}

#[test]
fn test_role_snapshot_carried_in_claims() {
    let jwt_config = get_test_jwt_config();

    let token = create_token(TokenKind::Access, 1, UserRole::Admin, &jwt_config).unwrap();
    let claims = verify_token(TokenKind::Access, &token, &jwt_config).unwrap();

    assert_eq!(claims.role, UserRole::Admin);
}

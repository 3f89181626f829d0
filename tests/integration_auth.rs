mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use sqlx::PgPool;
use tower::ServiceExt;

use common::{
    body_json, create_test_user, generate_unique_email, login, refresh_cookie_value,
    setup_test_app, test_jwt_config,
};
use shelfmark::modules::auth::model::TokenKind;
use shelfmark::modules::users::model::UserRole;
use shelfmark::utils::jwt::{create_token, verify_token};

fn register_request(email: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/auth/register")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::json!({
                "email": email,
                "password": password
            })
            .to_string(),
        ))
        .unwrap()
}

fn login_request(email: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(format!(
            "username={}&password={}",
            email, password
        )))
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_success(pool: PgPool) {
    let app = setup_test_app(pool);
    let email = generate_unique_email();

    let response = app
        .oneshot(register_request(&email, "password123"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["email"], email);
    assert_eq!(body["role"], "user");
    assert!(body["id"].is_i64());
    assert!(body.get("password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_duplicate_email(pool: PgPool) {
    let app = setup_test_app(pool);
    let email = generate_unique_email();

    let response = app
        .clone()
        .oneshot(register_request(&email, "password123"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(register_request(&email, "differentpass"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_rejects_short_password(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .oneshot(register_request(&generate_unique_email(), "short"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_success_sets_refresh_cookie(pool: PgPool) {
    let email = generate_unique_email();
    let user = create_test_user(&pool, &email, "password123", UserRole::User).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(login_request(&email, "password123"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("refresh_token="))
        .expect("login must set the refresh cookie")
        .to_string();

    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(set_cookie.contains("Secure"));
    assert!(set_cookie.contains("Max-Age=604800"));
    assert!(set_cookie.contains("Path=/api/auth"));

    // Cookie claims match the authenticated user
    let refresh_value = set_cookie
        .split(';')
        .next()
        .unwrap()
        .trim_start_matches("refresh_token=")
        .to_string();
    let claims = verify_token(TokenKind::Refresh, &refresh_value, &test_jwt_config()).unwrap();
    assert_eq!(claims.sub, user.id.to_string());
    assert_eq!(claims.role, UserRole::User);

    let body = body_json(response).await;
    assert_eq!(body["token_type"], "bearer");
    let access = body["access_token"].as_str().unwrap();
    let claims = verify_token(TokenKind::Access, access, &test_jwt_config()).unwrap();
    assert_eq!(claims.sub, user.id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    let email = generate_unique_email();
    create_test_user(&pool, &email, "password123", UserRole::User).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(login_request(&email, "wrongpassword"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_unknown_email_indistinguishable_from_wrong_password(pool: PgPool) {
    let email = generate_unique_email();
    create_test_user(&pool, &email, "password123", UserRole::User).await;
    let app = setup_test_app(pool);

    let wrong_password = app
        .clone()
        .oneshot(login_request(&email, "wrongpassword"))
        .await
        .unwrap();
    let unknown_email = app
        .oneshot(login_request(&generate_unique_email(), "password123"))
        .await
        .unwrap();

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    // Same body for both failure modes, no account enumeration
    let body1 = body_json(wrong_password).await;
    let body2 = body_json(unknown_email).await;
    assert_eq!(body1, body2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_refresh_without_cookie(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/refresh")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_refresh_rotates_token_pair(pool: PgPool) {
    let email = generate_unique_email();
    let user = create_test_user(&pool, &email, "password123", UserRole::User).await;
    let app = setup_test_app(pool);

    let (_, old_cookie) = login(&app, &email, "password123").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/refresh")
                .header(header::COOKIE, &old_cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let new_cookie = refresh_cookie_value(response.headers())
        .expect("refresh must rotate the cookie");
    assert_ne!(new_cookie, old_cookie);

    // The fresh access token resolves to the same user through the gate
    let body = body_json(response).await;
    let access = body["access_token"].as_str().unwrap();

    let me = app
        .oneshot(
            Request::builder()
                .uri("/api/users/me")
                .header(header::AUTHORIZATION, format!("Bearer {}", access))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(me.status(), StatusCode::OK);
    let me = body_json(me).await;
    assert_eq!(me["id"], user.id);
    assert_eq!(me["email"], email);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_refresh_rejects_access_token_in_cookie(pool: PgPool) {
    let email = generate_unique_email();
    let user = create_test_user(&pool, &email, "password123", UserRole::User).await;
    let app = setup_test_app(pool);

    // An access token must not pass as a refresh token
    let access = create_token(TokenKind::Access, user.id, user.role, &test_jwt_config()).unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/refresh")
                .header(header::COOKIE, format!("refresh_token={}", access))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_refresh_after_user_deleted(pool: PgPool) {
    let email = generate_unique_email();
    let user = create_test_user(&pool, &email, "password123", UserRole::User).await;
    let app = setup_test_app(pool.clone());

    let (_, cookie) = login(&app, &email, "password123").await;

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/refresh")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_logout_clears_cookie(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/logout")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("refresh_token="))
        .expect("logout must clear the refresh cookie")
        .to_string();

    // Removal cookie: emptied value, immediate expiry
    assert!(set_cookie.starts_with("refresh_token=;"));
    assert!(set_cookie.contains("Max-Age=0"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_me_requires_valid_token(pool: PgPool) {
    let app = setup_test_app(pool);

    let missing = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/users/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let garbage = app
        .oneshot(
            Request::builder()
                .uri("/api/users/me")
                .header(header::AUTHORIZATION, "Bearer not.a.token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_token_for_deleted_user_rejected_by_gate(pool: PgPool) {
    let email = generate_unique_email();
    let user = create_test_user(&pool, &email, "password123", UserRole::User).await;
    let app = setup_test_app(pool.clone());

    let access = create_token(TokenKind::Access, user.id, user.role, &test_jwt_config()).unwrap();

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/users/me")
                .header(header::AUTHORIZATION, format!("Bearer {}", access))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use jsonwebtoken::Algorithm;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use shelfmark::config::cors::CorsConfig;
use shelfmark::config::jwt::JwtConfig;
use shelfmark::modules::users::model::{User, UserRole};
use shelfmark::router::init_router;
use shelfmark::state::AppState;
use shelfmark::utils::password::hash_password;

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        access_secret: "test-access-secret-at-least-32-chars".to_string(),
        refresh_secret: "test-refresh-secret-at-least-32-chars".to_string(),
        access_token_expiry: 900,
        refresh_token_expiry: 604800,
        algorithm: Algorithm::HS256,
        cookie_secure: true,
    }
}

pub fn setup_test_app(pool: PgPool) -> Router {
    let state = AppState {
        db: pool,
        jwt_config: test_jwt_config(),
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
    };
    init_router(state)
}

#[allow(dead_code)]
pub struct TestUser {
    pub id: i32,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

pub async fn create_test_user(
    pool: &PgPool,
    email: &str,
    password: &str,
    role: UserRole,
) -> TestUser {
    let hashed = hash_password(password).unwrap();

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (email, password, role) VALUES ($1, $2, $3) RETURNING id, email, role",
    )
    .bind(email)
    .bind(&hashed)
    .bind(role)
    .fetch_one(pool)
    .await
    .unwrap();

    TestUser {
        id: user.id,
        email: user.email,
        password: password.to_string(),
        role: user.role,
    }
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

/// Logs in through the router, returning the access token and the raw
/// `refresh_token` cookie (name=value).
#[allow(dead_code)]
pub async fn login(app: &Router, email: &str, password: &str) -> (String, String) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(format!(
            "username={}&password={}",
            email, password
        )))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = refresh_cookie_value(response.headers())
        .expect("login must set a refresh_token cookie");

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let access_token = body["access_token"].as_str().unwrap().to_string();

    (access_token, cookie)
}

/// Extracts `refresh_token=<value>` from the Set-Cookie headers, if present.
pub fn refresh_cookie_value(headers: &header::HeaderMap) -> Option<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("refresh_token="))
        .and_then(|v| v.split(';').next())
        .map(|v| v.to_string())
}

#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

//! Shared helpers for HTTP-level integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use moalem_api::app::build_app;
use moalem_api::auth::jwt::{generate_token, JwtConfig, TokenKind};
use moalem_api::auth::password::hash_password;
use moalem_api::config::ServerConfig;
use moalem_api::state::AppState;
use moalem_core::types::DbId;
use moalem_db::models::user::{CreateUser, User};
use moalem_db::repositories::UserRepo;
use sqlx::PgPool;
use tower::ServiceExt;

/// Password assigned to every seeded teacher.
pub const TEST_PASSWORD: &str = "test_password_123";

/// Build a test `ServerConfig` with fixed secrets and dev defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-access-secret-for-integration".to_string(),
            refresh_secret: "test-refresh-secret-for-integration".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router (same middleware stack as production).
pub fn build_test_app(pool: PgPool) -> Router {
    build_app(AppState {
        pool,
        config: Arc::new(test_config()),
    })
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub async fn school_id(pool: &PgPool) -> DbId {
    sqlx::query_scalar("SELECT id FROM schools ORDER BY name LIMIT 1")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn subject_id(pool: &PgPool, code: &str) -> DbId {
    sqlx::query_scalar("SELECT id FROM subjects WHERE code = $1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Insert a teacher with [`TEST_PASSWORD`] and return it with an access token.
pub async fn seed_teacher(pool: &PgPool, civil_id: &str) -> (User, String) {
    let input = CreateUser {
        civil_id: civil_id.to_string(),
        full_name: format!("Teacher {civil_id}"),
        email: format!("{civil_id}@school.test"),
        phone: "+96550000000".to_string(),
        password_hash: hash_password(TEST_PASSWORD).unwrap(),
        school_id: school_id(pool).await,
        primary_subject_id: subject_id(pool, "MATH-7").await,
        secondary_subject_id: None,
        school_type: "intermediate".to_string(),
    };
    let user = UserRepo::create(pool, &input).await.unwrap();
    let (token, _) = generate_token(user.id, TokenKind::Access, &test_config().jwt).unwrap();
    (user, token)
}

/// JSON body for a valid class with the given section and capacity.
pub async fn class_body(pool: &PgPool, section: &str, max_students: i32) -> serde_json::Value {
    serde_json::json!({
        "name": format!("Grade 7 {section}"),
        "subject_id": subject_id(pool, "MATH-7").await,
        "school_year": "2023-2024",
        "semester": "first",
        "class_section": section,
        "max_students": max_students,
    })
}

/// JSON body for a valid student with the given number.
pub fn student_body(number: &str, gender: &str) -> serde_json::Value {
    serde_json::json!({
        "student_number": number,
        "first_name": "Student",
        "last_name": number,
        "arabic_name": "طالب",
        "date_of_birth": "2011-05-01",
        "gender": gender,
        "nationality": "Kuwaiti",
    })
}

/// Create a class through the API and return its id.
pub async fn create_class(
    app: &Router,
    pool: &PgPool,
    token: &str,
    section: &str,
    max_students: i32,
) -> String {
    let body = class_body(pool, section, max_students).await;
    let response = post_json_auth(app.clone(), "/api/classes", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_str().unwrap().to_string()
}

/// Enroll a student through the API and return its id.
pub async fn create_student(app: &Router, token: &str, class_id: &str, number: &str) -> String {
    let response = post_json_auth(
        app.clone(),
        &format!("/api/classes/{class_id}/students"),
        student_body(number, "male"),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, Some(token)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), Some(token)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body), Some(token)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None, Some(token)).await
}

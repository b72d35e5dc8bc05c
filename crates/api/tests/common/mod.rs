//! Common test utilities for integration tests.
//!
//! Every test gets its own in-memory SQLite database, so tests run in
//! parallel without cleanup.

// Helpers are shared by several test binaries; not all of them use every one.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request},
    Router,
};
use fake::faker::internet::en::Username;
use fake::Fake;
use serde_json::Value;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tower::ServiceExt;
use workout_tracker_api::{app::create_app, config::Config};

pub const TEST_JWT_SECRET: &str = "integration-test-secret-at-least-32-bytes";
pub const TEST_PASSWORD: &str = "Deadlift-Day-42";

/// Create a fresh in-memory database with the full schema.
///
/// A single connection that never expires keeps the database alive for the
/// lifetime of the pool.
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    persistence::db::initialize(&pool)
        .await
        .expect("Failed to initialize schema");

    pool
}

/// Test configuration with a valid JWT secret.
pub fn test_config() -> Config {
    Config {
        server: workout_tracker_api::config::ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            request_timeout_secs: 30,
        },
        database: workout_tracker_api::config::DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout_secs: 10,
            idle_timeout_secs: 600,
        },
        logging: workout_tracker_api::config::LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
        security: workout_tracker_api::config::SecurityConfig {
            cors_origins: vec![],
            login_attempts_per_minute: 100,
        },
        jwt: workout_tracker_api::config::JwtAuthConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_secs: 3600,
            refresh_token_expiry_secs: 86400 * 30,
            leeway_secs: 30,
        },
    }
}

/// Create a test application router.
pub fn create_test_app(config: Config, pool: SqlitePool) -> Router {
    create_app(config, pool)
}

/// Pool plus router with the default test configuration.
pub async fn setup() -> (SqlitePool, Router) {
    let pool = create_test_pool().await;
    let app = create_test_app(test_config(), pool.clone());
    (pool, app)
}

/// A random username that passes validation.
pub fn unique_username() -> String {
    let base: String = Username().fake();
    let cleaned: String = base
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .take(30)
        .collect();
    format!("{}_{}", cleaned, uuid::Uuid::new_v4().simple())
        .chars()
        .take(50)
        .collect()
}

/// Authenticated user context for tests.
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub username: String,
    pub access_token: String,
    pub refresh_token: String,
}

/// Register a user through the API and return their credentials.
pub async fn create_authenticated_user(app: &Router) -> AuthenticatedUser {
    let username = unique_username();
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/auth/register",
            serde_json::json!({ "username": username, "password": TEST_PASSWORD }),
        ))
        .await
        .unwrap();

    let status = response.status();
    let json = parse_response_body(response).await;
    if !status.is_success() {
        panic!("Registration failed with status: {}, body: {}", status, json);
    }

    AuthenticatedUser {
        user_id: json["user"]["id"]
            .as_i64()
            .unwrap_or_else(|| panic!("Missing user.id in response: {}", json)),
        username,
        access_token: json["tokens"]["accessToken"]
            .as_str()
            .unwrap_or_else(|| panic!("Missing tokens.accessToken in response: {}", json))
            .to_string(),
        refresh_token: json["tokens"]["refreshToken"]
            .as_str()
            .unwrap_or_else(|| panic!("Missing tokens.refreshToken in response: {}", json))
            .to_string(),
    }
}

/// Build an unauthenticated JSON request.
pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Build a JSON request with authentication.
pub fn json_request_with_auth(method: Method, uri: &str, body: Value, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Build a GET request with authentication.
pub fn get_request_with_auth(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

/// Build a DELETE request with authentication.
pub fn delete_request_with_auth(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

/// Build an unauthenticated GET request.
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Parse a JSON response body, `Null` when empty or not JSON.
pub async fn parse_response_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(Value::Null)
}

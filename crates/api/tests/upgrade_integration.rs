//! Integration tests for opening a database written by the single-user
//! version of the tracker.

mod common;

use axum::http::StatusCode;
use common::{
    create_authenticated_user, create_test_app, get_request_with_auth, parse_response_body,
    test_config,
};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tower::ServiceExt;

/// In-memory database holding the old tables: no `user_id` anywhere and no
/// `resistance.set_number`.
async fn create_legacy_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    sqlx::query(
        r#"
        CREATE TABLE resistance(
            id INTEGER PRIMARY KEY, date TEXT, week INTEGER, day TEXT, exercise TEXT,
            target TEXT, actual_weight REAL, actual_reps INTEGER, rir INTEGER
        );
        CREATE TABLE mobility(
            id INTEGER PRIMARY KEY, date TEXT, prep_done INTEGER, joint_flow_done INTEGER,
            animal_circuit_done INTEGER, cuff_finisher_done INTEGER
        );
        CREATE TABLE cardio(
            id INTEGER PRIMARY KEY, date TEXT, type TEXT, duration_min INTEGER, avg_hr INTEGER
        );
        INSERT INTO resistance(date, week, day, exercise, target, actual_weight, actual_reps, rir)
            VALUES ('2024-04-01', 1, 'Monday', 'Back-squat', '4×8', 90.0, 8, 2);
        INSERT INTO mobility(date, prep_done, joint_flow_done, animal_circuit_done, cuff_finisher_done)
            VALUES ('2024-04-01', 1, 1, 0, 1);
        INSERT INTO cardio(date, type, duration_min, avg_hr)
            VALUES ('2024-04-02', 'Zone-2 Run', 45, 138);
        "#,
    )
    .execute(&pool)
    .await
    .expect("Failed to create legacy tables");

    persistence::db::initialize(&pool)
        .await
        .expect("Failed to upgrade legacy schema");

    pool
}

#[tokio::test]
async fn test_first_user_inherits_legacy_logs() {
    let pool = create_legacy_pool().await;
    let app = create_test_app(test_config(), pool);
    let user = create_authenticated_user(&app).await;

    let response = app
        .clone()
        .oneshot(get_request_with_auth("/api/v1/resistance", &user.access_token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["total"], 1);
    let set = &body["sets"][0];
    assert_eq!(set["exercise"], "Back-squat");
    assert_eq!(set["setNumber"], 1);
    assert_eq!(set["weightKg"], 90.0);
    assert_eq!(set["reps"], 8);

    let response = app
        .clone()
        .oneshot(get_request_with_auth("/api/v1/mobility", &user.access_token))
        .await
        .unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["sessions"][0]["cuffFinisherDone"], true);
    assert_eq!(body["sessions"][0]["completedCircuits"], 3);

    let response = app
        .oneshot(get_request_with_auth("/api/v1/cardio", &user.access_token))
        .await
        .unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["sessions"][0]["type"], "zone2_run");
    assert_eq!(body["sessions"][0]["label"], "Zone-2 Run");
    assert_eq!(body["sessions"][0]["durationMin"], 45);
}

#[tokio::test]
async fn test_later_users_start_empty() {
    let pool = create_legacy_pool().await;
    let app = create_test_app(test_config(), pool);
    let _first = create_authenticated_user(&app).await;
    let second = create_authenticated_user(&app).await;

    for uri in ["/api/v1/resistance", "/api/v1/mobility", "/api/v1/cardio"] {
        let response = app
            .clone()
            .oneshot(get_request_with_auth(uri, &second.access_token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(parse_response_body(response).await["total"], 0, "{}", uri);
    }
}

#[tokio::test]
async fn test_upgrade_is_repeatable() {
    let pool = create_legacy_pool().await;
    persistence::db::initialize(&pool)
        .await
        .expect("Second initialize should be a no-op");

    let app = create_test_app(test_config(), pool);
    let user = create_authenticated_user(&app).await;

    let response = app
        .oneshot(get_request_with_auth("/api/v1/resistance", &user.access_token))
        .await
        .unwrap();
    assert_eq!(parse_response_body(response).await["total"], 1);
}

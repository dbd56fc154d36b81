//! Shared setup for birdlog-api integration tests

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use birdlog_api::{build_router, AppState};
use birdlog_common::db::init_database;
use serde_json::Value;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot`

pub const ALICE: &str = "alice@example.com";
pub const BOB: &str = "bob@example.com";

/// Fresh database in a temp dir; keep the `TempDir` alive for the test
pub async fn setup_db() -> (TempDir, SqlitePool) {
    let dir = TempDir::new().unwrap();
    let pool = init_database(&dir.path().join("birdlog.db"))
        .await
        .expect("Should initialize test database");
    (dir, pool)
}

/// Request without identity
pub fn test_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Request carrying `X-User-Email`, with an optional JSON body
pub fn user_request(method: &str, uri: &str, user: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("X-User-Email", user);

    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Run one request through a fresh router
pub async fn send(pool: &SqlitePool, request: Request<Body>) -> (StatusCode, Value) {
    let app = build_router(AppState::new(pool.clone()));
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    (status, extract_json(response.into_body()).await)
}

pub async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

pub async fn count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn insert_species(pool: &SqlitePool, names: &[&str]) {
    for name in names {
        sqlx::query("INSERT INTO species (common_name) VALUES (?)")
            .bind(name)
            .execute(pool)
            .await
            .unwrap();
    }
}

/// Body accepted by `/submit_checklist`
pub fn submission(name: &str, date: &str, count: i64, species: Value) -> Value {
    serde_json::json!({
        "speciesName": name,
        "latitude": "36.9741",
        "longitude": "-122.0308",
        "observationDate": date,
        "timeObservationsStarted": "07:30",
        "durationMinutes": "45",
        "observationCount": count,
        "species": species,
    })
}

/// Submit as `user` and return the new checklist id
pub async fn submit(pool: &SqlitePool, user: &str, body: Value) -> i64 {
    let (status, json) = send(pool, user_request("POST", "/submit_checklist", user, Some(body))).await;
    assert_eq!(status, StatusCode::OK, "submit failed: {}", json);
    json["id"].as_i64().expect("id in submit response")
}

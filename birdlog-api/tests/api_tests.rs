//! Integration tests for the read endpoints, identity and health

mod helpers;

use axum::http::StatusCode;
use helpers::*;
use serde_json::json;

#[tokio::test]
async fn test_health_endpoint() {
    let (_dir, pool) = setup_db().await;

    let (status, body) = send(&pool, test_request("GET", "/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "birdlog-api");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_get_species_sorted() {
    let (_dir, pool) = setup_db().await;
    insert_species(&pool, &["Wrentit", "American Robin", "Bushtit"]).await;

    let (status, body) = send(&pool, test_request("GET", "/get_species")).await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["species"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["COMMON_NAME"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["American Robin", "Bushtit", "Wrentit"]);
    assert!(body["species"][0]["id"].is_i64());
}

#[tokio::test]
async fn test_search_species_case_insensitive() {
    let (_dir, pool) = setup_db().await;
    insert_species(&pool, &["American Robin", "European Robin", "Wrentit"]).await;

    let (status, body) = send(&pool, test_request("GET", "/search_species?q=%20ROBIN%20")).await;

    assert_eq!(status, StatusCode::OK);
    let species = body["species"].as_array().unwrap();
    assert_eq!(species.len(), 2);
    assert!(species
        .iter()
        .all(|s| s["COMMON_NAME"].as_str().unwrap().to_lowercase().contains("robin")));
}

#[tokio::test]
async fn test_search_species_empty_query_returns_nothing() {
    let (_dir, pool) = setup_db().await;
    insert_species(&pool, &["American Robin", "Wrentit"]).await;

    for uri in ["/search_species", "/search_species?q=", "/search_species?q=%20%20"] {
        let (status, body) = send(&pool, test_request("GET", uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"species": []}), "uri {}", uri);
    }
}

#[tokio::test]
async fn test_search_species_wildcards_are_literal() {
    let (_dir, pool) = setup_db().await;
    insert_species(&pool, &["American Robin"]).await;

    let (_, body) = send(&pool, test_request("GET", "/search_species?q=%25")).await;
    assert_eq!(body["species"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_protected_endpoints_require_identity() {
    let (_dir, pool) = setup_db().await;

    let requests = [
        ("GET", "/get_checklists"),
        ("GET", "/get_my_checklists"),
        ("POST", "/submit_checklist"),
        ("POST", "/edit_checklist/1"),
        ("DELETE", "/delete_checklist/1"),
        ("GET", "/search_my_checklist?q=robin"),
        ("GET", "/get_species_details?common_name=Wrentit"),
    ];

    for (method, uri) in requests {
        let (status, body) = send(&pool, test_request(method, uri)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}", method, uri);
        assert_eq!(
            body,
            json!({"status": "error", "message": "Authentication required"})
        );
    }
}

#[tokio::test]
async fn test_get_checklists_paginates_reference_rows() {
    let (_dir, pool) = setup_db().await;
    for i in 0..150 {
        sqlx::query("INSERT INTO checklist (sampling_event_id, latitude, longitude) VALUES (?, 36.9, -122.0)")
            .bind(format!("S{}", i))
            .execute(&pool)
            .await
            .unwrap();
    }

    let (status, body) = send(&pool, user_request("GET", "/get_checklists", ALICE, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 1);
    assert_eq!(body["page_size"], 100);
    assert_eq!(body["total_pages"], 2);
    assert_eq!(body["total_rows"], 150);
    assert_eq!(body["checklists"].as_array().unwrap().len(), 100);
    assert_eq!(body["checklists"][0]["SAMPLING_EVENT_IDENTIFIER"], "S0");

    let (_, body) = send(&pool, user_request("GET", "/get_checklists?page=9", ALICE, None)).await;
    assert_eq!(body["page"], 2);
    assert_eq!(body["checklists"].as_array().unwrap().len(), 50);
}

#[tokio::test]
async fn test_search_my_checklist_empty_query_lists_all_names() {
    let (_dir, pool) = setup_db().await;
    submit(&pool, ALICE, submission("Wrentit", "2024-01-01", 1, json!([]))).await;
    submit(&pool, ALICE, submission("Wrentit", "2024-01-02", 2, json!([]))).await;
    submit(&pool, ALICE, submission("Acorn Woodpecker", "2024-01-02", 1, json!([]))).await;
    submit(&pool, BOB, submission("Bushtit", "2024-01-02", 1, json!([]))).await;

    let (status, body) = send(&pool, user_request("GET", "/search_my_checklist?q=", ALICE, None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"species": [{"COMMON_NAME": "Acorn Woodpecker"}, {"COMMON_NAME": "Wrentit"}]})
    );

    let (_, body) = send(&pool, user_request("GET", "/search_my_checklist?q=WREN", ALICE, None)).await;
    assert_eq!(body, json!({"species": [{"COMMON_NAME": "Wrentit"}]}));
}

#[tokio::test]
async fn test_species_details_aggregates_by_date() {
    let (_dir, pool) = setup_db().await;
    submit(&pool, ALICE, submission("Wrentit", "2024-01-02", 1, json!([]))).await;
    submit(&pool, ALICE, submission("Wrentit", "2024-01-01", 2, json!([]))).await;
    submit(&pool, ALICE, submission("Wrentit", "2024-01-01", 3, json!([]))).await;
    submit(&pool, ALICE, submission("Bushtit", "2024-01-01", 9, json!([]))).await;
    submit(&pool, BOB, submission("Wrentit", "2024-01-01", 50, json!([]))).await;

    let (status, body) = send(
        &pool,
        user_request("GET", "/get_species_details?common_name=Wrentit", ALICE, None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["datesObserved"], json!(["2024-01-01", "2024-01-02"]));
    assert_eq!(body["timesObserved"], 6);
    assert_eq!(body["counts"], json!({"2024-01-01": 5, "2024-01-02": 1}));
    assert_eq!(body["locations"].as_array().unwrap().len(), 3);
    assert_eq!(body["locations"][0], json!([36.9741, -122.0308]));
}

#[tokio::test]
async fn test_species_details_empty_name() {
    let (_dir, pool) = setup_db().await;
    submit(&pool, ALICE, submission("Wrentit", "2024-01-01", 1, json!([]))).await;

    let (status, body) = send(
        &pool,
        user_request("GET", "/get_species_details?common_name=", ALICE, None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"datesObserved": [], "timesObserved": 0, "counts": {}, "locations": []})
    );
}

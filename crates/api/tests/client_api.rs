//! HTTP-level integration tests for the `/clients` resource.

mod common;

use axum::http::StatusCode;
use common::{
    access_token, body_json, build_test_app, create_client, delete, get, post_json, put_json,
    test_state,
};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_client_returns_201(pool: PgPool) {
    let state = test_state(pool);
    let token = access_token();

    let response = post_json(
        build_test_app(state.clone()),
        "/api/v1/clients",
        Some(&token),
        serde_json::json!({
            "name": "Ana Lima",
            "phone": "+5511999990000",
            "email": "ana@x.com",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["id"].is_string());
    assert_eq!(json["name"], "Ana Lima");
    assert_eq!(json["phone"], "+5511999990000");
    assert_eq!(json["tags"], serde_json::json!([]));
    assert!(json["created_at"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_client_validation_failures(pool: PgPool) {
    let state = test_state(pool);
    let token = access_token();

    // Phone with too few digits.
    let response = post_json(
        build_test_app(state.clone()),
        "/api/v1/clients",
        Some(&token),
        serde_json::json!({"name": "Ana", "phone": "12345", "email": "ana@x.com"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("phone"));

    // Malformed email.
    let response = post_json(
        build_test_app(state.clone()),
        "/api/v1/clients",
        Some(&token),
        serde_json::json!({"name": "Ana", "phone": "+5511999990000", "email": "nope"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Single-character name.
    let response = post_json(
        build_test_app(state.clone()),
        "/api/v1/clients",
        Some(&token),
        serde_json::json!({"name": "A", "phone": "+5511999990000", "email": "ana@x.com"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_partial_update_leaves_other_fields_alone(pool: PgPool) {
    let state = test_state(pool);
    let token = access_token();
    let id = create_client(&state, &token, "Ana Lima", "ana@x.com").await;

    let response = put_json(
        build_test_app(state.clone()),
        &format!("/api/v1/clients/{id}"),
        Some(&token),
        serde_json::json!({"name": "Ana L."}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Ana L.");
    assert_eq!(json["phone"], "+5511999990000");
    assert_eq!(json["email"], "ana@x.com");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_missing_client_returns_404(pool: PgPool) {
    let state = test_state(pool);
    let token = access_token();

    let response = put_json(
        build_test_app(state.clone()),
        &format!("/api/v1/clients/{}", uuid::Uuid::new_v4()),
        Some(&token),
        serde_json::json!({"name": "Nobody"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_clients_sort_and_limit(pool: PgPool) {
    let state = test_state(pool);
    let token = access_token();
    create_client(&state, &token, "Bruna Reis", "bruna@x.com").await;
    create_client(&state, &token, "Ana Lima", "ana@x.com").await;
    create_client(&state, &token, "Carla Souza", "carla@x.com").await;

    let response = get(
        build_test_app(state.clone()),
        "/api/v1/clients?sort=desc&limit=2",
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let names: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Carla Souza", "Bruna Reis"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_client_cascades_appointments(pool: PgPool) {
    let state = test_state(pool.clone());
    let token = access_token();
    let client_id = create_client(&state, &token, "Ana Lima", "ana@x.com").await;
    let service_id = common::create_service(&state, &token, "Massage", 150.0).await;

    let starts = chrono::Utc::now() + chrono::Duration::hours(2);
    let response = post_json(
        build_test_app(state.clone()),
        "/api/v1/appointments",
        Some(&token),
        serde_json::json!({
            "client_id": client_id,
            "service_id": service_id,
            "starts_at": starts,
            "ends_at": starts + chrono::Duration::hours(1),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = delete(
        build_test_app(state.clone()),
        &format!("/api/v1/clients/{client_id}"),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The client's appointments went with it.
    let response = get(
        build_test_app(state.clone()),
        "/api/v1/appointments",
        Some(&token),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 0);

    // Deleting again is a 404.
    let response = delete(
        build_test_app(state.clone()),
        &format!("/api/v1/clients/{client_id}"),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

//! HTTP-level integration tests for appointments: CRUD guards, the
//! completion flow, and package consumption order.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{
    access_token, body_json, build_test_app, create_client, create_package, create_service,
    delete, get, patch, post_json, put_json, test_state,
};
use sqlx::PgPool;

async fn create_appointment(
    state: &atelier_api::state::AppState,
    token: &str,
    client_id: &str,
    service_id: &str,
) -> String {
    let starts = Utc::now() + Duration::hours(2);
    let response = post_json(
        build_test_app(state.clone()),
        "/api/v1/appointments",
        Some(token),
        serde_json::json!({
            "client_id": client_id,
            "service_id": service_id,
            "starts_at": starts,
            "ends_at": starts + Duration::hours(1),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_str().unwrap().to_string()
}

async fn sell(state: &atelier_api::state::AppState, token: &str, client: &str, package: &str) {
    let response = post_json(
        build_test_app(state.clone()),
        &format!("/api/v1/clients/{client}/packages"),
        Some(token),
        serde_json::json!({"package_id": package}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_defaults_to_confirmed(pool: PgPool) {
    let state = test_state(pool);
    let token = access_token();
    let client = create_client(&state, &token, "Ana Lima", "ana@x.com").await;
    let service = create_service(&state, &token, "Massage", 150.0).await;

    let starts = Utc::now() + Duration::hours(2);
    let response = post_json(
        build_test_app(state.clone()),
        "/api/v1/appointments",
        Some(&token),
        serde_json::json!({
            "client_id": client,
            "service_id": service,
            "starts_at": starts,
            "ends_at": starts + Duration::hours(1),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["status"], "confirmed");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_rejects_inverted_window(pool: PgPool) {
    let state = test_state(pool);
    let token = access_token();
    let client = create_client(&state, &token, "Ana Lima", "ana@x.com").await;
    let service = create_service(&state, &token, "Massage", 150.0).await;

    let starts = Utc::now() + Duration::hours(2);
    let response = post_json(
        build_test_app(state.clone()),
        "/api/v1/appointments",
        Some(&token),
        serde_json::json!({
            "client_id": client,
            "service_id": service,
            "starts_at": starts,
            "ends_at": starts - Duration::minutes(30),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_cannot_set_completed(pool: PgPool) {
    let state = test_state(pool);
    let token = access_token();
    let client = create_client(&state, &token, "Ana Lima", "ana@x.com").await;
    let service = create_service(&state, &token, "Massage", 150.0).await;
    let id = create_appointment(&state, &token, &client, &service).await;

    let response = put_json(
        build_test_app(state.clone()),
        &format!("/api/v1/appointments/{id}"),
        Some(&token),
        serde_json::json!({"status": "completed"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Other transitions are fine.
    let response = put_json(
        build_test_app(state.clone()),
        &format!("/api/v1/appointments/{id}"),
        Some(&token),
        serde_json::json!({"status": "canceled"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "canceled");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_completion_without_package_charges_full_price(pool: PgPool) {
    let state = test_state(pool.clone());
    let token = access_token();
    let client = create_client(&state, &token, "Ana Lima", "ana@x.com").await;
    let service = create_service(&state, &token, "Massage", 150.0).await;
    let id = create_appointment(&state, &token, &client, &service).await;

    let response = patch(
        build_test_app(state.clone()),
        &format!("/api/v1/appointments/{id}/complete"),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "completed");

    // A pending pix charge for the full price was recorded.
    let (amount, method, status): (f64, String, String) = sqlx::query_as(
        "SELECT amount, method, status FROM payments WHERE appointment_id = $1",
    )
    .bind(uuid::Uuid::parse_str(&id).unwrap())
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(amount, 150.0);
    assert_eq!(method, "pix");
    assert_eq!(status, "pending");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_completion_is_rejected_the_second_time(pool: PgPool) {
    let state = test_state(pool.clone());
    let token = access_token();
    let client = create_client(&state, &token, "Ana Lima", "ana@x.com").await;
    let service = create_service(&state, &token, "Massage", 150.0).await;
    let id = create_appointment(&state, &token, &client, &service).await;

    let response = patch(
        build_test_app(state.clone()),
        &format!("/api/v1/appointments/{id}/complete"),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = patch(
        build_test_app(state.clone()),
        &format!("/api/v1/appointments/{id}/complete"),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");

    // Exactly one payment exists.
    let (payments,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM payments WHERE appointment_id = $1")
            .bind(uuid::Uuid::parse_str(&id).unwrap())
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(payments, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_completion_of_missing_appointment_is_404(pool: PgPool) {
    let state = test_state(pool);
    let token = access_token();

    let response = patch(
        build_test_app(state.clone()),
        &format!("/api/v1/appointments/{}/complete", uuid::Uuid::new_v4()),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_completion_debits_soonest_expiring_purchase(pool: PgPool) {
    let state = test_state(pool.clone());
    let token = access_token();
    let client = create_client(&state, &token, "Ana Lima", "ana@x.com").await;
    let service = create_service(&state, &token, "Massage", 150.0).await;
    let long = create_package(&state, &token, "Massage 5x long", 5, 180, &[&service]).await;
    let short = create_package(&state, &token, "Massage 5x short", 5, 30, &[&service]).await;

    // Buy the long-validity package first so purchase order cannot mask the
    // expiry ordering.
    sell(&state, &token, &client, &long).await;
    sell(&state, &token, &client, &short).await;

    let id = create_appointment(&state, &token, &client, &service).await;
    let response = patch(
        build_test_app(state.clone()),
        &format!("/api/v1/appointments/{id}/complete"),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // The short-validity purchase lost a session; the long one is intact.
    let response = get(
        build_test_app(state.clone()),
        &format!("/api/v1/clients/{client}/packages"),
        Some(&token),
    )
    .await;
    let json = body_json(response).await;
    for purchase in json.as_array().unwrap() {
        let expected = if purchase["package_name"] == "Massage 5x short" {
            4
        } else {
            5
        };
        assert_eq!(
            purchase["remaining_sessions"], expected,
            "wrong balance for {}",
            purchase["package_name"]
        );
    }

    // The session was paid from the package: zero amount, already paid.
    let (amount, method): (f64, String) =
        sqlx::query_as("SELECT amount, method FROM payments WHERE appointment_id = $1")
            .bind(uuid::Uuid::parse_str(&id).unwrap())
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(amount, 0.0);
    assert_eq!(method, "package");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_booked_service_is_a_conflict(pool: PgPool) {
    let state = test_state(pool);
    let token = access_token();
    let client = create_client(&state, &token, "Ana Lima", "ana@x.com").await;
    let service = create_service(&state, &token, "Massage", 150.0).await;
    create_appointment(&state, &token, &client, &service).await;

    let response = delete(
        build_test_app(state.clone()),
        &format!("/api/v1/services/{service}"),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use atelier_api::auth::jwt::{generate_access_token, JwtConfig};
use atelier_api::auth::rate_limit::{LoginRateLimiter, RateLimitConfig};
use atelier_api::config::{Environment, ServerConfig};
use atelier_api::routes;
use atelier_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        environment: Environment::Development,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 30,
            refresh_token_expiry_days: 7,
        },
        rate_limit: RateLimitConfig {
            max_attempts: 5,
            window_secs: 900,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses. Each test request consumes one
/// router via `oneshot`, so the same `AppState` (and therefore the same
/// rate-limiter instance) is shared by cloning the state.
pub fn build_test_app(state: AppState) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Build the shared test state for a pool.
pub fn test_state(pool: PgPool) -> AppState {
    AppState {
        pool,
        config: Arc::new(test_config()),
        login_limiter: Arc::new(LoginRateLimiter::new(RateLimitConfig {
            max_attempts: 5,
            window_secs: 900,
        })),
    }
}

/// Mint a valid access token without going through the login flow.
///
/// The `AuthUser` extractor only checks the signature and claims, so the
/// user does not need a database row unless the handler loads it.
pub fn access_token() -> String {
    generate_access_token("tester@x.com", uuid::Uuid::new_v4(), &test_config().jwt)
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, path: &str, token: Option<&str>) -> Response {
    send(app, Method::GET, path, token, None).await
}

pub async fn post_json(
    app: Router,
    path: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response {
    send(app, Method::POST, path, token, Some(body)).await
}

pub async fn put_json(
    app: Router,
    path: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response {
    send(app, Method::PUT, path, token, Some(body)).await
}

pub async fn patch(app: Router, path: &str, token: Option<&str>) -> Response {
    send(app, Method::PATCH, path, token, None).await
}

pub async fn delete(app: Router, path: &str, token: Option<&str>) -> Response {
    send(app, Method::DELETE, path, token, None).await
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
}

// ---------------------------------------------------------------------------
// Domain seeding helpers
// ---------------------------------------------------------------------------

/// Create a client via the API, returning its id.
pub async fn create_client(state: &AppState, token: &str, name: &str, email: &str) -> String {
    let response = post_json(
        build_test_app(state.clone()),
        "/api/v1/clients",
        Some(token),
        serde_json::json!({
            "name": name,
            "phone": "+5511999990000",
            "email": email,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_str().unwrap().to_string()
}

/// Create a service via the API, returning its id.
pub async fn create_service(state: &AppState, token: &str, name: &str, price: f64) -> String {
    let response = post_json(
        build_test_app(state.clone()),
        "/api/v1/services",
        Some(token),
        serde_json::json!({
            "name": name,
            "price": price,
            "duration_minutes": 60,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_str().unwrap().to_string()
}

/// Create a package covering the given services, returning its id.
pub async fn create_package(
    state: &AppState,
    token: &str,
    name: &str,
    session_count: i32,
    validity_days: i32,
    service_ids: &[&str],
) -> String {
    let response = post_json(
        build_test_app(state.clone()),
        "/api/v1/packages",
        Some(token),
        serde_json::json!({
            "name": name,
            "price": 400.0,
            "session_count": session_count,
            "validity_days": validity_days,
            "service_ids": service_ids,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_str().unwrap().to_string()
}

//! Router tests: authentication, health and error rendering.
//!
//! Authentication and health run over a disconnected pool; those paths never
//! build a query. Storage failures are driven through a mock connection that
//! answers every query with a connection error.

use axum::{
    body::Body,
    http::{Request, StatusCode, header::AUTHORIZATION},
};
use http_body_util::BodyExt;
use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, MockDatabase, RuntimeErr};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use roomify_shared::{JwtConfig, JwtService};

use crate::{AppState, create_router};

fn jwt() -> JwtService {
    JwtService::new(JwtConfig {
        secret: "test-secret".to_string(),
        access_token_expires_secs: 300,
    })
}

fn app() -> axum::Router {
    create_router(AppState::new(DatabaseConnection::Disconnected, jwt()))
}

fn app_with_unreachable_db() -> axum::Router {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Conn(RuntimeErr::Internal(
            "connection refused".to_string(),
        ))])
        .into_connection();
    create_router(AppState::new(db, jwt()))
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    send_to(app(), request).await
}

async fn send_to(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health_is_public() {
    let (status, body) = send(get("/api/v1/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["database"], "down");
}

#[tokio::test]
async fn test_bookings_require_token() {
    let (status, body) = send(get("/api/v1/bookings", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_forged_token_rejected() {
    let forged = JwtService::new(JwtConfig {
        secret: "other-secret".to_string(),
        access_token_expires_secs: 300,
    })
    .generate_access_token(Uuid::new_v4(), "guest")
    .unwrap();

    let (status, _) = send(get("/api/v1/bookings", Some(&forged))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_role_rejected() {
    let token = jwt()
        .generate_access_token(Uuid::new_v4(), "superuser")
        .unwrap();
    let uri = format!("/api/v1/reviews/{}", Uuid::new_v4());
    let (status, body) = send(get(&uri, Some(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_storage_failure_is_opaque_500() {
    let token = jwt().generate_access_token(Uuid::new_v4(), "guest").unwrap();
    let (status, body) = send_to(
        app_with_unreachable_db(),
        get("/api/v1/bookings", Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "STORAGE_ERROR");
    assert_eq!(body["message"], "Internal server error");
}

#[tokio::test]
async fn test_malformed_booking_id_is_client_error() {
    let token = jwt().generate_access_token(Uuid::new_v4(), "guest").unwrap();
    let (status, _) = send(get("/api/v1/bookings/not-a-uuid", Some(&token))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

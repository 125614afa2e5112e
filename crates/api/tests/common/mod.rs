#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use finflow_api::config::{RefundCheckMode, ServerConfig};
use finflow_api::router::build_app_router;
use finflow_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(refund_check: RefundCheckMode) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        app_secret: "test-secret".to_string(),
        refund_check,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and the pending refund check.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, RefundCheckMode::Pending)
}

pub fn build_test_app_with(pool: PgPool, refund_check: RefundCheckMode) -> Router {
    let config = test_config(refund_check);
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, Body::empty(), None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Body::empty(), None).await
}

pub async fn post_json(app: Router, uri: &str, json: Value) -> Response<Body> {
    send(
        app,
        Method::POST,
        uri,
        Body::from(json.to_string()),
        Some("application/json"),
    )
    .await
}

pub async fn put_json(app: Router, uri: &str, json: Value) -> Response<Body> {
    send(
        app,
        Method::PUT,
        uri,
        Body::from(json.to_string()),
        Some("application/json"),
    )
    .await
}

/// POST a single-file multipart form with the file under field `file`.
pub async fn post_file(app: Router, uri: &str, filename: &str, content: &[u8]) -> Response<Body> {
    let boundary = "finflow-test-boundary";
    let mut body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
         Content-Type: text/csv\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let content_type = format!("multipart/form-data; boundary={boundary}");
    send(app, Method::POST, uri, Body::from(body), Some(&content_type)).await
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Body,
    content_type: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

/// Register a space through the API, panicking on failure.
pub async fn create_space(pool: &PgPool, name: &str, code: &str) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/spaces",
        serde_json::json!({"name": name, "code": code}),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
}

/// Create a client through the API and return its id.
pub async fn create_client(pool: &PgPool, space: &str, body: Value) -> i64 {
    let mut body = body;
    body["space"] = Value::String(space.to_string());
    let response = post_json(build_test_app(pool.clone()), "/api/clients", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

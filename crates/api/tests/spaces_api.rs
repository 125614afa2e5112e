//! HTTP-level tests for the space registry and per-space settings.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_space_normalizes_name_and_code(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/spaces",
        json!({"name": "  GE-Souza-Tax ", "code": " ge "}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "ge-souza-tax");
    assert_eq!(json["code"], "GE");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_space_input_returns_400(pool: PgPool) {
    for body in [
        json!({"name": "x", "code": "G"}),
        json!({"name": "x", "code": "G1"}),
        json!({"name": "x", "code": "GEO"}),
        json!({"name": "  ", "code": "GE"}),
        json!({"code": "GE"}),
    ] {
        let app = common::build_test_app(pool.clone());
        let response = post_json(app, "/api/spaces", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_name_or_code_returns_409(pool: PgPool) {
    common::create_space(&pool, "ge-souza-tax", "GE").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/spaces", json!({"name": "GE-SOUZA-TAX", "code": "GS"})).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert!(body_json(response).await["error"]
        .as_str()
        .unwrap()
        .contains("ge-souza-tax"));

    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/spaces", json!({"name": "other", "code": "ge"})).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert!(body_json(response).await["error"].as_str().unwrap().contains("GE"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_get_and_delete_space(pool: PgPool) {
    common::create_space(&pool, "zeta", "ZE").await;
    common::create_space(&pool, "alpha", "AL").await;

    let json = body_json(get(common::build_test_app(pool.clone()), "/api/spaces").await).await;
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["alpha", "zeta"]);

    let response = get(common::build_test_app(pool.clone()), "/api/spaces/ALPHA").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["code"], "AL");

    let response = delete(common::build_test_app(pool.clone()), "/api/spaces/alpha").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(common::build_test_app(pool.clone()), "/api/spaces/alpha").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete(common::build_test_app(pool), "/api/spaces/alpha").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_settings_default_to_zero_value(pool: PgPool) {
    common::create_space(&pool, "x", "XX").await;

    let response = get(common::build_test_app(pool.clone()), "/api/spaces/x/settings").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["tain"], "");
    assert_eq!(json["ros_id"], "");
    assert!(json["updated_at"].is_null());

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM space_settings")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_settings_upsert_trims_and_merges(pool: PgPool) {
    common::create_space(&pool, "x", "XX").await;

    let response = put_json(
        common::build_test_app(pool.clone()),
        "/api/spaces/x/settings",
        json!({"tain": " T123 ", "ros_id": "R9"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let first = body_json(response).await;
    assert_eq!(first["tain"], "T123");
    assert!(first["updated_at"].is_string());

    let response = put_json(
        common::build_test_app(pool.clone()),
        "/api/spaces/x/settings",
        json!({"ros_id": "R10"}),
    )
    .await;
    let second = body_json(response).await;
    assert_eq!(second["tain"], "T123");
    assert_eq!(second["ros_id"], "R10");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_settings_errors(pool: PgPool) {
    common::create_space(&pool, "x", "XX").await;

    let response = put_json(
        common::build_test_app(pool.clone()),
        "/api/spaces/x/settings",
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(common::build_test_app(pool.clone()), "/api/spaces/nope/settings").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = put_json(
        common::build_test_app(pool),
        "/api/spaces/nope/settings",
        json!({"tain": "T1"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

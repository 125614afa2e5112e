//! HTTP-level tests for client records, CSV export and CSV import.

mod common;

use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use common::{body_json, body_text, delete, get, post_file, post_json, put_json};
use finflow_core::client_csv::{CRLF, EXPORT_COLUMNS, UTF8_BOM};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_client_derives_record_number(pool: PgPool) {
    common::create_space(&pool, "ge-souza-tax", "GE").await;

    let response = post_json(
        common::build_test_app(pool),
        "/api/clients",
        json!({
            "space": "GE-Souza-Tax",
            "name": " Ann Murphy ",
            "pps_number": "1234567T",
            "legacy_phone": "021 555",
            "favourite_colour": "blue"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let id = json["id"].as_i64().unwrap();
    assert_eq!(json["name"], "Ann Murphy");
    assert_eq!(json["space"], "ge-souza-tax");
    assert_eq!(json["finflow_number"], format!("GE-{id:04}"));
    assert!(json.get("legacy_phone").is_none());
    assert!(json.get("favourite_colour").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_client_errors(pool: PgPool) {
    common::create_space(&pool, "x", "XX").await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/clients",
        json!({"space": "x", "name": "   "}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        common::build_test_app(pool),
        "/api/clients",
        json!({"space": "nope", "name": "Ann"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_client_is_invisible_from_other_space(pool: PgPool) {
    common::create_space(&pool, "x", "XX").await;
    common::create_space(&pool, "y", "YY").await;
    let id = common::create_client(&pool, "x", json!({"name": "Ann"})).await;

    let response = get(common::build_test_app(pool.clone()), &format!("/api/clients/{id}?space=y")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/clients/{id}"),
        json!({"space": "y", "name": "Eve"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete(common::build_test_app(pool.clone()), &format!("/api/clients/{id}?space=y")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let list = body_json(get(common::build_test_app(pool.clone()), "/api/clients?space=y").await).await;
    assert!(list.as_array().unwrap().is_empty());

    let response = get(common::build_test_app(pool), &format!("/api/clients/{id}?space=x")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Ann");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_is_partial(pool: PgPool) {
    common::create_space(&pool, "x", "XX").await;
    let id = common::create_client(
        &pool,
        "x",
        json!({"name": "Ann", "email": "ann@example.ie", "mobile": "087"}),
    )
    .await;

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/clients/{id}"),
        json!({"space": "x", "email": "", "mobile": null, "city_county": " Cork "}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Ann");
    assert_eq!(json["email"], "");
    assert_eq!(json["mobile"], "087");
    assert_eq!(json["city_county"], "Cork");

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/clients/{id}"),
        json!({"space": "x", "name": ""}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_newest_first_and_delete(pool: PgPool) {
    common::create_space(&pool, "x", "XX").await;
    let first = common::create_client(&pool, "x", json!({"name": "First"})).await;
    let second = common::create_client(&pool, "x", json!({"name": "Second"})).await;

    let list = body_json(get(common::build_test_app(pool.clone()), "/api/clients?space=x").await).await;
    let ids: Vec<i64> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![second, first]);

    let response = delete(common::build_test_app(pool.clone()), &format!("/api/clients/{first}?space=x")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(common::build_test_app(pool), "/api/clients?space=nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_export_is_bom_and_header(pool: PgPool) {
    common::create_space(&pool, "ge-souza-tax", "GE").await;

    let response = get(
        common::build_test_app(pool),
        "/api/clients/export.csv?space=ge-souza-tax",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/csv"));
    assert!(response.headers()[CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("finflowai_ge_clients.csv"));

    let body = body_text(response).await;
    assert_eq!(body, format!("{UTF8_BOM}{}{CRLF}", EXPORT_COLUMNS.join(",")));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_export_hides_secrets(pool: PgPool) {
    common::create_space(&pool, "x", "XX").await;
    let id = common::create_client(
        &pool,
        "x",
        json!({"name": "Murphy, Ann", "revenue_password": "hunter2"}),
    )
    .await;

    let body = body_text(get(common::build_test_app(pool), "/api/clients/export.csv?space=x").await).await;
    let lines: Vec<&str> = body.split(CRLF).collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with(&format!("{id},X-{id:04},\"Murphy, Ann\",")));
    assert!(!body.contains("hunter2"));
    assert!(!lines[0].contains("revenue_password"));
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_import_counts_added_and_skipped(pool: PgPool) {
    common::create_space(&pool, "x", "XX").await;

    let csv = "\u{feff}Name,Email,unknown\r\nAnn,ann@x.ie,1\r\n,nobody@x.ie,2\r\nBob,,3\r\n";
    let response = post_file(
        common::build_test_app(pool.clone()),
        "/api/clients/import.csv?space=x",
        "clients.csv",
        csv.as_bytes(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["added"], 2);
    assert_eq!(json["skipped"], 1);
    assert!(json["errors"].as_array().unwrap().is_empty());

    let list = body_json(get(common::build_test_app(pool), "/api/clients?space=x").await).await;
    let names: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Bob", "Ann"]);
    assert_eq!(list[1]["email"], "ann@x.ie");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_import_rejects_non_csv_and_unknown_space(pool: PgPool) {
    common::create_space(&pool, "x", "XX").await;

    let response = post_file(
        common::build_test_app(pool.clone()),
        "/api/clients/import.csv?space=x",
        "clients.xlsx",
        b"name\nAnn\n",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_file(
        common::build_test_app(pool),
        "/api/clients/import.csv?space=nope",
        "clients.csv",
        b"name\nAnn\n",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

//! HTTP-level integration tests for the `/api/search-history` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get};
use folio_db::repositories::SearchHistoryRepo;
use serde_json::json;
use sqlx::PgPool;

async fn record_all(pool: &PgPool, terms: &[&str]) {
    for term in terms {
        SearchHistoryRepo::record(pool, term).await.unwrap();
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_empty_history(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/search-history").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"data": []}));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_history_returns_five_most_recent(pool: PgPool) {
    record_all(&pool, &["alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "BRAVO"]).await;

    let json = body_json(get(build_test_app(pool), "/api/search-history").await).await;
    assert_eq!(
        json["data"],
        json!(["BRAVO", "foxtrot", "echo", "delta", "charlie"])
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_remove_single_term(pool: PgPool) {
    record_all(&pool, &["tech", "mobile"]).await;

    let response = delete(build_test_app(pool.clone()), "/api/search-history/Tech").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete(build_test_app(pool.clone()), "/api/search-history/tech").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");

    let json = body_json(get(build_test_app(pool), "/api/search-history").await).await;
    assert_eq!(json["data"], json!(["mobile"]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_remove_term_with_spaces(pool: PgPool) {
    record_all(&pool, &["tech corp"]).await;

    let response = delete(build_test_app(pool), "/api/search-history/tech%20corp").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_clear_history(pool: PgPool) {
    record_all(&pool, &["tech", "mobile", "portal"]).await;

    let response = delete(build_test_app(pool.clone()), "/api/search-history").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json = body_json(get(build_test_app(pool), "/api/search-history").await).await;
    assert_eq!(json["data"], json!([]));
}

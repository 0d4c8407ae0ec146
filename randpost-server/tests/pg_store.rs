//! PostgreSQL integration tests
//!
//! Run with a reachable server:
//! RANDPOST_DB_HOST=127.0.0.1 RANDPOST_DB_USER=postgres RANDPOST_DB_PASSWORD=... \
//!     cargo test -p randpost-server --test pg_store -- --ignored

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use tower::ServiceExt;

use randpost_server::db::bootstrap::{ensure_database, ensure_table};
use randpost_server::db::{create_pool, PgPostStore, PostStore, StoreError};
use randpost_server::http::build_router;
use randpost_server::{AppState, StoreConfig};

/// Each test gets its own table so they can run in parallel.
async fn fresh_store(table: &str) -> (PgPostStore, StoreConfig) {
    let host = std::env::var("RANDPOST_DB_HOST").unwrap_or_else(|_| "127.0.0.1".into());
    let user = std::env::var("RANDPOST_DB_USER").unwrap_or_else(|_| "postgres".into());
    let password = std::env::var("RANDPOST_DB_PASSWORD").ok();
    let config = StoreConfig::new(host, 5432, user, password, "randpost_test", table)
        .expect("valid config");

    ensure_database(&config).await.expect("ensure database");
    let pool = create_pool(&config).await.expect("pool creation failed");
    ensure_table(&pool, &config).await.expect("ensure table");

    sqlx::query(&format!("TRUNCATE {} RESTART IDENTITY", config.table.quoted()))
        .execute(&pool)
        .await
        .expect("truncate");

    (PgPostStore::new(pool, &config.table), config)
}

async fn rows(store: &PgPostStore, config: &StoreConfig) -> Vec<(i64, String)> {
    sqlx::query_as(&format!(
        "SELECT id, content FROM {} ORDER BY id",
        config.table.quoted()
    ))
    .fetch_all(store.pool())
    .await
    .expect("select rows")
}

#[tokio::test]
#[ignore = "requires database"]
async fn empty_table_reports_no_rows() {
    let (store, _) = fresh_store("post_it_empty").await;

    let err = store.random_content().await.unwrap_err();
    assert!(matches!(err, StoreError::NoRowsFound));
}

#[tokio::test]
#[ignore = "requires database"]
async fn insert_then_select_single_row() {
    let (store, config) = fresh_store("post_it_single").await;

    store.insert_post("the only post").await.expect("insert");

    for _ in 0..5 {
        assert_eq!(store.random_content().await.unwrap(), "the only post");
    }
    assert_eq!(rows(&store, &config).await.len(), 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn content_is_bound_not_interpolated() {
    let (store, config) = fresh_store("post_it_injection").await;
    let hostile = "'); DROP TABLE post_it_injection; --";

    store.insert_post(hostile).await.expect("insert");

    let rows = rows(&store, &config).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].1, hostile);
}

#[tokio::test]
#[ignore = "requires database"]
async fn identical_content_gets_distinct_ids() {
    let (store, config) = fresh_store("post_it_duplicates").await;

    store.insert_post("same").await.expect("first insert");
    store.insert_post("same").await.expect("second insert");

    let rows = rows(&store, &config).await;
    assert_eq!(rows.len(), 2);
    assert!(rows[0].0 < rows[1].0);
}

#[tokio::test]
#[ignore = "requires database"]
async fn overlong_content_is_a_query_failure() {
    let (store, config) = fresh_store("post_it_overlong").await;

    let err = store.insert_post(&"x".repeat(256)).await.unwrap_err();
    assert!(matches!(err, StoreError::QueryFailure(_)));
    assert!(rows(&store, &config).await.is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn router_round_trip_against_postgres() {
    let (store, config) = fresh_store("post_it_router").await;
    let app = build_router(AppState::new(Arc::new(store.clone())), false);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/posts")
        .body(Body::from(r#"{"content":"from http"}"#))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/posts")
        .body(Body::from("{}"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(rows(&store, &config).await.len(), 1);

    let request = Request::builder().uri("/posts").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

/// Connections go back to the pool asynchronously after a drop; wait for it.
async fn wait_until_all_idle(store: &PgPostStore) {
    for _ in 0..50 {
        let pool = store.pool();
        if pool.num_idle() == pool.size() as usize {
            return;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    let pool = store.pool();
    panic!(
        "connections leaked: size={} idle={}",
        pool.size(),
        pool.num_idle()
    );
}

#[tokio::test]
#[ignore = "requires database"]
async fn connections_released_on_error_and_deadline_paths() {
    let (store, _) = fresh_store("post_it_release").await;
    let max = store.pool().options().get_max_connections() as usize;

    // Empty table: every request fails with NoRowsFound
    let app = build_router(AppState::new(Arc::new(store.clone())), false);
    for _ in 0..(max * 4) {
        let request = Request::builder().uri("/posts").body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
    wait_until_all_idle(&store).await;

    // A deadline too short for any round trip drops calls mid-flight
    let app = build_router(
        AppState::with_timeout(Arc::new(store.clone()), Duration::from_micros(1)),
        false,
    );
    for _ in 0..(max * 4) {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/posts")
            .body(Body::from(r#"{"content":"too slow"}"#))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
    wait_until_all_idle(&store).await;

    // Pool still serves after all the dropped calls; some of the
    // abandoned inserts may have committed server-side
    store.insert_post("still works").await.expect("insert after drops");
    store.random_content().await.expect("select after drops");
    wait_until_all_idle(&store).await;
}

// tests/support/helpers.rs
use super::mocks::{FailingArticleWrite, FixedClock, InMemoryBlobStore, StaleCategoryCheck};
use axum::body::{self, Body};
use axum::http::StatusCode;
use cms_backend::application::services::ApplicationServices;
use cms_backend::domain::article::{ArticleReadRepository, ArticleWriteRepository};
use cms_backend::domain::category::CategoryRepository;
use cms_backend::infrastructure::{
    database,
    repositories::{
        SqliteArticleReadRepository, SqliteArticleWriteRepository, SqliteCategoryRepository,
    },
};
use cms_backend::presentation::http::{
    routes::{RouterOptions, build_router},
    state::HttpState,
};
use serde_json::Value;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

/// Fresh in-memory database with migrations applied. A single connection
/// keeps every query on the same in-memory database.
pub async fn memory_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("sqlite options")
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("connect in-memory sqlite");
    database::run_migrations(&pool).await.expect("migrations");
    pool
}

pub type FieldMap = BTreeMap<String, Vec<String>>;

/// Services wired to an in-memory database and blob store.
pub struct TestApp {
    pub pool: SqlitePool,
    pub blobs: Arc<InMemoryBlobStore>,
    /// Flip with `writes.fail(true)` to make article row transactions fail.
    pub writes: Arc<FailingArticleWrite>,
    /// Flip with `categories.skip_existence_check(true)` to let unknown
    /// category ids through validation.
    pub categories: Arc<StaleCategoryCheck>,
    pub services: Arc<ApplicationServices>,
}

impl TestApp {
    pub async fn new() -> Self {
        let pool = memory_pool().await;
        let blobs = Arc::new(InMemoryBlobStore::new());

        let sqlite_write: Arc<dyn ArticleWriteRepository> =
            Arc::new(SqliteArticleWriteRepository::new(pool.clone()));
        let writes = Arc::new(FailingArticleWrite::new(sqlite_write));
        let article_write: Arc<dyn ArticleWriteRepository> = writes.clone();
        let article_read: Arc<dyn ArticleReadRepository> =
            Arc::new(SqliteArticleReadRepository::new(pool.clone()));
        let sqlite_categories: Arc<dyn CategoryRepository> =
            Arc::new(SqliteCategoryRepository::new(pool.clone()));
        let categories = Arc::new(StaleCategoryCheck::new(sqlite_categories));
        let category_repo: Arc<dyn CategoryRepository> = categories.clone();

        let services = Arc::new(ApplicationServices::new(
            article_write,
            article_read,
            category_repo,
            blobs.clone(),
            Arc::new(FixedClock),
        ));

        Self {
            pool,
            blobs,
            writes,
            categories,
            services,
        }
    }

    pub fn router(&self) -> axum::Router {
        let state = HttpState {
            services: Arc::clone(&self.services),
            default_page_size: 10,
        };
        let storage_root = std::env::temp_dir();
        build_router(
            state,
            RouterOptions {
                storage_root: &storage_root,
                max_upload_bytes: 2 * 1024 * 1024,
                allowed_origins: &[],
            },
        )
    }

    pub async fn count_rows(&self, sql: &str, id: i64) -> i64 {
        sqlx::query_scalar(sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .expect("count query")
    }

    pub async fn media_rows(&self, article_id: i64) -> i64 {
        self.count_rows("SELECT COUNT(*) FROM media WHERE article_id = ?", article_id)
            .await
    }

    pub async fn join_rows(&self, article_id: i64) -> i64 {
        self.count_rows(
            "SELECT COUNT(*) FROM article_category WHERE article_id = ?",
            article_id,
        )
        .await
    }

    pub async fn total_rows(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pool)
            .await
            .expect("count query")
    }

    pub async fn article_rows(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM articles")
            .fetch_one(&self.pool)
            .await
            .expect("count query")
    }
}

/// Reads a JSON body from a router response.
pub async fn json_body(resp: axum::response::Response) -> Value {
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("expected a JSON body")
}

/// Asserts that a response is an error body with the expected status and
/// canonical reason.
pub async fn assert_error_response(
    resp: axum::response::Response,
    expected_status: StatusCode,
    expected_error: &str,
) -> Value {
    assert_eq!(resp.status(), expected_status);
    let ct = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(ct.starts_with("application/json"), "unexpected content-type: {ct}");
    let json = json_body(resp).await;
    assert_eq!(json["error"].as_str().unwrap_or(""), expected_error);
    assert!(
        !json["message"].as_str().unwrap_or("").is_empty(),
        "expected non-empty message field in ErrorResponse"
    );
    json
}

pub fn empty_body() -> Body {
    Body::empty()
}

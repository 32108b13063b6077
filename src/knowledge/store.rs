//! Knowledge-base page search.
//!
//! Pages are crawled website content with a `title`, optional `url` and the
//! matchable `content` field. Search is a case-insensitive substring match
//! on content; among all matching rows the one with the longest content wins.

use std::path::PathBuf;

use async_trait::async_trait;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection, Row, SqliteConnection};
use thiserror::Error;

/// Backend failure, as opposed to a query that simply matched nothing.
/// Callers in the answer pipeline treat both as "no match", but the
/// distinction stays observable in logs and tests.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("knowledge base unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    fn unavailable<E: std::fmt::Display>(err: E) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    pub title: String,
    pub url: Option<String>,
    pub content: String,
}

impl PageRecord {
    /// Render the page as a chat answer: trimmed content plus a link line
    /// when the page has a URL.
    pub fn as_answer(&self) -> String {
        let mut answer = self.content.trim().to_string();
        if let Some(url) = self.url.as_deref().filter(|url| !url.is_empty()) {
            answer.push_str(&format!("\n\n[Read more]({})", url));
        }
        answer
    }
}

#[async_trait]
pub trait PageStore: Send + Sync {
    /// Find the longest page whose content contains `query`, ignoring case.
    async fn search_best_match(&self, query: &str) -> Result<Option<PageRecord>, StoreError>;
}

/// SQLite-backed page store.
///
/// Each search opens and closes its own connection; there is no pool and no
/// retry. Schema bootstrap runs once at startup over a short-lived
/// connection of its own.
pub struct SqlitePageStore {
    db_path: PathBuf,
}

impl SqlitePageStore {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        let mut conn = self.connect().await?;
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS pages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                url TEXT,
                content TEXT NOT NULL
            )",
        )
        .execute(&mut conn)
        .await
        .map_err(StoreError::unavailable)?;

        let _ = conn.close().await;
        Ok(())
    }

    async fn connect(&self) -> Result<SqliteConnection, StoreError> {
        SqliteConnectOptions::new()
            .filename(&self.db_path)
            .create_if_missing(true)
            .connect()
            .await
            .map_err(StoreError::unavailable)
    }
}

#[async_trait]
impl PageStore for SqlitePageStore {
    async fn search_best_match(&self, query: &str) -> Result<Option<PageRecord>, StoreError> {
        let mut conn = self.connect().await?;

        let row = sqlx::query(
            "SELECT title, url, content FROM pages
             WHERE LOWER(content) LIKE '%' || LOWER(?1) || '%'
             ORDER BY LENGTH(content) DESC
             LIMIT 1",
        )
        .bind(query)
        .fetch_optional(&mut conn)
        .await
        .map_err(StoreError::unavailable)?;

        let _ = conn.close().await;

        Ok(row.map(|row| PageRecord {
            title: row.get("title"),
            url: row.get("url"),
            content: row.get("content"),
        }))
    }
}

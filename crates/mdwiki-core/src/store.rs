//! Pooled SQLite storage for wiki pages
//!
//! `PageStore` is the only component that touches the database; callers
//! get pages in and out through its async API and never see a
//! connection. Every operation runs a single statement against the
//! pool, with the SQL text resolved through the query catalog.

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::config::{DbConfig, DEFAULT_DB_DRIVER};
use crate::error::{Result, StoreError};
use crate::queries::{QueryCatalog, SqlQuery};
use crate::types::Page;

/// Asynchronous page storage over a SQLite connection pool.
#[derive(Debug)]
pub struct PageStore {
    pool: SqlitePool,
    queries: QueryCatalog,
}

impl PageStore {
    /// Open the database named by `config` and build the pool.
    ///
    /// Creates the database file (and its parent directory) when
    /// missing. Fails on an unsupported driver or an unloadable query
    /// catalog before any connection is attempted.
    pub async fn connect(config: &DbConfig) -> Result<Self> {
        if config.driver != DEFAULT_DB_DRIVER {
            return Err(StoreError::UnsupportedDriver(config.driver.clone()));
        }
        let queries = QueryCatalog::load(config.queries_file.as_deref())?;

        let file = database_file(&config.url)?;
        if let Some(parent) = Path::new(file).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        tracing::info!("Opening SQLite database at: {}", file);
        let options = SqliteConnectOptions::new()
            .filename(file)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_pool_size)
            .connect_with(options)
            .await?;

        Ok(Self { pool, queries })
    }

    /// Create the pages table if it does not exist yet. Idempotent.
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(self.queries.sql(SqlQuery::CreateTable))
            .execute(&self.pool)
            .await?;
        tracing::debug!("pages table ready");
        Ok(())
    }

    /// All page names, ascending.
    pub async fn list_page_names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = sqlx::query_scalar(self.queries.sql(SqlQuery::ListPages))
            .fetch_all(&self.pool)
            .await?;
        names.sort();
        Ok(names)
    }

    /// All pages with their content, ordered by name ascending.
    pub async fn list_pages(&self) -> Result<Vec<Page>> {
        let mut pages: Vec<Page> = sqlx::query_as(self.queries.sql(SqlQuery::ListPagesWithContent))
            .fetch_all(&self.pool)
            .await?;
        pages.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(pages)
    }

    /// Look up a page by name; `Ok(None)` when there is no such page.
    pub async fn fetch_page(&self, name: &str) -> Result<Option<Page>> {
        let row: Option<(i64, String)> = sqlx::query_as(self.queries.sql(SqlQuery::GetPageByName))
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|(id, content)| Page {
            id,
            name: name.to_string(),
            content,
        }))
    }

    /// Insert a new page and return its assigned id.
    ///
    /// A name collision surfaces as [`StoreError::NameTaken`]; the
    /// existing row is left untouched.
    pub async fn create_page(&self, name: &str, content: &str) -> Result<i64> {
        let result = sqlx::query(self.queries.sql(SqlQuery::InsertPage))
            .bind(name)
            .bind(content)
            .execute(&self.pool)
            .await
            .map_err(|err| constraint_error(err, name))?;

        let id = result.last_insert_rowid();
        tracing::debug!("created page '{}' with id {}", name, id);
        Ok(id)
    }

    /// Replace the content of the page with this id.
    ///
    /// Updating a missing id is an error, [`StoreError::PageNotFound`].
    pub async fn save_page(&self, id: i64, content: &str) -> Result<()> {
        let result = sqlx::query(self.queries.sql(SqlQuery::UpdatePage))
            .bind(content)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::PageNotFound(id));
        }
        Ok(())
    }

    /// Delete the page with this id. Deleting a missing id is a no-op.
    pub async fn delete_page(&self, id: i64) -> Result<()> {
        let result = sqlx::query(self.queries.sql(SqlQuery::DeletePage))
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            tracing::debug!("delete for id {} matched no page", id);
        }
        Ok(())
    }
}

/// Filesystem path behind a `sqlite:` connection URL.
fn database_file(url: &str) -> Result<&str> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url);
    if rest.contains("://") {
        return Err(StoreError::UnsupportedDriver(url.to_string()));
    }
    Ok(rest.split_once('?').map_or(rest, |(path, _)| path))
}

/// Map a unique-constraint violation on insert to `NameTaken`.
fn constraint_error(err: sqlx::Error, name: &str) -> StoreError {
    if let Some(db) = err.as_database_error() {
        if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) {
            return StoreError::NameTaken(name.to_string());
        }
    }
    StoreError::Database(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    async fn test_store() -> (TempDir, PageStore) {
        let dir = tempfile::tempdir().unwrap();
        let config = DbConfig {
            url: format!("sqlite:{}", dir.path().join("wiki.db").display()),
            ..DbConfig::default()
        };
        let store = PageStore::connect(&config).await.unwrap();
        store.init_schema().await.unwrap();
        (dir, store)
    }

    #[test]
    fn test_database_file_strips_scheme() {
        assert_eq!(database_file("sqlite:db/wiki.db").unwrap(), "db/wiki.db");
        assert_eq!(database_file("sqlite://db/wiki.db").unwrap(), "db/wiki.db");
        assert_eq!(database_file("wiki.db").unwrap(), "wiki.db");
        assert_eq!(
            database_file("sqlite:db/wiki.db?mode=rwc").unwrap(),
            "db/wiki.db"
        );
        assert!(database_file("postgres://localhost/wiki").is_err());
    }

    #[tokio::test]
    async fn test_unsupported_driver_rejected() {
        let config = DbConfig {
            driver: "hsqldb".to_string(),
            ..DbConfig::default()
        };
        let err = PageStore::connect(&config).await.unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedDriver(ref d) if d == "hsqldb"));
    }

    #[tokio::test]
    async fn test_create_then_fetch() {
        let (_dir, store) = test_store().await;

        let id = store.create_page("Home", "# Welcome").await.unwrap();
        let page = store.fetch_page("Home").await.unwrap().unwrap();
        assert_eq!(page.id, id);
        assert_eq!(page.name, "Home");
        assert_eq!(page.content, "# Welcome");

        let other = store.create_page("About", "").await.unwrap();
        assert_ne!(other, id);
    }

    #[tokio::test]
    async fn test_fetch_missing_page_is_none() {
        let (_dir, store) = test_store().await;
        assert!(store.fetch_page("Nowhere").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_duplicate_name_rejected() {
        let (_dir, store) = test_store().await;

        let id = store.create_page("Home", "original").await.unwrap();
        let err = store.create_page("Home", "impostor").await.unwrap_err();
        assert!(matches!(err, StoreError::NameTaken(ref name) if name == "Home"));

        let page = store.fetch_page("Home").await.unwrap().unwrap();
        assert_eq!(page.id, id);
        assert_eq!(page.content, "original");
    }

    #[tokio::test]
    async fn test_save_replaces_content_only() {
        let (_dir, store) = test_store().await;

        let id = store.create_page("Home", "draft").await.unwrap();
        store.save_page(id, "final").await.unwrap();

        let page = store.fetch_page("Home").await.unwrap().unwrap();
        assert_eq!(page.id, id);
        assert_eq!(page.content, "final");
    }

    #[tokio::test]
    async fn test_save_missing_id_fails() {
        let (_dir, store) = test_store().await;

        let id = store.create_page("Keep", "untouched").await.unwrap();
        let err = store.save_page(id + 1, "lost").await.unwrap_err();
        assert!(matches!(err, StoreError::PageNotFound(_)));

        let page = store.fetch_page("Keep").await.unwrap().unwrap();
        assert_eq!(page.content, "untouched");
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (_dir, store) = test_store().await;

        let id = store.create_page("Gone", "soon").await.unwrap();
        store.delete_page(id).await.unwrap();
        assert!(store.fetch_page("Gone").await.unwrap().is_none());

        // A second delete of the same id is still a success.
        store.delete_page(id).await.unwrap();
    }

    #[tokio::test]
    async fn test_listings_are_sorted_by_name() {
        let (_dir, store) = test_store().await;

        for name in ["b", "a", "c"] {
            store.create_page(name, "x").await.unwrap();
        }

        assert_eq!(store.list_page_names().await.unwrap(), vec!["a", "b", "c"]);
        let pages = store.list_pages().await.unwrap();
        let names: Vec<&str> = pages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_empty_listings() {
        let (_dir, store) = test_store().await;
        assert!(store.list_page_names().await.unwrap().is_empty());
        assert!(store.list_pages().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_init_schema_is_idempotent() {
        let (_dir, store) = test_store().await;
        store.init_schema().await.unwrap();

        // Rows survive the second init.
        store.create_page("Home", "kept").await.unwrap();
        store.init_schema().await.unwrap();
        assert!(store.fetch_page("Home").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_concurrent_creates_distinct_names() {
        let (_dir, store) = test_store().await;
        let store = Arc::new(store);

        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.create_page(&format!("page-{i}"), "content").await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let names = store.list_page_names().await.unwrap();
        assert_eq!(names.len(), 8);
        for i in 0..8 {
            assert!(store.fetch_page(&format!("page-{i}")).await.unwrap().is_some());
        }
    }

    #[tokio::test]
    async fn test_concurrent_creates_same_name() {
        let (_dir, store) = test_store().await;
        let store = Arc::new(store);

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.create_page("highlander", "only one").await
            }));
        }

        let mut created = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(StoreError::NameTaken(name)) => assert_eq!(name, "highlander"),
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert_eq!(created, 1);
        assert_eq!(store.list_page_names().await.unwrap(), vec!["highlander"]);
    }
}

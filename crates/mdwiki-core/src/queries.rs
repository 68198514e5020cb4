//! Query catalog: logical query ids resolved to SQL text
//!
//! The SQL the store runs is not hardcoded; it comes from a
//! properties-style resource so a deployment can point the store at a
//! different schema without recompiling. A bundled copy covers the
//! default SQLite layout.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{Result, StoreError};

/// Catalog resource compiled into the crate.
const BUNDLED: &str = include_str!("../resources/db-queries.properties");

/// The seven statements the page store runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlQuery {
    /// DDL for the pages table, `CREATE TABLE IF NOT EXISTS` semantics.
    CreateTable,
    /// All page names.
    ListPages,
    /// All pages with their content.
    ListPagesWithContent,
    /// A single page's id and content, by name.
    GetPageByName,
    /// Insert a new page row.
    InsertPage,
    /// Replace a page's content, by id.
    UpdatePage,
    /// Delete a page row, by id.
    DeletePage,
}

impl SqlQuery {
    pub const ALL: [SqlQuery; 7] = [
        SqlQuery::CreateTable,
        SqlQuery::ListPages,
        SqlQuery::ListPagesWithContent,
        SqlQuery::GetPageByName,
        SqlQuery::InsertPage,
        SqlQuery::UpdatePage,
        SqlQuery::DeletePage,
    ];

    /// Key this query is stored under in the catalog resource.
    pub fn key(self) -> &'static str {
        match self {
            SqlQuery::CreateTable => "create-pages-table",
            SqlQuery::ListPages => "all-pages",
            SqlQuery::ListPagesWithContent => "all-pages-data",
            SqlQuery::GetPageByName => "get-page",
            SqlQuery::InsertPage => "create-page",
            SqlQuery::UpdatePage => "save-page",
            SqlQuery::DeletePage => "delete-page",
        }
    }
}

/// SQL text for every [`SqlQuery`], immutable after load.
#[derive(Debug, Clone)]
pub struct QueryCatalog {
    create_table: String,
    list_pages: String,
    list_pages_with_content: String,
    get_page_by_name: String,
    insert_page: String,
    update_page: String,
    delete_page: String,
}

impl QueryCatalog {
    /// Load the catalog from `path`, or the bundled resource when `None`.
    ///
    /// Fails if the file cannot be read or any of the seven keys is
    /// absent or empty; there is no partial catalog.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let text = match path {
            Some(path) => {
                tracing::info!("Loading query catalog from: {}", path.display());
                std::fs::read_to_string(path).map_err(|source| StoreError::QueriesIo {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            None => BUNDLED.to_string(),
        };
        Self::parse(&text)
    }

    fn parse(text: &str) -> Result<Self> {
        let mut entries: HashMap<&str, &str> = HashMap::new();
        for line in text.lines() {
            let line = line.trim_start();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            if let Some((key, value)) = line.split_once(['=', ':']) {
                entries.insert(key.trim(), value.trim_start());
            }
        }

        let mut take = |query: SqlQuery| -> Result<String> {
            match entries.remove(query.key()) {
                Some(sql) if !sql.is_empty() => Ok(sql.to_string()),
                _ => Err(StoreError::MissingQuery(query.key())),
            }
        };

        Ok(Self {
            create_table: take(SqlQuery::CreateTable)?,
            list_pages: take(SqlQuery::ListPages)?,
            list_pages_with_content: take(SqlQuery::ListPagesWithContent)?,
            get_page_by_name: take(SqlQuery::GetPageByName)?,
            insert_page: take(SqlQuery::InsertPage)?,
            update_page: take(SqlQuery::UpdatePage)?,
            delete_page: take(SqlQuery::DeletePage)?,
        })
    }

    /// SQL text for `query`.
    pub fn sql(&self, query: SqlQuery) -> &str {
        match query {
            SqlQuery::CreateTable => &self.create_table,
            SqlQuery::ListPages => &self.list_pages,
            SqlQuery::ListPagesWithContent => &self.list_pages_with_content,
            SqlQuery::GetPageByName => &self.get_page_by_name,
            SqlQuery::InsertPage => &self.insert_page,
            SqlQuery::UpdatePage => &self.update_page,
            SqlQuery::DeletePage => &self.delete_page,
        }
    }
}

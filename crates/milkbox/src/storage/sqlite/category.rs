//! SQLite category repository.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use milkbox_core::item::Category;
use milkbox_core::storage::{CategoryRepository, RepositoryError, Result};

use super::conversions::row_to_category;
use super::error::{map_tokio_rusqlite_error, wrap_err};
use super::schema;

/// Category repository backed by the embedded SQLite database.
pub struct SqliteCategoryRepository {
    conn: Connection,
    initialized: AtomicBool,
}

impl SqliteCategoryRepository {
    pub(crate) fn new(conn: Connection) -> Self {
        Self {
            conn,
            initialized: AtomicBool::new(false),
        }
    }

    fn require_init(&self) -> Result<()> {
        if self.initialized.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(RepositoryError::Uninitialized)
        }
    }
}

#[async_trait]
impl CategoryRepository for SqliteCategoryRepository {
    async fn initialize(&self) -> Result<()> {
        self.conn
            .call(|conn| {
                conn.execute_batch(schema::CREATE_CATEGORIES_TABLE)
                    .map_err(wrap_err)
            })
            .await
            .map_err(map_tokio_rusqlite_error)?;

        self.initialized.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Category>> {
        self.require_init()?;

        self.conn
            .call(|conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_ALL_CATEGORIES)
                    .map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_category).map_err(wrap_err)?;

                let mut categories = Vec::new();
                for row_result in rows {
                    categories.push(row_result.map_err(wrap_err)?);
                }
                Ok(categories)
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>> {
        self.require_init()?;

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_CATEGORY_BY_ID)
                    .map_err(wrap_err)?;
                match stmt.query_row([id], row_to_category) {
                    Ok(category) => Ok(Some(category)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn create(&self, name: &str) -> Result<Category> {
        self.require_init()?;

        let name = name.to_string();
        let insert_name = name.clone();
        let id = self
            .conn
            .call(move |conn| {
                conn.execute(schema::INSERT_CATEGORY, [insert_name])
                    .map_err(wrap_err)?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(map_tokio_rusqlite_error)?;

        Ok(Category { id, name })
    }

    async fn update(&self, id: i64, name: &str) -> Result<()> {
        self.require_init()?;

        let name = name.to_string();
        self.conn
            .call(move |conn| {
                conn.execute(schema::UPDATE_CATEGORY, rusqlite::params![id, name])
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.require_init()?;

        self.conn
            .call(move |conn| {
                conn.execute(schema::DELETE_CATEGORY, [id]).map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn clear(&self) -> Result<()> {
        self.require_init()?;

        self.conn
            .call(|conn| {
                conn.execute_batch(schema::DROP_CATEGORIES_TABLE)
                    .map_err(wrap_err)?;
                conn.execute_batch(schema::CREATE_CATEGORIES_TABLE)
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }
}

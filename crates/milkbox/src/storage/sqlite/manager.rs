//! Database manager.
//!
//! Owns the single SQLite connection for the process and hands out
//! repository handles that share it. Bootstrapping runs the category
//! initialization before the item initialization so the foreign-key
//! dependency between the two tables is always satisfied.

use std::sync::Arc;

use tokio_rusqlite::Connection;

use milkbox_core::storage::{CategoryRepository, ItemRepository, RepositoryError, Result};

use crate::config::Config;

use super::category::SqliteCategoryRepository;
use super::error::{map_tokio_rusqlite_error, wrap_err};
use super::item::SqliteItemRepository;
use super::schema;

/// Marker key recording that the database has gone through its first launch.
///
/// Lives in the `meta` table rather than alongside the data tables so it
/// survives [`DatabaseManager::clear_all`].
const FIRST_LAUNCH_KEY: &str = "devDbInitialized";

pub struct DatabaseManager {
    conn: Connection,
    items: Arc<SqliteItemRepository>,
    categories: Arc<SqliteCategoryRepository>,
}

impl DatabaseManager {
    /// Opens (or creates) the database file named by the config and
    /// bootstraps the schema.
    pub async fn open(config: &Config) -> Result<Self> {
        let conn = Connection::open(&config.sqlite_path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;
        tracing::info!(path = %config.sqlite_path, "opened sqlite database");
        Self::bootstrap(conn, config).await
    }

    /// Opens an in-memory database, used by tests and throwaway sessions.
    pub async fn open_in_memory(config: &Config) -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;
        Self::bootstrap(conn, config).await
    }

    async fn bootstrap(conn: Connection, config: &Config) -> Result<Self> {
        let categories = Arc::new(SqliteCategoryRepository::new(conn.clone()));
        let items = Arc::new(SqliteItemRepository::new(conn.clone()));

        // Categories first: the items table references it.
        categories.initialize().await?;
        items.initialize().await?;

        conn.call(|conn| conn.execute_batch(schema::CREATE_META_TABLE).map_err(wrap_err))
            .await
            .map_err(map_tokio_rusqlite_error)?;

        let manager = Self {
            conn,
            items,
            categories,
        };

        if config.reset_on_first_launch && manager.read_meta(FIRST_LAUNCH_KEY).await?.is_none() {
            tracing::warn!("first launch, wiping stored data");
            manager.clear_all().await?;
            manager.write_meta(FIRST_LAUNCH_KEY, "true").await?;
        }

        Ok(manager)
    }

    /// Item repository handle sharing this manager's connection.
    pub fn items(&self) -> Arc<dyn ItemRepository> {
        self.items.clone()
    }

    /// Category repository handle sharing this manager's connection.
    pub fn categories(&self) -> Arc<dyn CategoryRepository> {
        self.categories.clone()
    }

    /// Drops and recreates every data table, items before categories so no
    /// intermediate state has items pointing at a missing categories table.
    /// The `meta` table is left untouched.
    pub async fn clear_all(&self) -> Result<()> {
        self.items.clear().await?;
        self.categories.clear().await?;
        Ok(())
    }

    async fn read_meta(&self, key: &str) -> Result<Option<String>> {
        let key = key.to_string();
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_META).map_err(wrap_err)?;
                match stmt.query_row([key], |row| row.get::<_, String>(0)) {
                    Ok(value) => Ok(Some(value)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn write_meta(&self, key: &str, value: &str) -> Result<()> {
        let key = key.to_string();
        let value = value.to_string();
        self.conn
            .call(move |conn| {
                conn.execute(schema::UPSERT_META, rusqlite::params![key, value])
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }
}

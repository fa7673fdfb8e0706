//! Storage factory.
//!
//! Builds the persistence stack once at startup. Platform selection happens
//! here and nowhere else: native gets the SQLite backend behind a
//! [`DatabaseManager`], web gets the key-value backend.

use std::sync::Arc;

use milkbox_core::kv::KvStore;
use milkbox_core::storage::{CategoryRepository, ItemRepository, Result};

use crate::config::{Config, Platform};
use crate::kv::MemoryKvStore;

use super::kv::KvItemRepository;
use super::sqlite::DatabaseManager;

/// The assembled persistence stack for one app session.
pub struct Storage {
    items: Arc<dyn ItemRepository>,
    categories: Option<Arc<dyn CategoryRepository>>,
    manager: Option<DatabaseManager>,
}

impl Storage {
    /// Builds the backend selected by the config.
    ///
    /// On the web platform the key-value backend is built over an in-process
    /// store; use [`Storage::with_kv_store`] to supply a real one.
    pub async fn from_config(config: &Config) -> Result<Self> {
        match config.platform {
            Platform::Native => Self::open_native(config).await,
            Platform::Web => Self::with_kv_store(config, Arc::new(MemoryKvStore::new())).await,
        }
    }

    /// Builds the key-value backend over the given store, regardless of the
    /// configured platform.
    pub async fn with_kv_store(_config: &Config, store: Arc<dyn KvStore>) -> Result<Self> {
        tracing::info!("storage backend: key-value");
        let items = KvItemRepository::new(store);
        items.initialize().await?;
        Ok(Self {
            items: Arc::new(items),
            categories: None,
            manager: None,
        })
    }

    async fn open_native(config: &Config) -> Result<Self> {
        tracing::info!("storage backend: sqlite");
        let manager = DatabaseManager::open(config).await?;
        Ok(Self {
            items: manager.items(),
            categories: Some(manager.categories()),
            manager: Some(manager),
        })
    }

    pub fn items(&self) -> Arc<dyn ItemRepository> {
        self.items.clone()
    }

    /// Category repository, present only on backends that store categories.
    pub fn categories(&self) -> Option<Arc<dyn CategoryRepository>> {
        self.categories.clone()
    }

    /// The database manager, present only on the SQLite backend.
    pub fn manager(&self) -> Option<&DatabaseManager> {
        self.manager.as_ref()
    }
}

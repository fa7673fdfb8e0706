//! Key-value item repository.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use milkbox_core::item::{Item, ItemPatch, NewItem};
use milkbox_core::kv::{KvError, KvStore, ITEMS_KEY};
use milkbox_core::storage::{ItemRepository, RepositoryError, Result};

fn kv_to_repo(err: KvError) -> RepositoryError {
    match err {
        KvError::ConnectionFailed(msg) => RepositoryError::ConnectionFailed(msg),
        KvError::OperationFailed(msg) => RepositoryError::QueryFailed(msg),
    }
}

/// Item repository storing the whole collection as a JSON array under
/// [`ITEMS_KEY`].
///
/// Every mutation is a read-modify-write of the full document with no
/// locking across callers; concurrent writers can lose updates. The backing
/// stores this targets are effectively single-client, so the simplicity is
/// worth it.
pub struct KvItemRepository {
    store: Arc<dyn KvStore>,
    initialized: AtomicBool,
}

impl KvItemRepository {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            store,
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

    async fn read_items(&self) -> Result<Vec<Item>> {
        match self.store.get(ITEMS_KEY).await.map_err(kv_to_repo)? {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| RepositoryError::Serialization(e.to_string())),
            None => Ok(Vec::new()),
        }
    }

    async fn write_items(&self, items: &[Item]) -> Result<()> {
        let json = serde_json::to_string(items)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        self.store.set(ITEMS_KEY, &json).await.map_err(kv_to_repo)
    }
}

#[async_trait]
impl ItemRepository for KvItemRepository {
    /// No tables to create; verifies the store answers before accepting work.
    async fn initialize(&self) -> Result<()> {
        self.store.get(ITEMS_KEY).await.map_err(kv_to_repo)?;
        self.initialized.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Item>> {
        self.require_init()?;
        self.read_items().await
    }

    /// Category names are not stored in this backend, so items come back
    /// with whatever `categoryName` the document holds, usually none.
    async fn find_all_with_category(&self) -> Result<Vec<Item>> {
        self.require_init()?;
        self.read_items().await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Item>> {
        self.require_init()?;
        let items = self.read_items().await?;
        Ok(items.into_iter().find(|item| item.id == id))
    }

    async fn create(&self, new_item: NewItem) -> Result<Item> {
        self.require_init()?;

        let mut items = self.read_items().await?;

        // Millisecond timestamps as ids, bumped past any collision from
        // back-to-back creates in the same millisecond.
        let mut id = Utc::now().timestamp_millis();
        while items.iter().any(|item| item.id == id) {
            id += 1;
        }

        let item = Item {
            id,
            category_id: new_item.category_id,
            text: new_item.text,
            date: new_item.date.unwrap_or_else(Utc::now),
            start_date: new_item.start_date,
            end_date: new_item.end_date,
            category_name: None,
        };

        // Newest first
        items.insert(0, item.clone());
        self.write_items(&items).await?;

        Ok(item)
    }

    async fn update(&self, id: i64, patch: ItemPatch) -> Result<()> {
        self.require_init()?;

        let Some(text) = patch.text else {
            return Ok(());
        };

        let mut items = self.read_items().await?;
        match items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.text = text;
                self.write_items(&items).await
            }
            None => Ok(()),
        }
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.require_init()?;

        let mut items = self.read_items().await?;
        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            return Ok(());
        }
        self.write_items(&items).await
    }

    async fn delete_by_category(&self, category_id: i64) -> Result<()> {
        self.require_init()?;

        let mut items = self.read_items().await?;
        let before = items.len();
        items.retain(|item| item.category_id != Some(category_id));
        if items.len() == before {
            return Ok(());
        }
        self.write_items(&items).await
    }

    async fn clear(&self) -> Result<()> {
        self.require_init()?;
        self.store.remove(ITEMS_KEY).await.map_err(kv_to_repo)
    }
}

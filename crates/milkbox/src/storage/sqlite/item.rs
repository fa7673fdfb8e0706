//! SQLite item repository.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::OptionalExtension;
use tokio_rusqlite::Connection;

use milkbox_core::item::{Item, ItemPatch, NewItem};
use milkbox_core::storage::{ItemRepository, RepositoryError, Result};

use super::conversions::{format_datetime, row_to_item, row_to_item_with_category};
use super::error::{map_tokio_rusqlite_error, wrap_err};
use super::schema;

/// Item repository backed by the embedded SQLite database.
///
/// Holds a handle to the connection owned by the
/// [`DatabaseManager`](super::DatabaseManager), which constructs this
/// repository and sequences its initialization after the category table
/// exists.
pub struct SqliteItemRepository {
    conn: Connection,
    initialized: AtomicBool,
}

impl SqliteItemRepository {
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
impl ItemRepository for SqliteItemRepository {
    /// Creates the items table if absent.
    ///
    /// The table declares a foreign key on `categories`, so the categories
    /// table must already exist; the call is rejected otherwise instead of
    /// leaving a half-valid schema behind.
    async fn initialize(&self) -> Result<()> {
        let categories_exist = self
            .conn
            .call(|conn| {
                let exists = conn
                    .query_row(schema::TABLE_EXISTS, ["categories"], |_| Ok(()))
                    .optional()
                    .map_err(wrap_err)?
                    .is_some();
                if exists {
                    conn.execute_batch(schema::CREATE_ITEMS_TABLE)
                        .map_err(wrap_err)?;
                }
                Ok(exists)
            })
            .await
            .map_err(map_tokio_rusqlite_error)?;

        if !categories_exist {
            return Err(RepositoryError::InvalidData(
                "items table references categories; initialize the category repository first"
                    .to_string(),
            ));
        }

        self.initialized.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Item>> {
        self.require_init()?;

        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_ALL_ITEMS).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_item).map_err(wrap_err)?;

                let mut items = Vec::new();
                for row_result in rows {
                    items.push(row_result.map_err(wrap_err)?);
                }
                Ok(items)
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn find_all_with_category(&self) -> Result<Vec<Item>> {
        self.require_init()?;

        self.conn
            .call(|conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_ITEMS_WITH_CATEGORY)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map([], row_to_item_with_category)
                    .map_err(wrap_err)?;

                let mut items = Vec::new();
                for row_result in rows {
                    items.push(row_result.map_err(wrap_err)?);
                }
                Ok(items)
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Item>> {
        self.require_init()?;

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_ITEM_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([id], row_to_item) {
                    Ok(item) => Ok(Some(item)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn create(&self, new_item: NewItem) -> Result<Item> {
        self.require_init()?;

        let date = new_item.date.unwrap_or_else(Utc::now);
        let category_id = new_item.category_id;
        let text = new_item.text;
        let start_date = new_item.start_date;
        let end_date = new_item.end_date;

        let insert_text = text.clone();
        let id = self
            .conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_ITEM,
                    rusqlite::params![
                        category_id,
                        insert_text,
                        format_datetime(&date),
                        start_date.as_ref().map(format_datetime),
                        end_date.as_ref().map(format_datetime),
                    ],
                )
                .map_err(wrap_err)?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(map_tokio_rusqlite_error)?;

        Ok(Item {
            id,
            category_id,
            text,
            date,
            start_date,
            end_date,
            category_name: None,
        })
    }

    async fn update(&self, id: i64, patch: ItemPatch) -> Result<()> {
        self.require_init()?;

        // Text is the only mutable field; an empty patch is a no-op.
        let Some(text) = patch.text else {
            return Ok(());
        };

        self.conn
            .call(move |conn| {
                conn.execute(schema::UPDATE_ITEM_TEXT, rusqlite::params![id, text])
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
                conn.execute(schema::DELETE_ITEM, [id]).map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn delete_by_category(&self, category_id: i64) -> Result<()> {
        self.require_init()?;

        self.conn
            .call(move |conn| {
                conn.execute(schema::DELETE_ITEMS_BY_CATEGORY, [category_id])
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    /// Drops and recreates the items table.
    ///
    /// The two statements are not wrapped in a transaction; a crash between
    /// them leaves the table missing until the next `clear` or `initialize`.
    async fn clear(&self) -> Result<()> {
        self.require_init()?;

        self.conn
            .call(|conn| {
                conn.execute_batch(schema::DROP_ITEMS_TABLE)
                    .map_err(wrap_err)?;
                conn.execute_batch(schema::CREATE_ITEMS_TABLE)
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sqlite::SqliteCategoryRepository;
    use chrono::TimeZone;
    use milkbox_core::storage::CategoryRepository;

    async fn repos() -> (SqliteItemRepository, SqliteCategoryRepository) {
        let conn = Connection::open_in_memory().await.unwrap();
        let categories = SqliteCategoryRepository::new(conn.clone());
        let items = SqliteItemRepository::new(conn);
        categories.initialize().await.unwrap();
        items.initialize().await.unwrap();
        (items, categories)
    }

    #[tokio::test]
    async fn test_initialize_rejected_without_categories_table() {
        let conn = Connection::open_in_memory().await.unwrap();
        let items = SqliteItemRepository::new(conn);

        let result = items.initialize().await;
        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));

        // The failed initialize must not unlock the repository
        let result = items.find_all().await;
        assert!(matches!(result, Err(RepositoryError::Uninitialized)));
    }

    #[tokio::test]
    async fn test_operations_before_initialize_fail() {
        let conn = Connection::open_in_memory().await.unwrap();
        let items = SqliteItemRepository::new(conn);

        assert!(matches!(
            items.find_by_id(1).await,
            Err(RepositoryError::Uninitialized)
        ));
        assert!(matches!(
            items.create(NewItem::new("x")).await,
            Err(RepositoryError::Uninitialized)
        ));
        assert!(matches!(
            items.delete(1).await,
            Err(RepositoryError::Uninitialized)
        ));
    }

    #[tokio::test]
    async fn test_create_and_find_by_id() {
        let (items, categories) = repos().await;
        let category = categories.create("Work").await.unwrap();

        let created = items
            .create(NewItem::new("Write report").with_category(category.id))
            .await
            .unwrap();

        let found = items.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.text, "Write report");
        assert_eq!(found.category_id, Some(category.id));
        assert_eq!(found.date, created.date);
    }

    #[tokio::test]
    async fn test_create_stamps_date_when_absent() {
        let (items, categories) = repos().await;
        let category = categories.create("Work").await.unwrap();

        let before = Utc::now();
        let created = items
            .create(NewItem::new("now").with_category(category.id))
            .await
            .unwrap();

        assert!(created.date >= before);
        assert!(created.date <= Utc::now());
    }

    #[tokio::test]
    async fn test_create_keeps_explicit_dates() {
        let (items, categories) = repos().await;
        let category = categories.create("Work").await.unwrap();
        let start = Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 6, 16, 17, 0, 0).unwrap();

        let created = items
            .create(
                NewItem::new("trip")
                    .with_category(category.id)
                    .with_date(start)
                    .with_start_date(start)
                    .with_end_date(end),
            )
            .await
            .unwrap();

        let found = items.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.date, start);
        assert_eq!(found.start_date, Some(start));
        assert_eq!(found.end_date, Some(end));
    }

    #[tokio::test]
    async fn test_create_without_category_is_rejected() {
        // categoryId is NOT NULL in the schema
        let (items, _categories) = repos().await;

        let result = items.create(NewItem::new("orphan")).await;
        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
    }

    #[tokio::test]
    async fn test_find_by_id_missing_is_none() {
        let (items, _categories) = repos().await;
        assert_eq!(items.find_by_id(999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_find_all_is_newest_first() {
        let (items, categories) = repos().await;
        let category = categories.create("Work").await.unwrap();

        let first = items
            .create(NewItem::new("first").with_category(category.id))
            .await
            .unwrap();
        let second = items
            .create(NewItem::new("second").with_category(category.id))
            .await
            .unwrap();

        let all = items.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
    }

    #[tokio::test]
    async fn test_update_changes_only_text() {
        let (items, categories) = repos().await;
        let category = categories.create("Work").await.unwrap();
        let created = items
            .create(NewItem::new("before").with_category(category.id))
            .await
            .unwrap();

        items
            .update(created.id, ItemPatch::text("after"))
            .await
            .unwrap();

        let found = items.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.text, "after");
        assert_eq!(found.category_id, created.category_id);
        assert_eq!(found.date, created.date);
        assert_eq!(found.start_date, created.start_date);
        assert_eq!(found.end_date, created.end_date);
    }

    #[tokio::test]
    async fn test_update_without_text_is_noop() {
        let (items, categories) = repos().await;
        let category = categories.create("Work").await.unwrap();
        let created = items
            .create(NewItem::new("unchanged").with_category(category.id))
            .await
            .unwrap();

        items.update(created.id, ItemPatch::default()).await.unwrap();

        let found = items.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.text, "unchanged");
    }

    #[tokio::test]
    async fn test_update_missing_id_is_noop() {
        let (items, _categories) = repos().await;
        items.update(999, ItemPatch::text("ghost")).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_then_find_is_none() {
        let (items, categories) = repos().await;
        let category = categories.create("Work").await.unwrap();
        let created = items
            .create(NewItem::new("gone").with_category(category.id))
            .await
            .unwrap();

        items.delete(created.id).await.unwrap();

        assert_eq!(items.find_by_id(created.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_noop() {
        let (items, _categories) = repos().await;
        items.delete(999).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_by_category_removes_exactly_that_category() {
        let (items, categories) = repos().await;
        let work = categories.create("Work").await.unwrap();
        let home = categories.create("Home").await.unwrap();

        items
            .create(NewItem::new("report").with_category(work.id))
            .await
            .unwrap();
        items
            .create(NewItem::new("meeting").with_category(work.id))
            .await
            .unwrap();
        let kept = items
            .create(NewItem::new("dishes").with_category(home.id))
            .await
            .unwrap();

        items.delete_by_category(work.id).await.unwrap();

        let all = items.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, kept.id);
    }

    #[tokio::test]
    async fn test_find_all_with_category_resolves_names() {
        let (items, categories) = repos().await;
        let work = categories.create("Work").await.unwrap();

        items
            .create(NewItem::new("Write report").with_category(work.id))
            .await
            .unwrap();

        let all = items.find_all_with_category().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].category_name.as_deref(), Some("Work"));
    }

    #[tokio::test]
    async fn test_deleted_category_leaves_item_with_no_name() {
        let (items, categories) = repos().await;
        let work = categories.create("Work").await.unwrap();
        let created = items
            .create(NewItem::new("Write report").with_category(work.id))
            .await
            .unwrap();

        // Delete the category without deleting its items first
        categories.delete(work.id).await.unwrap();

        let all = items.find_all_with_category().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, created.id);
        assert_eq!(all[0].category_name, None);
    }

    #[tokio::test]
    async fn test_with_category_orders_by_name_then_id_desc() {
        let (items, categories) = repos().await;
        let work = categories.create("Work").await.unwrap();
        let home = categories.create("Home").await.unwrap();

        let w1 = items
            .create(NewItem::new("w1").with_category(work.id))
            .await
            .unwrap();
        let h1 = items
            .create(NewItem::new("h1").with_category(home.id))
            .await
            .unwrap();
        let w2 = items
            .create(NewItem::new("w2").with_category(work.id))
            .await
            .unwrap();

        let all = items.find_all_with_category().await.unwrap();
        let ids: Vec<i64> = all.iter().map(|i| i.id).collect();
        // "Home" sorts before "Work"; within a category newest first
        assert_eq!(ids, vec![h1.id, w2.id, w1.id]);
    }

    #[tokio::test]
    async fn test_clear_empties_items() {
        let (items, categories) = repos().await;
        let category = categories.create("Work").await.unwrap();
        items
            .create(NewItem::new("wiped").with_category(category.id))
            .await
            .unwrap();

        items.clear().await.unwrap();

        assert!(items.find_all().await.unwrap().is_empty());
        // Table is recreated, not just emptied
        items
            .create(NewItem::new("fresh").with_category(category.id))
            .await
            .unwrap();
    }
}

use async_trait::async_trait;

use crate::item::{Category, Item, ItemPatch, NewItem};

use super::Result;

/// Repository for item operations.
///
/// Every operation other than `initialize` fails with
/// [`RepositoryError::Uninitialized`](super::RepositoryError::Uninitialized)
/// until `initialize` has completed.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Prepares the backend (idempotent). Must be called before anything else.
    async fn initialize(&self) -> Result<()>;

    /// Gets all items, newest first.
    async fn find_all(&self) -> Result<Vec<Item>>;

    /// Gets all items with their category name resolved, ordered by
    /// category name then item id descending. `category_name` is `None`
    /// when no matching category exists.
    async fn find_all_with_category(&self) -> Result<Vec<Item>>;

    /// Gets an item by its id. A missing item is `Ok(None)`.
    async fn find_by_id(&self, id: i64) -> Result<Option<Item>>;

    /// Creates a new item and returns it with its assigned id and
    /// stamped creation date.
    async fn create(&self, new_item: NewItem) -> Result<Item>;

    /// Updates an existing item. Only the text can change; a patch
    /// without text is a no-op, as is a missing id.
    async fn update(&self, id: i64, patch: ItemPatch) -> Result<()>;

    /// Deletes an item by its id. Missing ids are a silent no-op.
    async fn delete(&self, id: i64) -> Result<()>;

    /// Deletes every item referencing the given category.
    async fn delete_by_category(&self, category_id: i64) -> Result<()>;

    /// Destroys and recreates the item storage. Development-time reset only.
    async fn clear(&self) -> Result<()>;
}

/// Repository for category operations.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Prepares the backend (idempotent). Must be called before anything else.
    async fn initialize(&self) -> Result<()>;

    /// Gets all categories, oldest first.
    async fn find_all(&self) -> Result<Vec<Category>>;

    /// Gets a category by its id. A missing category is `Ok(None)`.
    async fn find_by_id(&self, id: i64) -> Result<Option<Category>>;

    /// Creates a new category and returns it with its assigned id.
    async fn create(&self, name: &str) -> Result<Category>;

    /// Renames an existing category. Missing ids are a silent no-op.
    async fn update(&self, id: i64, name: &str) -> Result<()>;

    /// Deletes a category by its id. Items referencing it are NOT deleted;
    /// call [`ItemRepository::delete_by_category`] first if that is wanted.
    async fn delete(&self, id: i64) -> Result<()>;

    /// Destroys and recreates the category storage. Development-time reset only.
    async fn clear(&self) -> Result<()>;
}

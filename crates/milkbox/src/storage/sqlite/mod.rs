//! SQLite storage backend.
//!
//! Implements the repository traits from `milkbox_core::storage` using
//! `rusqlite` behind `tokio-rusqlite`'s connection handle. The
//! [`DatabaseManager`] owns the connection and sequences table creation so
//! the foreign-key dependency of items on categories is respected.

mod category;
mod conversions;
mod error;
mod item;
mod manager;
mod schema;

pub use category::SqliteCategoryRepository;
pub use item::SqliteItemRepository;
pub use manager::DatabaseManager;

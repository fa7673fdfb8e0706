//! Storage backend implementations.
//!
//! Concrete implementations of the repository traits defined in
//! `milkbox_core::storage`:
//!
//! - [`sqlite`] - embedded SQLite backend for native platforms, coordinated
//!   by a [`DatabaseManager`](sqlite::DatabaseManager) that owns the single
//!   connection for the process lifetime
//! - [`kv`] - whole-collection key-value backend for the web platform
//!
//! The backend is selected once at startup via
//! [`Storage::from_config`](factory::Storage::from_config); shared logic
//! never branches on the platform.

pub mod factory;
pub mod kv;
pub mod sqlite;

pub use kv::KvItemRepository;
pub use sqlite::{DatabaseManager, SqliteCategoryRepository, SqliteItemRepository};

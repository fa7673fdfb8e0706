//! Local persistence backends for the milkbox note-taking app.
//!
//! Two backends implement the repository traits from
//! [`milkbox_core::storage`]: an embedded SQLite store for native platforms
//! and a whole-collection key-value store for the web. The
//! [`DatabaseManager`] owns the SQLite connection for the process lifetime
//! and [`Storage`] selects the backend once at startup from [`Config`].

pub mod config;
pub mod kv;
pub mod storage;

pub use config::{Config, Platform};
pub use storage::factory::Storage;
pub use storage::sqlite::DatabaseManager;

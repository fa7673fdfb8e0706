//! Key-value storage backend.
//!
//! Persists the whole item collection as one JSON document under a single
//! key, for platforms without an embedded database.

mod repository;

pub use repository::KvItemRepository;

//! Key-value store key constants.
//!
//! The key-value backend keeps the entire item collection under one fixed
//! key; the name is part of the persisted format and must not change.

/// Storage key holding the JSON array of saved items.
pub const ITEMS_KEY: &str = "@milkbox_items";

//! Core types and storage contracts for the milkbox project.
//!
//! This crate holds the pure, I/O-free half of the persistence layer: the
//! item and category entities, the repository traits a storage backend must
//! satisfy, and the generic key-value store contract the web backend is
//! built on. Concrete backends live in the `milkbox` crate.

pub mod item;
pub mod kv;
pub mod storage;

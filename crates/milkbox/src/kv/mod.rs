//! Key-value store implementations.
//!
//! Concrete implementations of the [`milkbox_core::kv::KvStore`] trait.
//! Only an in-process store ships here; a browser embedding supplies its
//! own adapter over the platform's storage facility.

mod memory;

pub use memory::MemoryKvStore;

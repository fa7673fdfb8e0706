use async_trait::async_trait;

use super::Result;

/// Generic asynchronous key-value store.
///
/// The web platform's storage facility reduced to the three operations the
/// persistence layer needs. Values are opaque strings; callers decide the
/// encoding (the item backend stores JSON).
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Gets the value stored under `key`, or `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key` and its value. Missing keys are a no-op.
    async fn remove(&self, key: &str) -> Result<()>;
}

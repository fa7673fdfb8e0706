mod error;
mod keys;
mod traits;

pub use error::{KvError, Result};
pub use keys::ITEMS_KEY;
pub use traits::KvStore;

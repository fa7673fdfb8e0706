mod grouping;
mod types;

pub use grouping::{group_by_category, CategorySection};
pub use types::{Category, Item, ItemPatch, NewItem};

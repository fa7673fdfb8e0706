//! Pure grouping helpers for category-sectioned item lists.
//!
//! The UI renders items grouped by category name; this is the shared,
//! I/O-free implementation of that grouping.

use super::Item;

/// A titled section of items belonging to one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySection {
    pub title: String,
    pub items: Vec<Item>,
}

/// Section title used for items without a resolved category name.
const UNKNOWN_CATEGORY: &str = "Unknown";

/// Groups items into sections keyed by their denormalized category name.
///
/// Items without a `category_name` land in an "Unknown" section. Section
/// order follows first encounter, so a list ordered by category name
/// produces sections in that same order.
pub fn group_by_category(items: Vec<Item>) -> Vec<CategorySection> {
    let mut sections: Vec<CategorySection> = Vec::new();

    for item in items {
        let title = item
            .category_name
            .clone()
            .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());

        match sections.iter_mut().find(|section| section.title == title) {
            Some(section) => section.items.push(item),
            None => sections.push(CategorySection {
                title,
                items: vec![item],
            }),
        }
    }

    sections
}

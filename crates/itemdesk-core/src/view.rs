//! Filtered, category-grouped view over the item collection.

use crate::models::Item;

/// One category heading and the items under it, in collection order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    pub items: Vec<&'a Item>,
}

/// Does `item` match an already-lowercased filter?
fn matches(item: &Item, needle: &str) -> bool {
    needle.is_empty()
        || item.name.to_lowercase().contains(needle)
        || item.category.to_lowercase().contains(needle)
}

/// Select items whose name or category contains `filter` (case-insensitive)
/// and group them by exact category.
///
/// Groups come out in the order their first matching member appears in
/// `items`, and members keep their relative order. Nothing is cached; the
/// whole thing is recomputed on every call.
pub fn visible_groups<'a>(items: &'a [Item], filter: &str) -> Vec<CategoryGroup<'a>> {
    let needle = filter.to_lowercase();
    let mut groups: Vec<CategoryGroup<'a>> = Vec::new();

    for item in items.iter().filter(|item| matches(item, &needle)) {
        // Linear scan over groups; category counts stay small
        match groups.iter_mut().find(|g| g.category == item.category) {
            Some(group) => group.items.push(item),
            None => groups.push(CategoryGroup {
                category: &item.category,
                items: vec![item],
            }),
        }
    }

    groups
}

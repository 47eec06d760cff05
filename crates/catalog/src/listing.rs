//! Static, read-only item listing used by the pagination endpoint.

use serde::Serialize;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct ListedItem {
    pub item_name: &'static str,
}

pub static LISTING: [ListedItem; 3] = [
    ListedItem { item_name: "Foo" },
    ListedItem { item_name: "Bar" },
    ListedItem { item_name: "Baz" },
];

/// Items `[skip, skip + limit)` with slice semantics: a negative bound counts
/// back from the end, and bounds past either end are clamped.
pub fn page(skip: i64, limit: i64) -> &'static [ListedItem] {
    let start = clamp_index(skip);
    let end = clamp_index(skip.saturating_add(limit));
    if start >= end {
        return &[];
    }
    &LISTING[start..end]
}

fn clamp_index(index: i64) -> usize {
    let len = LISTING.len() as i64;
    let index = if index < 0 { index.saturating_add(len) } else { index };
    index.clamp(0, len) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[ListedItem]) -> Vec<&'static str> {
        items.iter().map(|i| i.item_name).collect()
    }

    #[test]
    fn default_window_returns_everything() {
        assert_eq!(names(page(0, 10)), vec!["Foo", "Bar", "Baz"]);
    }

    #[test]
    fn single_item_window() {
        assert_eq!(names(page(1, 1)), vec!["Bar"]);
    }

    #[test]
    fn out_of_range_is_empty() {
        assert!(page(5, 10).is_empty());
        assert!(page(0, 0).is_empty());
        assert_eq!(names(page(2, i64::MAX)), vec!["Baz"]);
    }

    #[test]
    fn negative_bounds_count_from_the_end() {
        assert_eq!(names(page(-1, 10)), vec!["Baz"]);
        assert_eq!(names(page(0, -1)), vec!["Foo", "Bar"]);
        assert_eq!(names(page(-10, 2)), Vec::<&str>::new());
        assert_eq!(names(page(-10, 12)), vec!["Foo", "Bar"]);
        assert!(page(1, -5).is_empty());
        assert!(page(i64::MIN, i64::MIN).is_empty());
    }
}

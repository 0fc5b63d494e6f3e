//! Pure merge functions for the feed and the source registry.
//!
//! Both merges de-duplicate in a single pass that keeps the **first**
//! occurrence of every key, so precedence is decided purely by concatenation
//! order:
//!
//! * [`merge_items`] puts freshly fetched items first, so fresh copies win.
//! * [`merge_sources`] puts existing sources first, so configured sources win
//!   over rediscovered ones.

use std::collections::HashSet;
use std::hash::Hash;

use crate::source::{FeedItem, NewsSource};

/// Keep the first element of `iter` for every distinct key, preserving order.
fn first_by_key<T, K, F>(iter: impl IntoIterator<Item = T>, mut key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut seen = HashSet::new();
    iter.into_iter().filter(|item| seen.insert(key(item))).collect()
}

/// Merge a fetched batch into the previously published feed.
///
/// Returns the new feed: de-duplicated by [`FeedItem::id`] with the fresh copy
/// winning, then stably sorted newest first.  Callers skip the merge entirely
/// when `fresh` is empty.
pub fn merge_items(previous: &[FeedItem], fresh: Vec<FeedItem>) -> Vec<FeedItem> {
    let combined = fresh.into_iter().chain(previous.iter().cloned());
    let mut items = first_by_key(combined, |item| item.id.clone());
    items.sort(); // uses Ord impl (reverse-chronological), stable
    items
}

/// Merge incoming sources into the registry, keyed by [`NewsSource::url`].
///
/// Existing entries keep their configuration; only unseen urls are appended,
/// in the order they arrive.
pub fn merge_sources(existing: &[NewsSource], incoming: Vec<NewsSource>) -> Vec<NewsSource> {
    let combined = existing.iter().cloned().chain(incoming);
    first_by_key(combined, |source| source.url.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn item(id: &str, title: &str, (y, m, d): (i32, u32, u32)) -> FeedItem {
        FeedItem {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            link: None,
            published: Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap(),
            source_name: "test".to_string(),
        }
    }

    fn ids(items: &[FeedItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    fn assert_feed_invariants(items: &[FeedItem]) {
        let unique: HashSet<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(unique.len(), items.len(), "duplicate identity in {:?}", ids(items));
        assert!(
            items.windows(2).all(|w| w[0].published >= w[1].published),
            "not newest first: {:?}",
            ids(items)
        );
    }

    // -- merge_items ---------------------------------------------------------

    #[test]
    fn newer_fetched_item_goes_first() {
        let previous = vec![item("a", "A", (2024, 1, 1))];
        let merged = merge_items(&previous, vec![item("b", "B", (2024, 1, 2))]);
        assert_eq!(ids(&merged), ["b", "a"]);
    }

    #[test]
    fn fetched_copy_replaces_stored_copy() {
        let previous = vec![item("a", "Old", (2024, 1, 1))];
        let merged = merge_items(&previous, vec![item("a", "New", (2024, 1, 3))]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].title, "New");
        assert_eq!(merged[0].published, Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap());
    }

    #[test]
    fn fresh_copy_wins_even_with_an_older_date() {
        let previous = vec![item("a", "Stored", (2024, 5, 1))];
        let merged = merge_items(&previous, vec![item("a", "Fetched", (2024, 1, 1))]);
        assert_eq!(merged[0].title, "Fetched");
    }

    #[test]
    fn duplicates_within_one_batch_keep_the_first() {
        let merged = merge_items(
            &[],
            vec![item("x", "First", (2024, 1, 1)), item("x", "Second", (2024, 1, 2))],
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].title, "First");
    }

    #[test]
    fn empty_previous_yields_sorted_fresh_items() {
        let merged = merge_items(
            &[],
            vec![
                item("1", "Old", (2024, 1, 1)),
                item("3", "New", (2026, 1, 1)),
                item("2", "Mid", (2025, 6, 1)),
            ],
        );
        assert_eq!(ids(&merged), ["3", "2", "1"]);
    }

    #[test]
    fn ties_keep_fresh_items_ahead_of_stored_ones() {
        let previous = vec![item("stored", "S", (2024, 1, 1))];
        let merged = merge_items(&previous, vec![item("fresh", "F", (2024, 1, 1))]);
        assert_eq!(ids(&merged), ["fresh", "stored"]);
    }

    #[test]
    fn repeated_merges_preserve_invariants() {
        let mut feed: Vec<FeedItem> = Vec::new();
        let batches = [
            vec![item("a", "A", (2024, 1, 5)), item("b", "B", (2024, 1, 1))],
            vec![item("c", "C", (2024, 1, 3)), item("a", "A2", (2024, 1, 2))],
            vec![item("b", "B2", (2024, 1, 9)), item("d", "D", (2024, 1, 3))],
        ];
        for batch in batches {
            feed = merge_items(&feed, batch);
            assert_feed_invariants(&feed);
        }
        assert_eq!(ids(&feed), ["b", "d", "c", "a"]);
        assert_eq!(feed[3].title, "A2");
    }

    // -- merge_sources -------------------------------------------------------

    #[test]
    fn existing_source_wins_over_discovered_duplicate() {
        let existing = vec![NewsSource::new("x", "Mine").with_category("custom")];
        let merged = merge_sources(
            &existing,
            vec![NewsSource::new("x", "Discovered"), NewsSource::new("y", "Y")],
        );

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0], existing[0]);
        assert_eq!(merged[1].url, "y");
    }

    #[test]
    fn new_sources_append_in_arrival_order() {
        let merged = merge_sources(
            &[NewsSource::new("a", "A")],
            vec![NewsSource::new("c", "C"), NewsSource::new("b", "B"), NewsSource::new("c", "C2")],
        );
        let urls: Vec<&str> = merged.iter().map(|s| s.url.as_str()).collect();
        assert_eq!(urls, ["a", "c", "b"]);
        assert_eq!(merged[1].name, "C");
    }

    #[test]
    fn merging_nothing_is_identity() {
        let existing = vec![NewsSource::new("a", "A"), NewsSource::new("b", "B")];
        assert_eq!(merge_sources(&existing, Vec::new()), existing);
    }
}

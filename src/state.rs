//! The state record published to consumers.
//!
//! [`FeedState`] is the whole observable surface of the aggregator: the feed,
//! the source registry, and the operation flags.  The service publishes it
//! over a `tokio::sync::watch` channel and applies every transition below in
//! a single write, so readers never see half of an operation's flag changes.
//!
//! Transition points:
//!
//! | operation | start               | end (always)                         |
//! |-----------|---------------------|--------------------------------------|
//! | refresh   | [`begin_refresh`]   | [`finish_refresh`] clears `loading`  |
//! | discovery | [`try_begin_discovery`] | [`finish_discovery`] clears `discovering` |
//!
//! [`begin_refresh`]: FeedState::begin_refresh
//! [`finish_refresh`]: FeedState::finish_refresh
//! [`try_begin_discovery`]: FeedState::try_begin_discovery
//! [`finish_discovery`]: FeedState::finish_discovery

use chrono::{DateTime, Utc};

use crate::merge::merge_sources;
use crate::source::{FeedItem, NewsSource};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedState {
    /// De-duplicated, reverse-chronological items.
    pub items: Vec<FeedItem>,
    /// The source registry; urls are unique.
    pub sources: Vec<NewsSource>,
    /// A refresh cycle is fetching.
    pub loading: bool,
    /// User-facing message of the last failed refresh.
    pub error: Option<String>,
    /// When the feed last changed through a successful refresh.
    pub last_update: Option<DateTime<Utc>>,
    /// A discovery run is in flight.
    pub discovering: bool,
}

/// How a refresh cycle ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshResult {
    /// The merged feed replaces the current one.
    Published {
        items: Vec<FeedItem>,
        at: DateTime<Utc>,
    },
    /// Nothing new was fetched; the feed stays as it is.
    Unchanged,
    /// The fetch failed with this user-facing message.
    Failed(String),
}

impl FeedState {
    /// Seed state before the first fetch.  Duplicate source urls are dropped,
    /// first one wins.
    pub fn new(items: Vec<FeedItem>, sources: Vec<NewsSource>) -> Self {
        Self {
            items,
            sources: merge_sources(&[], sources),
            ..Self::default()
        }
    }

    pub fn begin_refresh(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn finish_refresh(&mut self, result: RefreshResult) {
        match result {
            RefreshResult::Published { items, at } => {
                self.items = items;
                self.last_update = Some(at);
            }
            RefreshResult::Unchanged => {}
            RefreshResult::Failed(message) => self.error = Some(message),
        }
        self.loading = false;
    }

    /// Mark discovery as running.  Returns `false`, changing nothing, when a
    /// run is already in flight.
    pub fn try_begin_discovery(&mut self) -> bool {
        if self.discovering {
            return false;
        }
        self.discovering = true;
        true
    }

    /// End a discovery run, merging `found` into the registry when the run
    /// succeeded.  Returns how many sources were added.
    pub fn finish_discovery(&mut self, found: Option<Vec<NewsSource>>) -> usize {
        self.discovering = false;
        let Some(found) = found else {
            return 0;
        };
        let before = self.sources.len();
        self.sources = merge_sources(&self.sources, found);
        self.sources.len() - before
    }

    /// Replace the registry wholesale, keeping urls unique.
    pub fn replace_sources(&mut self, sources: Vec<NewsSource>) {
        self.sources = merge_sources(&[], sources);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn item(id: &str) -> FeedItem {
        FeedItem {
            id: id.to_string(),
            title: id.to_string(),
            description: None,
            link: None,
            published: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            source_name: "test".to_string(),
        }
    }

    #[test]
    fn new_state_is_idle_and_dedups_sources() {
        let state = FeedState::new(
            vec![item("seed")],
            vec![NewsSource::new("x", "First"), NewsSource::new("x", "Second")],
        );
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.sources, vec![NewsSource::new("x", "First")]);
        assert!(!state.loading && !state.discovering);
        assert!(state.error.is_none() && state.last_update.is_none());
    }

    #[test]
    fn begin_refresh_sets_loading_and_clears_error() {
        let mut state = FeedState {
            error: Some("old".into()),
            ..FeedState::default()
        };
        state.begin_refresh();
        assert!(state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn published_refresh_swaps_items_and_stamps_time() {
        let at = Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap();
        let mut state = FeedState::new(vec![item("old")], vec![]);
        state.begin_refresh();
        state.finish_refresh(RefreshResult::Published {
            items: vec![item("new")],
            at,
        });

        assert_eq!(state.items, vec![item("new")]);
        assert_eq!(state.last_update, Some(at));
        assert!(!state.loading);
    }

    #[test]
    fn unchanged_refresh_only_clears_loading() {
        let mut state = FeedState::new(vec![item("keep")], vec![]);
        let before = state.clone();
        state.begin_refresh();
        state.finish_refresh(RefreshResult::Unchanged);
        assert_eq!(state, before);
    }

    #[test]
    fn failed_refresh_keeps_items_and_sets_error() {
        let mut state = FeedState::new(vec![item("keep")], vec![]);
        state.begin_refresh();
        state.finish_refresh(RefreshResult::Failed("boom".into()));

        assert_eq!(state.items, vec![item("keep")]);
        assert_eq!(state.error.as_deref(), Some("boom"));
        assert!(state.last_update.is_none());
        assert!(!state.loading);
    }

    #[test]
    fn discovery_guard_rejects_second_start() {
        let mut state = FeedState::default();
        assert!(state.try_begin_discovery());
        assert!(!state.try_begin_discovery());
        assert!(state.discovering);
    }

    #[test]
    fn finish_discovery_merges_and_counts_additions() {
        let mut state = FeedState::new(vec![], vec![NewsSource::new("x", "Original")]);
        assert!(state.try_begin_discovery());

        let added = state.finish_discovery(Some(vec![
            NewsSource::new("x", "Rediscovered"),
            NewsSource::new("y", "Y"),
        ]));

        assert_eq!(added, 1);
        assert_eq!(state.sources[0].name, "Original");
        assert_eq!(state.sources[1].url, "y");
        assert!(!state.discovering);
    }

    #[test]
    fn failed_discovery_leaves_registry_and_error_alone() {
        let mut state = FeedState::new(vec![], vec![NewsSource::new("x", "X")]);
        assert!(state.try_begin_discovery());
        assert_eq!(state.finish_discovery(None), 0);
        assert_eq!(state.sources.len(), 1);
        assert!(state.error.is_none());
        assert!(!state.discovering);
    }

    #[test]
    fn replace_sources_keeps_urls_unique() {
        let mut state = FeedState::default();
        state.replace_sources(vec![
            NewsSource::new("a", "A"),
            NewsSource::new("a", "A again"),
            NewsSource::new("b", "B"),
        ]);
        assert_eq!(state.sources.len(), 2);
        assert_eq!(state.sources[0].name, "A");
    }
}

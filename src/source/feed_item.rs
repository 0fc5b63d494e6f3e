//! The item type shared by every source and by the aggregation core.
//!
//! `FeedItem` represents a single news entry from any source.  Fetchers
//! convert their native format into `FeedItem`s so that merging, sorting, and
//! rendering stay source-agnostic.
//!
//! ## For contributors
//!
//! The core only ever looks at two fields: [`FeedItem::id`] (identity, used
//! for de-duplication) and [`FeedItem::published`] (used for ordering).
//! Everything else is payload for the UI and can grow freely.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// A single feed entry, normalised from any source.
///
/// ## Sorting
///
/// `FeedItem` implements [`Ord`] for **reverse-chronological** ordering:
/// newer items sort before older ones.  Items published at the same instant
/// compare equal, so a stable sort keeps their existing relative order.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FeedItem {
    /// Opaque, stable identity used for de-duplication.
    ///
    /// For RSS this is the `<guid>` element, falling back to `<link>`.
    pub id: String,

    /// Human-readable headline.
    pub title: String,

    /// Optional longer description or summary text.
    pub description: Option<String>,

    /// URL to the full content.
    pub link: Option<String>,

    /// Publication timestamp, used for sorting.
    pub published: DateTime<Utc>,

    /// Name of the source this came from (e.g. "BBC News").
    pub source_name: String,
}

// ---------------------------------------------------------------------------
// Ordering — reverse chronological (newest first)
// ---------------------------------------------------------------------------

/// Orders by `published` alone and is meant only for sorting a feed.  Two
/// different items published at the same instant compare `Equal` here while
/// `==` still tells them apart.
impl Ord for FeedItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // `other` first so that newer timestamps sort earlier.
        other.published.cmp(&self.published)
    }
}

impl PartialOrd for FeedItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

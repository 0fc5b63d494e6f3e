//! Source abstraction layer.
//!
//! This module defines the two collaborator traits the aggregation core
//! depends on, [`FeedFetcher`] and [`SourceDiscovery`], together with the
//! shared [`FeedItem`] and [`NewsSource`] types.  Concrete implementations
//! live in sub-modules: [`rss`] fetches RSS 2.0 documents and [`discovery`]
//! finds new feeds advertised by web pages.
//!
//! ## For contributors — adding a new source format
//!
//! 1. Create a new file in this directory (e.g. `atom.rs`).
//! 2. Define a struct and implement [`FeedFetcher`] for it.
//! 3. Add `mod atom;` below and re-export your struct in the `pub use` block.
//! 4. Construct it in `main.rs` and hand it to [`crate::FeedService::new`].
//!
//! The scheduler, de-duplication, and UI are all source-agnostic.

mod discovery;
mod feed_item;
mod news_source;
mod rss;

// Re-export the public API of this module so callers can write
// `use crate::source::{FeedFetcher, FeedItem, RssFetcher};`
pub use discovery::{extract_feed_links, FeedLinkDiscovery};
pub use feed_item::FeedItem;
pub use news_source::NewsSource;
pub use rss::RssFetcher;

use async_trait::async_trait;

use crate::error::{DiscoveryError, FetchError};

/// Turns a list of sources into one flat batch of items.
///
/// The service calls [`fetch_all()`](FeedFetcher::fetch_all) from its
/// scheduler task, so implementations must be [`Send`] + [`Sync`].
///
/// ## Contract
///
/// A call either returns the full batch or fails as a whole; the core never
/// sees a partially applied result.  Retries and backoff, if any, belong in
/// the implementation.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    /// Fetch the latest items from every source in `sources`.
    async fn fetch_all(&self, sources: &[NewsSource]) -> Result<Vec<FeedItem>, FetchError>;
}

/// Produces candidate sources to merge into the registry.
///
/// An empty result is valid and means nothing new was found.
#[async_trait]
pub trait SourceDiscovery: Send + Sync {
    async fn discover(&self) -> Result<Vec<NewsSource>, DiscoveryError>;
}

//! RSS fetcher implementation.
//!
//! This module shows how to implement [`FeedFetcher`] for a concrete feed
//! format.  Use it as a template when adding support for Atom, JSON Feed, or
//! any other format.
//!
//! ## For contributors — adding a new format
//!
//! 1. Create a new file under `src/source/` (e.g. `atom.rs`).
//! 2. Keep the parsing step a pure function (no I/O) like
//!    [`RssFetcher::parse_channel`] so it can be tested without a network.
//! 3. Implement [`FeedFetcher`] for your struct and re-export it from
//!    `src/source/mod.rs`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::future::try_join_all;

use super::{FeedFetcher, FeedItem, NewsSource};
use crate::error::FetchError;

/// Fetches and parses RSS 2.0 feeds over HTTP using the [`rss`] crate.
///
/// All sources of a batch are requested concurrently; the first failure
/// fails the whole batch.
#[derive(Debug, Clone)]
pub struct RssFetcher {
    client: reqwest::Client,
}

impl RssFetcher {
    /// Create a fetcher around an already configured HTTP client.
    ///
    /// See [`crate::config::HttpConfig::client`] for the usual way to build one.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Parse an already-fetched [`rss::Channel`] into [`FeedItem`]s.
    ///
    /// This is a pure function (no I/O) so that tests can exercise the
    /// parsing logic without hitting the network.  Items without a usable
    /// `<pubDate>` are dated at the Unix epoch, so they sink below dated news
    /// and keep the same position across refreshes.
    pub fn parse_channel(channel: &rss::Channel, source: &NewsSource) -> Vec<FeedItem> {
        channel
            .items()
            .iter()
            .map(|item| {
                let title = item.title().unwrap_or("(untitled)").to_string();

                // Prefer <guid>, fall back to <link>, then to the title scoped
                // by the source so untagged items of different feeds never
                // collide.
                let id = item
                    .guid()
                    .map(|g| g.value().to_string())
                    .or_else(|| item.link().map(String::from))
                    .unwrap_or_else(|| format!("{}#{}", source.url, title));

                // Parse RFC-2822 date; undated items sink to the bottom.
                let published = item
                    .pub_date()
                    .and_then(|d| DateTime::parse_from_rfc2822(d).ok())
                    .map(|dt| dt.with_timezone(&Utc))
                    .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

                FeedItem {
                    id,
                    title,
                    description: item.description().map(String::from),
                    link: item.link().map(String::from),
                    published,
                    source_name: source.name.clone(),
                }
            })
            .collect()
    }

    async fn fetch_source(&self, source: &NewsSource) -> Result<Vec<FeedItem>, FetchError> {
        let http_err = |source_err| FetchError::Http {
            url: source.url.clone(),
            source: source_err,
        };

        let response = self.client.get(&source.url).send().await.map_err(http_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: source.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(http_err)?;
        let channel = rss::Channel::read_from(body.as_ref()).map_err(|e| FetchError::Parse {
            url: source.url.clone(),
            source: e,
        })?;

        let items = Self::parse_channel(&channel, source);
        tracing::debug!(source = %source.name, count = items.len(), "fetched feed");
        Ok(items)
    }
}

#[async_trait]
impl FeedFetcher for RssFetcher {
    async fn fetch_all(&self, sources: &[NewsSource]) -> Result<Vec<FeedItem>, FetchError> {
        let batches = try_join_all(sources.iter().map(|s| self.fetch_source(s))).await?;
        Ok(batches.into_iter().flatten().collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

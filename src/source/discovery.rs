//! Source discovery by feed autodiscovery links.
//!
//! Web pages advertise their feeds with
//! `<link rel="alternate" type="application/rss+xml" href="…">` in the
//! document head.  [`FeedLinkDiscovery`] fetches a configured list of seed
//! pages and turns every such link into a candidate [`NewsSource`].

use async_trait::async_trait;
use futures_util::future::try_join_all;
use scraper::{Html, Selector};
use url::Url;

use super::{NewsSource, SourceDiscovery};
use crate::error::DiscoveryError;

const FEED_LINK_SELECTOR: &str = r#"link[rel~="alternate"]"#;
const RSS_MIME: &str = "application/rss+xml";

/// Extract the RSS feeds a page advertises.
///
/// Relative `href`s are resolved against `page_url`.  A link's `title`
/// attribute becomes the source name, falling back to the page host.
pub fn extract_feed_links(html: &str, page_url: &Url) -> Vec<NewsSource> {
    let document = Html::parse_document(html);
    let Some(selector) = Selector::parse(FEED_LINK_SELECTOR).ok() else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter(|link| {
            link.value()
                .attr("type")
                .is_some_and(|t| t.trim().eq_ignore_ascii_case(RSS_MIME))
        })
        .filter_map(|link| {
            let href = link.value().attr("href").map(str::trim)?;
            let url = page_url.join(href).ok()?;
            let name = link
                .value()
                .attr("title")
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .or_else(|| url.host_str().map(String::from))
                .unwrap_or_else(|| url.to_string());
            Some(NewsSource::new(url.to_string(), name))
        })
        .collect()
}

/// Discovers sources by scanning seed pages for feed links.
#[derive(Debug, Clone)]
pub struct FeedLinkDiscovery {
    client: reqwest::Client,
    seed_pages: Vec<String>,
}

impl FeedLinkDiscovery {
    pub fn new(client: reqwest::Client, seed_pages: Vec<String>) -> Self {
        Self { client, seed_pages }
    }

    async fn scan_page(&self, page: &str) -> Result<Vec<NewsSource>, DiscoveryError> {
        let page_url = Url::parse(page).map_err(|e| DiscoveryError::InvalidUrl {
            url: page.to_string(),
            source: e,
        })?;
        let http_err = |e| DiscoveryError::Http {
            url: page.to_string(),
            source: e,
        };

        let response = self.client.get(page_url.clone()).send().await.map_err(http_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(DiscoveryError::Status {
                url: page.to_string(),
                status: status.as_u16(),
            });
        }
        let html = response.text().await.map_err(http_err)?;

        let found = extract_feed_links(&html, &page_url);
        tracing::debug!(page, count = found.len(), "scanned seed page");
        Ok(found)
    }
}

#[async_trait]
impl SourceDiscovery for FeedLinkDiscovery {
    async fn discover(&self) -> Result<Vec<NewsSource>, DiscoveryError> {
        let pages = try_join_all(self.seed_pages.iter().map(|p| self.scan_page(p))).await?;
        Ok(pages.into_iter().flatten().collect())
    }
}

//! Built-in content used before the first successful fetch.

use chrono::{DateTime, Utc};

use crate::source::{FeedItem, NewsSource};

/// Items the feed is seeded with.
///
/// The welcome item is dated at the Unix epoch so that any real news sorts
/// above it.
pub fn placeholder_items() -> Vec<FeedItem> {
    vec![FeedItem {
        id: "livescroll:welcome".to_string(),
        title: "Waiting for the first refresh…".to_string(),
        description: Some("Press d to discover more sources, r to refresh now.".to_string()),
        link: None,
        published: DateTime::<Utc>::UNIX_EPOCH,
        source_name: "livescroll".to_string(),
    }]
}

/// The registry contents when the config file lists no sources.
pub fn default_sources() -> Vec<NewsSource> {
    vec![
        NewsSource::new("https://feeds.bbci.co.uk/news/rss.xml", "BBC News").with_category("world"),
        NewsSource::new("https://feeds.npr.org/1001/rss.xml", "NPR").with_category("world"),
        NewsSource::new("https://www.theguardian.com/world/rss", "The Guardian").with_category("world"),
        NewsSource::new("https://feeds.arstechnica.com/arstechnica/index", "Ars Technica").with_category("tech"),
        NewsSource::new("https://hnrss.org/frontpage", "Hacker News").with_category("tech"),
    ]
}

/// Pages scanned by discovery when the config names none.
pub fn seed_pages() -> Vec<String> {
    vec![
        "https://www.theverge.com".to_string(),
        "https://www.wired.com".to_string(),
        "https://blog.rust-lang.org".to_string(),
    ]
}

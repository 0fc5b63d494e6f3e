//! Error types raised by the fetch and discovery collaborators.
//!
//! Neither type ever escapes [`crate::FeedService`]: fetch failures become
//! the generic [`FETCH_ERROR_MESSAGE`] on the state surface, discovery
//! failures are only logged.

use thiserror::Error;

/// The message shown to users when a refresh cycle fails.
pub const FETCH_ERROR_MESSAGE: &str = "Unable to fetch news. Please try again later.";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("could not parse feed at {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: rss::Error,
    },
}

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("invalid seed page url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

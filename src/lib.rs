//! livescroll-news — aggregate many news feeds into one live feed.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌────────────┐ fetch_all() ┌───────────┐ merge_items() ┌───────────┐ watch ┌─────┐
//! │  source/   │ ◄────────── │  service  │ ────────────► │   state   │ ────► │ TUI │
//! │   (rss)    │ ──────────► │  (timer)  │               │(FeedState)│       └─────┘
//! └────────────┘   items     └───────────┘               └───────────┘
//!                                  │ discover()                ▲
//!                                  ▼                           │ merge_sources()
//!                        ┌──────────────────┐                  │
//!                        │ source/discovery │ ─────────────────┘
//!                        └──────────────────┘
//! ```
//!
//! * **`source/`** — the [`FeedFetcher`] and [`SourceDiscovery`] traits and
//!   their HTTP implementations.
//! * **`merge`** — pure feed and registry merges.
//! * **`state`** — the published [`FeedState`] record and its transitions.
//! * **`service`** — [`FeedService`]: the refresh timer, discovery guard, and
//!   start/stop lifecycle.
//! * **`config`** / **`defaults`** — TOML configuration and built-in seeds.

pub mod config;
pub mod defaults;
pub mod error;
pub mod merge;
pub mod service;
pub mod source;
pub mod state;

pub use config::Config;
pub use error::{DiscoveryError, FetchError, FETCH_ERROR_MESSAGE};
pub use service::{CycleOutcome, DiscoveryOutcome, FeedService, DEFAULT_REFRESH_INTERVAL};
pub use source::{FeedFetcher, FeedItem, FeedLinkDiscovery, NewsSource, RssFetcher, SourceDiscovery};
pub use state::{FeedState, RefreshResult};

//! The long-lived aggregation service.
//!
//! [`FeedService`] owns the published [`FeedState`] and drives the two
//! operations that change it:
//!
//! * **refresh**: fetch every registered source, merge the batch into the
//!   feed, publish.  Runs on a repeating timer once [`FeedService::start`] is
//!   called, and on demand through [`FeedService::refresh`].
//! * **discover**: ask the discovery collaborator for new sources and merge
//!   them into the registry.  Only ever caller-triggered.
//!
//! ## Lifecycle
//!
//! ```text
//!   new() ──► start() ──► refresh ─► sleep(interval) ─► refresh ─► …
//!                 │
//!               stop() ── aborts the timer task, clears the active flag
//! ```
//!
//! The timer re-arms only after a cycle has finished, and every cycle holds
//! the cycle lock, so refreshes never overlap.  After [`FeedService::stop`]
//! the service is inert: results that arrive late are dropped without
//! touching the state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::error::FETCH_ERROR_MESSAGE;
use crate::merge::merge_items;
use crate::source::{FeedFetcher, FeedItem, NewsSource, SourceDiscovery};
use crate::state::{FeedState, RefreshResult};

/// Period between two scheduled refreshes unless configured otherwise.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// What a single refresh cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// `count` fetched items were merged and the feed was republished.
    Published { count: usize },
    /// The fetch succeeded but returned nothing.
    Empty,
    /// The fetch failed; the error message is set.
    Failed,
    /// The registry is empty, nothing was fetched.
    NoSources,
    /// The service was stopped before or during the cycle.
    Inactive,
}

/// What a discovery request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryOutcome {
    /// Discovery succeeded and `added` previously unknown sources were merged.
    Merged { added: usize },
    /// Another discovery was in flight; this request was ignored.
    AlreadyRunning,
    /// The collaborator failed; the registry is untouched.
    Failed,
    /// The service was stopped before or during the run.
    Inactive,
}

/// Handle to the aggregation service.  Clones share the same state.
#[derive(Clone)]
pub struct FeedService {
    inner: Arc<Inner>,
}

struct Inner {
    fetcher: Arc<dyn FeedFetcher>,
    discovery: Arc<dyn SourceDiscovery>,
    state: watch::Sender<FeedState>,
    interval: Duration,
    active: AtomicBool,
    /// Held for the whole of a refresh cycle.
    cycle: tokio::sync::Mutex<()>,
    scheduler: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for Inner {
    fn drop(&mut self) {
        let slot = self.scheduler.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = slot.take() {
            handle.abort();
        }
    }
}

impl FeedService {
    pub fn new(
        fetcher: Arc<dyn FeedFetcher>,
        discovery: Arc<dyn SourceDiscovery>,
        initial: FeedState,
        interval: Duration,
    ) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            inner: Arc::new(Inner {
                fetcher,
                discovery,
                state,
                interval,
                active: AtomicBool::new(true),
                cycle: tokio::sync::Mutex::new(()),
                scheduler: Mutex::new(None),
            }),
        }
    }

    /// Receive every published state change.
    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.inner.state.subscribe()
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> FeedState {
        self.inner.state.borrow().clone()
    }

    pub fn interval(&self) -> Duration {
        self.inner.interval
    }

    /// `false` once [`stop`](Self::stop) has been called.
    pub fn is_active(&self) -> bool {
        self.inner.active.load(Ordering::SeqCst)
    }

    /// Replace the source registry.  The next refresh uses the new list.
    pub fn set_sources(&self, sources: Vec<NewsSource>) {
        self.inner.state.send_modify(|state| state.replace_sources(sources));
    }

    /// Spawn the refresh timer on the current tokio runtime.
    ///
    /// The first cycle runs immediately.  Calling `start` on a running or a
    /// stopped service does nothing.
    pub fn start(&self) {
        if !self.is_active() {
            tracing::warn!("start() called on a stopped feed service; ignoring");
            return;
        }
        let mut slot = self.inner.scheduler.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            return;
        }
        *slot = Some(self.spawn_scheduler());
        tracing::info!(interval_secs = self.inner.interval.as_secs(), "feed scheduler started");
    }

    /// Tear the service down: cancel the timer and any cycle it is running,
    /// and make every in-flight operation drop its result.
    pub fn stop(&self) {
        // Flip the flag under the watch lock so no publish can straddle it.
        let active = &self.inner.active;
        self.inner.state.send_if_modified(|_| {
            active.store(false, Ordering::SeqCst);
            false
        });
        let handle = self
            .inner
            .scheduler
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.abort();
        }
        tracing::info!("feed service stopped");
    }

    // The task only holds a weak reference between cycles, so dropping every
    // handle ends the loop even without stop().
    fn spawn_scheduler(&self) -> JoinHandle<()> {
        let weak = Arc::downgrade(&self.inner);
        let interval = self.inner.interval;
        tokio::spawn(async move {
            loop {
                match weak.upgrade() {
                    Some(inner) => {
                        FeedService { inner }.refresh().await;
                    }
                    None => break,
                }
                tokio::time::sleep(interval).await;
            }
        })
    }

    /// Run one refresh cycle now.
    ///
    /// Waits for a cycle that is already running to finish first.
    pub async fn refresh(&self) -> CycleOutcome {
        let _cycle = self.inner.cycle.lock().await;
        if !self.is_active() {
            return CycleOutcome::Inactive;
        }

        let sources = self.current_sources();
        if sources.is_empty() {
            tracing::debug!("no sources registered; skipping refresh");
            return CycleOutcome::NoSources;
        }

        if !self.publish_if_active(FeedState::begin_refresh) {
            return CycleOutcome::Inactive;
        }
        let fetched = self.inner.fetcher.fetch_all(&sources).await;
        if !self.is_active() {
            tracing::debug!("service stopped during fetch; dropping result");
            return CycleOutcome::Inactive;
        }

        let (result, outcome) = match fetched {
            Ok(fresh) if fresh.is_empty() => {
                tracing::debug!("refresh returned no items");
                (RefreshResult::Unchanged, CycleOutcome::Empty)
            }
            Ok(fresh) => {
                let count = fresh.len();
                let items = self.merged_with(fresh);
                (
                    RefreshResult::Published { items, at: Utc::now() },
                    CycleOutcome::Published { count },
                )
            }
            Err(e) => {
                tracing::warn!(error = %e, "refresh failed");
                (
                    RefreshResult::Failed(FETCH_ERROR_MESSAGE.to_string()),
                    CycleOutcome::Failed,
                )
            }
        };

        if !self.publish_if_active(|state| state.finish_refresh(result)) {
            tracing::debug!("service stopped before publishing; dropping result");
            return CycleOutcome::Inactive;
        }
        if let CycleOutcome::Published { count } = outcome {
            let total = self.inner.state.borrow().items.len();
            tracing::info!(fetched = count, total, "feed refreshed");
        }
        outcome
    }

    /// Run source discovery and merge what it finds into the registry.
    ///
    /// Known urls keep their existing configuration.  A request made while
    /// another run is in flight is ignored.  Failures are logged and never
    /// surface as an error on the state.
    pub async fn discover(&self) -> DiscoveryOutcome {
        if !self.is_active() {
            return DiscoveryOutcome::Inactive;
        }
        let active = &self.inner.active;
        let started = self.inner.state.send_if_modified(|state| {
            active.load(Ordering::SeqCst) && state.try_begin_discovery()
        });
        if !started {
            if !self.is_active() {
                return DiscoveryOutcome::Inactive;
            }
            tracing::debug!("discovery already in flight; ignoring request");
            return DiscoveryOutcome::AlreadyRunning;
        }

        let result = self.inner.discovery.discover().await;
        if !self.is_active() {
            tracing::debug!("service stopped during discovery; dropping result");
            return DiscoveryOutcome::Inactive;
        }

        match result {
            Ok(found) => {
                let candidates = found.len();
                let mut added = 0;
                if !self.publish_if_active(|state| added = state.finish_discovery(Some(found))) {
                    tracing::debug!("service stopped before merging sources; dropping result");
                    return DiscoveryOutcome::Inactive;
                }
                tracing::info!(candidates, added, "discovery finished");
                DiscoveryOutcome::Merged { added }
            }
            Err(e) => {
                tracing::warn!(error = %e, "discovery failed");
                if !self.publish_if_active(|state| {
                    state.finish_discovery(None);
                }) {
                    return DiscoveryOutcome::Inactive;
                }
                DiscoveryOutcome::Failed
            }
        }
    }

    /// Apply `modify` and notify subscribers, unless the service has been
    /// stopped.  The flag is read under the watch lock, the same lock
    /// [`stop`](Self::stop) takes to clear it.
    fn publish_if_active(&self, modify: impl FnOnce(&mut FeedState)) -> bool {
        let active = &self.inner.active;
        self.inner.state.send_if_modified(|state| {
            if !active.load(Ordering::SeqCst) {
                return false;
            }
            modify(state);
            true
        })
    }

    fn current_sources(&self) -> Vec<NewsSource> {
        self.inner.state.borrow().sources.clone()
    }

    fn merged_with(&self, fresh: Vec<FeedItem>) -> Vec<FeedItem> {
        merge_items(&self.inner.state.borrow().items, fresh)
    }
}

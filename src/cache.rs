use std::collections::HashSet;
use std::future::Future;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::Result;
use crate::model::CompletedMatch;

pub(crate) const DEFAULT_TTL: Duration = Duration::from_secs(300);
pub(crate) const DEFAULT_MAX_ENTRIES: usize = 1000;

/// Time-boxed cache over the results extractor.
///
/// Repeated callers within the TTL are served from memory instead of
/// re-fetching the results page. A refresh merges incrementally: matches not
/// seen before (keyed by `match_page`) are prepended in the order the fresh
/// page lists them, everything already cached keeps its position, and the
/// list is truncated at `max_entries`.
pub(crate) struct ResultsCache {
    state: Mutex<CacheState>,
    ttl: Duration,
    max_entries: usize,
}

struct CacheState {
    snapshot: Vec<CompletedMatch>,
    last_refresh: Option<Instant>,
}

impl ResultsCache {
    pub(crate) fn new() -> Self {
        Self::with_config(DEFAULT_TTL, DEFAULT_MAX_ENTRIES)
    }

    pub(crate) fn with_config(ttl: Duration, max_entries: usize) -> Self {
        Self {
            state: Mutex::new(CacheState {
                snapshot: Vec::new(),
                last_refresh: None,
            }),
            ttl,
            max_entries,
        }
    }

    /// Return the cached results, refreshing through `fetch` when the cache
    /// is empty or the TTL has elapsed. `fetch` is only polled when a
    /// refresh is due.
    ///
    /// The lock is held across the refresh, so at most one refresh is in
    /// flight and concurrent readers see either the pre-refresh snapshot or
    /// the fully merged one, never a partial merge. A failed refresh serves
    /// the previous snapshot without advancing the refresh clock, so the
    /// next caller retries immediately; with nothing cached yet the error
    /// propagates.
    pub(crate) async fn get_with<Fut>(&self, fetch: Fut) -> Result<Vec<CompletedMatch>>
    where
        Fut: Future<Output = Result<Vec<CompletedMatch>>>,
    {
        let mut state = self.state.lock().await;
        if state.needs_refresh(self.ttl) {
            match fetch.await {
                Ok(fresh) => {
                    state.merge(fresh, self.max_entries);
                    state.last_refresh = Some(Instant::now());
                }
                Err(e) if !state.snapshot.is_empty() => {
                    warn!(error = %e, "results refresh failed, serving stale snapshot");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(state.snapshot.clone())
    }
}

impl CacheState {
    fn needs_refresh(&self, ttl: Duration) -> bool {
        self.snapshot.is_empty() || self.last_refresh.map_or(true, |at| at.elapsed() > ttl)
    }

    fn merge(&mut self, fresh: Vec<CompletedMatch>, max_entries: usize) {
        if self.snapshot.is_empty() {
            self.snapshot = fresh;
        } else {
            let new_matches: Vec<CompletedMatch> = {
                let existing: HashSet<&str> = self
                    .snapshot
                    .iter()
                    .map(|m| m.match_page.as_str())
                    .collect();
                fresh
                    .into_iter()
                    .filter(|m| !existing.contains(m.match_page.as_str()))
                    .collect()
            };
            if !new_matches.is_empty() {
                debug!(count = new_matches.len(), "prepending newly completed matches");
                self.snapshot.splice(0..0, new_matches);
            }
        }
        self.snapshot.truncate(max_entries);
    }
}

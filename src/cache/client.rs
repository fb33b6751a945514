//! Cache-aware request coordinator
//!
//! Serves fresh entries from the [`CacheStore`], revalidates stale ones with
//! `If-None-Match`, and falls back to a plain fetch otherwise. Failures never
//! leave this layer; they come back as `None`.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::time::Duration;

use crate::cache::{CacheEntry, CacheStore, CacheTtl, Partition};
use crate::client::{ApiResponse, TbaApi};

/// A payload served by the coordinator with the time it was last confirmed
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched {
    pub payload: Value,
    pub retrieved_at: DateTime<Utc>,
}

impl From<&CacheEntry> for Fetched {
    fn from(entry: &CacheEntry) -> Self {
        Self {
            payload: entry.payload.clone(),
            retrieved_at: entry.retrieved_at,
        }
    }
}

/// Request outcome counters for a run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FetchStats {
    pub cache_hits: usize,
    pub revalidated: usize,
    pub fetched: usize,
    pub failures: usize,
}

/// Owns the cache and the API client and decides how each request is served.
pub struct FetchCoordinator<C: TbaApi> {
    client: C,
    store: CacheStore,
    freshness: Duration,
    request_delay: Duration,
    stats: FetchStats,
}

impl<C: TbaApi> FetchCoordinator<C> {
    /// Create a coordinator with the default freshness window and delay.
    pub fn new(client: C, store: CacheStore) -> Self {
        Self {
            client,
            store,
            freshness: CacheTtl::FRESHNESS,
            request_delay: CacheTtl::REQUEST_DELAY,
            stats: FetchStats::default(),
        }
    }

    /// Override the pause taken after each stored response
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    #[cfg(test)]
    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn stats(&self) -> FetchStats {
        self.stats
    }

    /// Fetch `path`, cached under `key` in `partition`.
    ///
    /// Returns `None` when no data could be obtained; the reason is logged.
    pub async fn fetch(&mut self, partition: Partition, key: &str, path: &str) -> Option<Fetched> {
        let validator = match self.store.get(partition, key) {
            Some(entry) if entry.is_fresh(Utc::now(), self.freshness) => {
                log::debug!("Cache hit: {} {}", partition, key);
                self.stats.cache_hits += 1;
                return Some(Fetched::from(entry));
            }
            Some(entry) => entry.validator.clone(),
            None => None,
        };

        let url = self.client.url(path);
        let response = match self.client.get(path, validator.as_deref()).await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Request failed for {}: {}", url, e);
                self.stats.failures += 1;
                return None;
            }
        };

        let entry = match response {
            ApiResponse::NotModified => {
                let Some(previous) = self.store.get(partition, key) else {
                    log::warn!("Request failed for {}: 304 without a cached copy", url);
                    self.stats.failures += 1;
                    return None;
                };
                log::debug!("Revalidated: {} {}", partition, key);
                self.stats.revalidated += 1;
                CacheEntry {
                    retrieved_at: Utc::now(),
                    ..previous.clone()
                }
            }
            ApiResponse::Fresh { body, validator } => {
                log::debug!("Fetched: {} {}", partition, key);
                self.stats.fetched += 1;
                CacheEntry::new(body, validator, Utc::now())
            }
        };

        self.store.put(partition, key, entry);
        let fetched = self.store.get(partition, key).map(Fetched::from);

        if !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }

        fetched
    }
}

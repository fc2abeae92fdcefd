// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tag-indexed query cache.
//!
//! Handles:
//! - Serving query results until their retention window expires
//! - De-duplicating identical in-flight queries
//! - Dropping every entry that provides an invalidated tag

use crate::error::{ClientError, Result};
use crate::services::endpoints::{QueryKind, Tag};
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// One cached query result, stored as JSON so entries of any type can
/// share a map.
#[derive(Clone)]
struct CacheEntry {
    value: serde_json::Value,
    tags: &'static [Tag],
    fetched_at: Instant,
    retention: Duration,
}

impl CacheEntry {
    fn is_fresh(&self, now: Instant) -> bool {
        now.duration_since(self.fetched_at) < self.retention
    }
}

/// Shared query cache. Clones share the same entries.
#[derive(Clone, Default)]
pub struct QueryCache {
    entries: Arc<DashMap<String, CacheEntry>>,
    /// Per-key mutex serializing fetches of the same query.
    in_flight: Arc<DashMap<String, Arc<Mutex<()>>>>,
    /// Bumped by every invalidation; results fetched across a bump are
    /// returned but not stored.
    epoch: Arc<AtomicU64>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache key of a query and its arguments.
    pub fn key<A: Serialize + ?Sized>(kind: QueryKind, args: &A) -> String {
        let args = serde_json::to_string(args).unwrap_or_default();
        format!("{}({})", kind.name(), args)
    }

    /// Return the cached result for `key`, or run `fetch` and cache it.
    ///
    /// Concurrent calls with the same key wait for the first one and then
    /// read its result from the cache. Errors are never cached.
    pub async fn get_or_fetch<T, F, Fut>(&self, kind: QueryKind, key: &str, fetch: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(value) = self.fresh(key) {
            tracing::debug!(key = %key, "Query cache hit");
            return decode(value);
        }

        let lock = self
            .in_flight
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let result = {
            let _guard = lock.lock().await;
            self.fetch_locked(kind, key, fetch).await
        };

        // The map and `lock` hold the only references once no caller waits.
        self.in_flight
            .remove_if(key, |_, entry| Arc::strong_count(entry) <= 2);
        result
    }

    async fn fetch_locked<T, F, Fut>(&self, kind: QueryKind, key: &str, fetch: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        // Another task may have fetched while we were waiting.
        if let Some(value) = self.fresh(key) {
            tracing::debug!(key = %key, "Query cache hit after wait");
            return decode(value);
        }

        let epoch = self.epoch.load(Ordering::SeqCst);
        tracing::debug!(key = %key, "Query cache miss, fetching");
        let result = fetch().await?;

        if self.epoch.load(Ordering::SeqCst) == epoch {
            let value = serde_json::to_value(&result)
                .map_err(|e| ClientError::Decode(format!("Failed to cache {}: {}", key, e)))?;
            let now = Instant::now();
            self.entries.retain(|_, entry| entry.is_fresh(now));
            self.entries.insert(
                key.to_string(),
                CacheEntry {
                    value,
                    tags: kind.provides(),
                    fetched_at: now,
                    retention: kind.retention(),
                },
            );
        } else {
            tracing::debug!(key = %key, "Cache invalidated during fetch, not storing");
        }

        Ok(result)
    }

    /// Drop the entry for `key`, forcing the next read to fetch.
    pub fn evict(&self, key: &str) {
        self.entries.remove(key);
    }

    /// Drop every entry providing one of `tags`. Returns the number of
    /// entries removed.
    pub fn invalidate(&self, tags: &[Tag]) -> usize {
        if tags.is_empty() {
            return 0;
        }

        self.epoch.fetch_add(1, Ordering::SeqCst);
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| !entry.tags.iter().any(|tag| tags.contains(tag)));
        let removed = before.saturating_sub(self.entries.len());

        tracing::debug!(?tags, removed, "Invalidated cache tags");
        removed
    }

    /// Whether a fresh entry exists for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.fresh(key).is_some()
    }

    fn fresh(&self, key: &str) -> Option<serde_json::Value> {
        let now = Instant::now();
        let entry = self.entries.get(key)?;
        if entry.is_fresh(now) {
            return Some(entry.value.clone());
        }
        drop(entry);

        self.entries.remove_if(key, |_, entry| !entry.is_fresh(now));
        None
    }
}

fn decode<T: DeserializeOwned>(value: serde_json::Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
}

//! In-memory query cache.
//!
//! Reads go through [`QueryCache::fetch`], which serves a cached value while
//! it is fresh and refetches otherwise. Freshness has two inputs: a staleness
//! window per query kind, and invalidation groups. Every mutation bumps the
//! generation of the groups it touches, which marks all entries stamped with
//! an older generation as stale before the mutation call returns.
//!
//! A failed refetch surfaces the error and leaves the previous value in the
//! cache untouched. Concurrent fetches for one key share a single request.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};

use moka::future::Cache;
use moka::ops::compute::{CompResult, Op};
use tracing::debug;

use crate::error::{ApiError, ApiResult};

mod value;

pub use value::{CacheValue, Cacheable};

/// How long a cached query is served without refetching.
pub(crate) const STALE_AFTER: Duration = Duration::from_secs(300);

/// Staleness window for aggregate stats and time series.
pub(crate) const STALE_AFTER_STATS: Duration = Duration::from_secs(600);

const MAX_ENTRIES: u64 = 1000;
const TIME_TO_LIVE: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone)]
struct CachedEntry {
    value: CacheValue,
    fetched_at: Instant,
    /// Group generations observed when the value was fetched.
    stamps: Vec<(String, u64)>,
}

/// Cache shared by all query facades of one [`ApiClient`](crate::ApiClient).
pub struct QueryCache {
    entries: Cache<String, CachedEntry>,
    generations: RwLock<HashMap<String, u64>>,
}

impl QueryCache {
    pub(crate) fn new() -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(MAX_ENTRIES)
                .time_to_live(TIME_TO_LIVE)
                .build(),
            generations: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the cached value for `key` if it is fresh, refetching it
    /// otherwise.
    ///
    /// The entry's per-key lock makes concurrent callers wait for one fetch
    /// instead of issuing their own. A fetch error propagates to every waiter
    /// while the previously cached value stays in place.
    ///
    /// # Errors
    ///
    /// Returns the fetch error when the value was absent or stale and the
    /// refetch failed.
    pub(crate) async fn fetch<T, F, Fut>(
        &self,
        key: String,
        stale_after: Duration,
        groups: &[String],
        fetch: F,
    ) -> ApiResult<T>
    where
        T: Cacheable,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        let stamps = self.current_stamps(groups);
        let result = self
            .entries
            .entry(key.clone())
            .and_try_compute_with(|existing| {
                let stamps = &stamps;
                async move {
                    if let Some(entry) = existing {
                        let cached = entry.into_value();
                        if T::matches(&cached.value)
                            && cached.fetched_at.elapsed() < stale_after
                            && cached.stamps == *stamps
                        {
                            return Ok::<_, ApiError>(Op::Nop);
                        }
                    }
                    let fetched = fetch().await?;
                    Ok(Op::Put(CachedEntry {
                        value: fetched.into_cache_value(),
                        fetched_at: Instant::now(),
                        stamps: stamps.clone(),
                    }))
                }
            })
            .await?;

        let entry = match result {
            CompResult::Unchanged(entry) => {
                debug!(%key, "cache hit");
                Some(entry)
            }
            CompResult::Inserted(entry)
            | CompResult::ReplacedWith(entry)
            | CompResult::Removed(entry) => Some(entry),
            CompResult::StillNone(_) => None,
        };
        match entry.and_then(|entry| T::from_cache_value(entry.into_value().value)) {
            Some(value) => Ok(value),
            // The closure puts a value on every miss and a key maps to one
            // payload type, so neither gap can occur.
            None => unreachable!("compute left no cache entry for {key}"),
        }
    }

    /// Returns the last value stored under `key` without fetching.
    ///
    /// Staleness and invalidation are not consulted: this is the value a
    /// stale read would still show while its refetch runs. `None` when
    /// nothing is cached under the key or the entry holds another query's
    /// payload type.
    pub async fn peek<T: Cacheable>(&self, key: &str) -> Option<T> {
        let entry = self.entries.get(key).await?;
        T::from_cache_value(entry.value)
    }

    /// Stores a value under `key` as if it had just been fetched.
    pub(crate) async fn put<T: Cacheable>(&self, key: String, groups: &[String], value: T) {
        let entry = CachedEntry {
            value: value.into_cache_value(),
            fetched_at: Instant::now(),
            stamps: self.current_stamps(groups),
        };
        self.entries.insert(key, entry).await;
    }

    /// Marks every entry stamped with `group` as stale.
    ///
    /// Takes effect before returning, so a fetch issued right after sees the
    /// bumped generation and refetches.
    pub fn invalidate_group(&self, group: &str) {
        let mut generations = self
            .generations
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *generations.entry(group.to_owned()).or_insert(0) += 1;
        debug!(group, "cache group invalidated");
    }

    /// Drops every cached entry and forgets all group generations.
    pub async fn clear(&self) {
        self.entries.invalidate_all();
        self.entries.run_pending_tasks().await;
        self.generations
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        debug!("cache cleared");
    }

    fn current_stamps(&self, groups: &[String]) -> Vec<(String, u64)> {
        let generations = self
            .generations
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        groups
            .iter()
            .map(|group| (group.clone(), generations.get(group).copied().unwrap_or(0)))
            .collect()
    }
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.entries.entry_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use serde_json::json;

    use super::*;
    use crate::error::ApiError;

    fn fetcher(
        calls: &Arc<AtomicU32>,
        value: serde_json::Value,
    ) -> impl Future<Output = ApiResult<serde_json::Value>> {
        let calls = Arc::clone(calls);
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(value)
        }
    }

    fn groups() -> Vec<String> {
        vec!["reviews".to_owned()]
    }

    #[tokio::test]
    async fn serves_fresh_values_without_refetching() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicU32::new(0));

        let first: serde_json::Value = cache
            .fetch("k".to_owned(), STALE_AFTER, &groups(), || {
                fetcher(&calls, json!({"n": 1}))
            })
            .await
            .unwrap();
        let second: serde_json::Value = cache
            .fetch("k".to_owned(), STALE_AFTER, &groups(), || {
                fetcher(&calls, json!({"n": 2}))
            })
            .await
            .unwrap();

        assert_eq!(first, json!({"n": 1}));
        assert_eq!(second, json!({"n": 1}));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn keys_are_cached_independently() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicU32::new(0));

        let a: serde_json::Value = cache
            .fetch("a".to_owned(), STALE_AFTER, &groups(), || {
                fetcher(&calls, json!(1))
            })
            .await
            .unwrap();
        let b: serde_json::Value = cache
            .fetch("b".to_owned(), STALE_AFTER, &groups(), || {
                fetcher(&calls, json!(2))
            })
            .await
            .unwrap();

        assert_eq!((a, b), (json!(1), json!(2)));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn group_invalidation_forces_a_refetch() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicU32::new(0));

        let _: serde_json::Value = cache
            .fetch("k".to_owned(), STALE_AFTER, &groups(), || {
                fetcher(&calls, json!(1))
            })
            .await
            .unwrap();
        cache.invalidate_group("reviews");
        let refetched: serde_json::Value = cache
            .fetch("k".to_owned(), STALE_AFTER, &groups(), || {
                fetcher(&calls, json!(2))
            })
            .await
            .unwrap();

        assert_eq!(refetched, json!(2));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn unrelated_groups_leave_entries_fresh() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicU32::new(0));

        let _: serde_json::Value = cache
            .fetch("k".to_owned(), STALE_AFTER, &groups(), || {
                fetcher(&calls, json!(1))
            })
            .await
            .unwrap();
        cache.invalidate_group("orders");
        let cached: serde_json::Value = cache
            .fetch("k".to_owned(), STALE_AFTER, &groups(), || {
                fetcher(&calls, json!(2))
            })
            .await
            .unwrap();

        assert_eq!(cached, json!(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_refetch_surfaces_the_error_and_keeps_the_old_value() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicU32::new(0));

        let _: serde_json::Value = cache
            .fetch("k".to_owned(), STALE_AFTER, &groups(), || {
                fetcher(&calls, json!({"v": 1}))
            })
            .await
            .unwrap();
        cache.invalidate_group("reviews");

        let error = cache
            .fetch::<serde_json::Value, _, _>("k".to_owned(), STALE_AFTER, &groups(), || async {
                Err(ApiError::Api {
                    status: 500,
                    message: "boom".to_owned(),
                })
            })
            .await
            .unwrap_err();
        assert_eq!(error.status(), Some(500));

        let kept = cache.entries.get(&"k".to_owned()).await.unwrap();
        let kept = serde_json::Value::from_cache_value(kept.value).unwrap();
        assert_eq!(kept, json!({"v": 1}));
    }

    #[tokio::test]
    async fn concurrent_fetches_share_a_single_request() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicU32::new(0));

        let groups = groups();
        let (a, b) = tokio::join!(
            cache.fetch("k".to_owned(), STALE_AFTER, &groups, || fetcher(
                &calls,
                json!(1)
            )),
            cache.fetch("k".to_owned(), STALE_AFTER, &groups, || fetcher(
                &calls,
                json!(2)
            )),
        );

        assert_eq!(a.unwrap(), b.unwrap());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn peek_shows_the_stored_value_without_fetching() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicU32::new(0));

        assert_eq!(cache.peek::<serde_json::Value>("k").await, None);

        let _: serde_json::Value = cache
            .fetch("k".to_owned(), STALE_AFTER, &groups(), || {
                fetcher(&calls, json!({"n": 1}))
            })
            .await
            .unwrap();
        cache.invalidate_group("reviews");

        // An invalidated entry still peeks as the last-known value.
        assert_eq!(
            cache.peek::<serde_json::Value>("k").await,
            Some(json!({"n": 1}))
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn put_seeds_a_fresh_entry() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicU32::new(0));

        cache
            .put("k".to_owned(), &groups(), json!({"seeded": true}))
            .await;
        let value: serde_json::Value = cache
            .fetch("k".to_owned(), STALE_AFTER, &groups(), || {
                fetcher(&calls, json!({"seeded": false}))
            })
            .await
            .unwrap();

        assert_eq!(value, json!({"seeded": true}));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn clear_drops_every_entry() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicU32::new(0));

        let _: serde_json::Value = cache
            .fetch("k".to_owned(), STALE_AFTER, &groups(), || {
                fetcher(&calls, json!(1))
            })
            .await
            .unwrap();
        cache.clear().await;
        let _: serde_json::Value = cache
            .fetch("k".to_owned(), STALE_AFTER, &groups(), || {
                fetcher(&calls, json!(2))
            })
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}

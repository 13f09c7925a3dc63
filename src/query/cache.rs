//! Process-wide query cache.
//!
//! Results are stored per [`QueryKey`] with the instant they were fetched. A
//! read returns the cached value while it is fresh and refetches once it is
//! stale or invalidated. Entries nobody has read for `gc_time` are dropped.
//! Each key has its own fetch guard, so concurrent readers of one key share a
//! single backend call and its outcome, failures included. An invalidation
//! that lands while a fetch is running makes that fetch store its result as
//! stale.

use crate::errors::{Error, Result};
use crate::query::{QueryKey, QueryState};
use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, trace, warn};

type CachedValue = Arc<dyn Any + Send + Sync>;

/// Staleness, collection and retry policy.
#[derive(Debug, Clone)]
pub struct CacheOptions {
    /// How long a fetched value is served without refetching
    pub stale_time: Duration,
    /// How long an entry survives without being read
    pub gc_time: Duration,
    /// Automatic retries after a failed fetch
    pub retry: u32,
    /// Pause before each retry
    pub retry_delay: Duration,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            stale_time: Duration::from_secs(5 * 60),
            gc_time: Duration::from_secs(30 * 60),
            retry: 1,
            retry_delay: Duration::from_secs(1),
        }
    }
}

/// Counters since the client was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Reads served from a fresh entry
    pub hits: u64,
    /// Calls made to a fetcher, retries included
    pub fetches: u64,
    /// Reads that failed after all retries
    pub failures: u64,
    /// Entries marked stale by `invalidate`
    pub invalidations: u64,
    /// Entries dropped by garbage collection
    pub collected: u64,
}

#[derive(Default)]
struct Counters {
    hits: AtomicU64,
    fetches: AtomicU64,
    failures: AtomicU64,
    invalidations: AtomicU64,
    collected: AtomicU64,
}

struct Entry {
    value: CachedValue,
    fetched_at: Instant,
    last_accessed: Instant,
    invalidated: bool,
}

impl Entry {
    fn new(value: CachedValue, now: Instant, invalidated: bool) -> Self {
        Self {
            value,
            fetched_at: now,
            last_accessed: now,
            invalidated,
        }
    }

    fn is_fresh(&self, now: Instant, stale_time: Duration) -> bool {
        !self.invalidated && now.duration_since(self.fetched_at) < stale_time
    }
}

/// Serialises fetches of one key and carries their outcome to waiters.
#[derive(Default)]
struct FetchGuard {
    /// Message of the last fetch, if it failed
    last_failure: Mutex<Option<String>>,
    /// Fetches finished under this guard
    completed: AtomicU64,
    /// Set by `invalidate` while a fetch is running
    invalidated_in_flight: AtomicBool,
}

struct Inner {
    options: CacheOptions,
    entries: RwLock<HashMap<QueryKey, Entry>>,
    fetch_guards: Mutex<HashMap<QueryKey, Arc<FetchGuard>>>,
    counters: Counters,
}

/// Result of [`QueryClient::revalidate_in_background`].
#[derive(Debug)]
pub struct Revalidation<T> {
    /// Whatever was cached when the call was made, fresh or not
    pub cached: Option<T>,
    /// The spawned refresh, if the entry needed one
    pub task: Option<JoinHandle<()>>,
}

/// Shared handle to the cache. Cloning is cheap and every clone sees the
/// same entries.
#[derive(Clone)]
pub struct QueryClient {
    inner: Arc<Inner>,
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new(CacheOptions::default())
    }
}

impl std::fmt::Debug for QueryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryClient")
            .field("options", &self.inner.options)
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

impl QueryClient {
    /// Creates an empty cache with the given policy.
    #[must_use]
    pub fn new(options: CacheOptions) -> Self {
        Self {
            inner: Arc::new(Inner {
                options,
                entries: RwLock::new(HashMap::new()),
                fetch_guards: Mutex::new(HashMap::new()),
                counters: Counters::default(),
            }),
        }
    }

    /// The policy this client was built with.
    #[must_use]
    pub fn options(&self) -> &CacheOptions {
        &self.inner.options
    }

    /// Snapshot of the counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let c = &self.inner.counters;
        CacheStats {
            hits: c.hits.load(Ordering::Relaxed),
            fetches: c.fetches.load(Ordering::Relaxed),
            failures: c.failures.load(Ordering::Relaxed),
            invalidations: c.invalidations.load(Ordering::Relaxed),
            collected: c.collected.load(Ordering::Relaxed),
        }
    }

    /// Reads `key`, calling `fetcher` if there is no fresh value.
    ///
    /// A failed fetch is retried `retry` times. If it still fails the error
    /// is returned alongside the last good value, which stays cached but
    /// stale.
    pub async fn fetch_query<T, F, Fut>(&self, key: &QueryKey, fetcher: F) -> QueryState<T>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.collect_garbage().await;

        if let Some((value, true)) = self.read_entry::<T>(key).await {
            self.inner.counters.hits.fetch_add(1, Ordering::Relaxed);
            trace!(%key, "cache hit");
            return QueryState::success(value);
        }

        let guard = self.fetch_guard(key).await;
        let state = self.fetch_guarded(key, &guard, &fetcher).await;
        self.release_guard(key, guard).await;
        state
    }

    async fn fetch_guarded<T, F, Fut>(
        &self,
        key: &QueryKey,
        guard: &FetchGuard,
        fetcher: &F,
    ) -> QueryState<T>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let seen = guard.completed.load(Ordering::Acquire);
        let mut last_failure = guard.last_failure.lock().await;
        let waited_on_fetch = guard.completed.load(Ordering::Acquire) != seen;

        // Another reader may have completed the fetch while we waited.
        let previous = match self.read_entry::<T>(key).await {
            Some((value, true)) => {
                self.inner.counters.hits.fetch_add(1, Ordering::Relaxed);
                trace!(%key, "served by concurrent fetch");
                return QueryState::success(value);
            }
            Some((value, false)) => Some(value),
            None => None,
        };
        if waited_on_fetch {
            if let Some(message) = last_failure.as_ref() {
                trace!(%key, "sharing failure of concurrent fetch");
                let error = Error::FetchFailed {
                    key: key.to_string(),
                    message: message.clone(),
                };
                return QueryState::failure(error, previous);
            }
        }

        debug!(%key, stale = previous.is_some(), "fetching");
        guard.invalidated_in_flight.store(false, Ordering::Release);
        let outcome = self.fetch_with_retry(key, fetcher).await;
        let state = match outcome {
            Ok(value) => {
                let invalidated = guard.invalidated_in_flight.swap(false, Ordering::AcqRel);
                if invalidated {
                    debug!(%key, "invalidated during fetch, storing as stale");
                }
                self.store_entry(key, value.clone(), invalidated).await;
                *last_failure = None;
                QueryState::success(value)
            }
            Err(error) => {
                *last_failure = Some(error.to_string());
                QueryState::failure(error, previous)
            }
        };
        guard.completed.fetch_add(1, Ordering::Release);
        state
    }

    /// Returns whatever is cached for `key` and, if that is missing or stale,
    /// refreshes it on a spawned task.
    pub async fn revalidate_in_background<T, F, Fut>(
        &self,
        key: QueryKey,
        fetcher: F,
    ) -> Revalidation<T>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let cached = self.read_entry::<T>(&key).await;
        if let Some((value, true)) = cached {
            self.inner.counters.hits.fetch_add(1, Ordering::Relaxed);
            return Revalidation {
                cached: Some(value),
                task: None,
            };
        }

        let client = self.clone();
        let task = tokio::spawn(async move {
            let state = client.fetch_query(&key, fetcher).await;
            if let Some(error) = state.error {
                warn!(%key, %error, "background revalidation failed");
            }
        });

        Revalidation {
            cached: cached.map(|(value, _)| value),
            task: Some(task),
        }
    }

    /// Cached value for `key`, fresh or not, without fetching.
    pub async fn get_query_data<T>(&self, key: &QueryKey) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.read_entry::<T>(key).await.map(|(value, _)| value)
    }

    /// Writes `value` for `key` as if it had just been fetched.
    pub async fn set_query_data<T>(&self, key: &QueryKey, value: T)
    where
        T: Send + Sync + 'static,
    {
        self.store(key, value).await;
    }

    /// Replaces the cached value for `key` with `update(previous)`.
    pub async fn update_query_data<T, U>(&self, key: &QueryKey, update: U) -> T
    where
        T: Clone + Send + Sync + 'static,
        U: FnOnce(Option<T>) -> T,
    {
        let previous = self.get_query_data::<T>(key).await;
        let next = update(previous);
        self.store(key, next.clone()).await;
        next
    }

    /// Marks every entry under `prefix` stale. Returns how many were marked.
    pub async fn invalidate(&self, prefix: &QueryKey) -> usize {
        let mut entries = self.inner.entries.write().await;
        let mut marked = 0;
        for (key, entry) in entries.iter_mut() {
            if prefix.is_prefix_of(key) {
                entry.invalidated = true;
                marked += 1;
            }
        }
        drop(entries);

        // Fetches still running would otherwise store their result as fresh
        let guards = self.inner.fetch_guards.lock().await;
        for (key, guard) in guards.iter() {
            if prefix.is_prefix_of(key) {
                guard.invalidated_in_flight.store(true, Ordering::Release);
            }
        }
        drop(guards);

        self.inner
            .counters
            .invalidations
            .fetch_add(marked as u64, Ordering::Relaxed);
        debug!(%prefix, marked, "invalidated");
        marked
    }

    /// Drops every entry under `prefix`. Returns how many were dropped.
    pub async fn remove(&self, prefix: &QueryKey) -> usize {
        let mut entries = self.inner.entries.write().await;
        let before = entries.len();
        entries.retain(|key, _| !prefix.is_prefix_of(key));
        before - entries.len()
    }

    /// Whether `key` is cached and fresh right now.
    pub async fn is_fresh(&self, key: &QueryKey) -> bool {
        let entries = self.inner.entries.read().await;
        entries
            .get(key)
            .is_some_and(|entry| entry.is_fresh(Instant::now(), self.inner.options.stale_time))
    }

    /// Number of cached entries.
    pub async fn len(&self) -> usize {
        self.inner.entries.read().await.len()
    }

    /// True when nothing is cached.
    pub async fn is_empty(&self) -> bool {
        self.inner.entries.read().await.is_empty()
    }

    /// Drops entries that have not been read for `gc_time`.
    pub async fn collect_garbage(&self) -> usize {
        let now = Instant::now();
        let gc_time = self.inner.options.gc_time;

        let mut entries = self.inner.entries.write().await;
        let expired: Vec<QueryKey> = entries
            .iter()
            .filter(|(_, entry)| now.duration_since(entry.last_accessed) >= gc_time)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            entries.remove(key);
        }
        drop(entries);

        if expired.is_empty() {
            return 0;
        }

        self.inner
            .counters
            .collected
            .fetch_add(expired.len() as u64, Ordering::Relaxed);
        debug!(collected = expired.len(), "garbage collected cache entries");
        expired.len()
    }

    async fn read_entry<T>(&self, key: &QueryKey) -> Option<(T, bool)>
    where
        T: Clone + Send + Sync + 'static,
    {
        let now = Instant::now();
        let mut entries = self.inner.entries.write().await;
        let entry = entries.get_mut(key)?;
        entry.last_accessed = now;
        let fresh = entry.is_fresh(now, self.inner.options.stale_time);
        if let Some(value) = entry.value.downcast_ref::<T>() {
            Some((value.clone(), fresh))
        } else {
            warn!(%key, "cached value has an unexpected type, ignoring it");
            None
        }
    }

    async fn store<T>(&self, key: &QueryKey, value: T)
    where
        T: Send + Sync + 'static,
    {
        self.store_entry(key, value, false).await;
    }

    async fn store_entry<T>(&self, key: &QueryKey, value: T, invalidated: bool)
    where
        T: Send + Sync + 'static,
    {
        let entry = Entry::new(Arc::new(value), Instant::now(), invalidated);
        self.inner.entries.write().await.insert(key.clone(), entry);
    }

    async fn fetch_guard(&self, key: &QueryKey) -> Arc<FetchGuard> {
        let mut guards = self.inner.fetch_guards.lock().await;
        Arc::clone(guards.entry(key.clone()).or_default())
    }

    /// Drops the guard for `key` once no reader holds it any more.
    async fn release_guard(&self, key: &QueryKey, guard: Arc<FetchGuard>) {
        drop(guard);
        let mut guards = self.inner.fetch_guards.lock().await;
        if guards.get(key).is_some_and(|g| Arc::strong_count(g) == 1) {
            guards.remove(key);
        }
    }

    #[cfg(test)]
    async fn guard_count(&self) -> usize {
        self.inner.fetch_guards.lock().await.len()
    }

    async fn fetch_with_retry<T, F, Fut>(&self, key: &QueryKey, fetcher: &F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0;
        loop {
            self.inner.counters.fetches.fetch_add(1, Ordering::Relaxed);
            match fetcher().await {
                Ok(value) => return Ok(value),
                Err(error) if attempt < self.inner.options.retry => {
                    attempt += 1;
                    warn!(%key, attempt, %error, "fetch failed, retrying");
                    tokio::time::sleep(self.inner.options.retry_delay).await;
                }
                Err(error) => {
                    self.inner.counters.failures.fetch_add(1, Ordering::Relaxed);
                    warn!(%key, %error, "fetch failed");
                    return Err(error);
                }
            }
        }
    }
}

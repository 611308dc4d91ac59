//! Deduplication of concurrent in-flight fetches.
//!
//! The first request for a key spawns the producer's future as a tokio task
//! and stores a shared handle to its result. Requests arriving before that
//! task settles join the same handle. The entry is evicted by a guard owned
//! by the task, so eviction happens on success, failure, panic and runtime
//! shutdown alike. A producer that never settles keeps its entry forever;
//! there is no timeout.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use futures_util::future::{BoxFuture, FutureExt, Shared};

/// Failure observed by every caller joined to one in-flight request.
pub enum DedupError<E> {
    /// The producer returned an error.
    Failed(Arc<E>),
    /// The producer task panicked or was cancelled before settling.
    Aborted,
}

impl<E> Clone for DedupError<E> {
    fn clone(&self) -> Self {
        match self {
            Self::Failed(err) => Self::Failed(Arc::clone(err)),
            Self::Aborted => Self::Aborted,
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for DedupError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(err) => f.debug_tuple("Failed").field(err).finish(),
            Self::Aborted => f.write_str("Aborted"),
        }
    }
}

impl<E: fmt::Display> fmt::Display for DedupError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(err) => fmt::Display::fmt(err, f),
            Self::Aborted => f.write_str("in-flight request aborted before it settled"),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for DedupError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Failed(err) => Some(err.as_ref()),
            Self::Aborted => None,
        }
    }
}

/// Handle to an in-flight request; await it for the shared outcome.
pub type PendingResult<T, E> = Shared<BoxFuture<'static, Result<T, DedupError<E>>>>;

struct Entry<T, E> {
    id: u64,
    handle: PendingResult<T, E>,
}

struct Inner<K, T, E> {
    entries: Mutex<HashMap<K, Entry<T, E>>>,
    next_id: AtomicU64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Removes its entry when the producer task ends, however it ends.
struct EvictOnDrop<K: Eq + Hash, T, E> {
    inner: Weak<Inner<K, T, E>>,
    key: Option<K>,
    id: u64,
}

impl<K: Eq + Hash, T, E> Drop for EvictOnDrop<K, T, E> {
    fn drop(&mut self) {
        if let Some(key) = self.key.take() {
            evict(&self.inner, &key, self.id);
        }
    }
}

/// Removes `key` only while it still maps to request `id`.
fn evict<K: Eq + Hash, T, E>(inner: &Weak<Inner<K, T, E>>, key: &K, id: u64) {
    let Some(inner) = inner.upgrade() else {
        return;
    };
    let mut entries = lock(&inner.entries);
    if entries.get(key).is_some_and(|entry| entry.id == id) {
        entries.remove(key);
    }
}

/// Process-wide map from request identity to its in-flight result.
///
/// Cloning is cheap and clones share the same map.
pub struct RequestDedupCache<K, T, E> {
    inner: Arc<Inner<K, T, E>>,
}

impl<K, T, E> Clone for RequestDedupCache<K, T, E> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<K, T, E> Default for RequestDedupCache<K, T, E> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Inner { entries: Mutex::new(HashMap::new()), next_id: AtomicU64::new(0) }),
        }
    }
}

impl<K, T, E> RequestDedupCache<K, T, E>
where
    K: Eq + Hash + Clone + fmt::Debug + Send + 'static,
    T: Clone + Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Joins the in-flight request for `key`, or starts one with `producer`.
    ///
    /// `producer` is only invoked when no request for `key` is pending, and
    /// is called with the map locked, so it must not call back into this
    /// cache. A panic inside `producer` leaves nothing cached. Must be called
    /// from within a tokio runtime.
    pub fn fetch_or_join<F, Fut>(&self, key: K, producer: F) -> PendingResult<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        // Held across spawn + insert so an instantly settling task cannot
        // evict before its entry exists. Nothing below may relock the map
        // while it unwinds.
        let mut entries = lock(&self.inner.entries);
        if let Some(entry) = entries.get(&key) {
            tracing::debug!(key = ?key, "joining in-flight request");
            return entry.handle.clone();
        }

        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let fut = producer();

        let weak = Arc::downgrade(&self.inner);
        let guard_inner = Weak::clone(&weak);
        let guard_key = key.clone();
        let task = tokio::spawn(async move {
            let _guard = EvictOnDrop { inner: guard_inner, key: Some(guard_key), id };
            fut.await
        });

        let task_key = key.clone();
        let handle = async move {
            match task.await {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(err)) => Err(DedupError::Failed(Arc::new(err))),
                Err(join_err) => {
                    tracing::warn!(key = ?task_key, error = %join_err, "in-flight request aborted");
                    // A task cancelled before its first poll never built its guard.
                    evict(&weak, &task_key, id);
                    Err(DedupError::Aborted)
                },
            }
        }
        .boxed()
        .shared();

        entries.insert(key, Entry { id, handle: handle.clone() });
        handle
    }

    pub fn is_pending(&self, key: &K) -> bool {
        lock(&self.inner.entries).contains_key(key)
    }

    /// Number of keys with a request in flight.
    pub fn len(&self) -> usize {
        lock(&self.inner.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

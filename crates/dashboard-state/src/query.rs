use dashboard_core::ApiResult;
use futures_util::future::BoxFuture;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::runtime::Handle;
use tokio::sync::watch;

/// What a screen renders: current data, whether a fetch is in flight, and the
/// last error message.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    pub data: Option<T>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self {
            data: None,
            is_loading: false,
            error: None,
        }
    }
}

pub(crate) type FetchFn<K, T> = Arc<dyn Fn(K) -> BoxFuture<'static, ApiResult<T>> + Send + Sync>;

struct Inner<K, T> {
    key: Option<K>,
    refresh_key: u64,
    /// Bumped on every fetch start; a completion only applies if it still matches.
    generation: u64,
    snapshot: Snapshot<T>,
}

/// Keyed fetch state shared by the per-screen containers.
///
/// Changing the key or calling `refresh` starts a fetch on the runtime given
/// at construction, so both may be called from threads outside that runtime.
/// Results of superseded fetches are dropped when they arrive; the fetch
/// itself is left to finish.
pub(crate) struct Query<K, T> {
    inner: Arc<Mutex<Inner<K, T>>>,
    changes: Arc<watch::Sender<u64>>,
    fetch: FetchFn<K, T>,
    runtime: Handle,
}

impl<K, T> Clone for Query<K, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            changes: Arc::clone(&self.changes),
            fetch: Arc::clone(&self.fetch),
            runtime: self.runtime.clone(),
        }
    }
}

fn lock<K, T>(inner: &Mutex<Inner<K, T>>) -> MutexGuard<'_, Inner<K, T>> {
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<K, T> Query<K, T>
where
    K: Clone + PartialEq + Send + 'static,
    T: Clone + Send + 'static,
{
    pub fn new(fetch: FetchFn<K, T>, runtime: Handle) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            inner: Arc::new(Mutex::new(Inner {
                key: None,
                refresh_key: 0,
                generation: 0,
                snapshot: Snapshot::default(),
            })),
            changes: Arc::new(changes),
            fetch,
            runtime,
        }
    }

    fn notify(&self) {
        self.changes.send_modify(|version| *version += 1);
    }

    pub fn snapshot(&self) -> Snapshot<T> {
        lock(&self.inner).snapshot.clone()
    }

    pub fn refresh_count(&self) -> u64 {
        lock(&self.inner).refresh_key
    }

    /// Point the query at `key`. An unchanged key does not refetch.
    pub fn set_key(&self, key: Option<K>) {
        {
            let mut inner = lock(&self.inner);
            if inner.key == key {
                return;
            }
            inner.key = key;
        }
        self.start();
    }

    /// Refetch the current key.
    pub fn refresh(&self) {
        lock(&self.inner).refresh_key += 1;
        self.start();
    }

    fn start(&self) {
        let (generation, key) = {
            let mut inner = lock(&self.inner);
            inner.generation += 1;
            match inner.key.clone() {
                None => {
                    inner.snapshot = Snapshot::default();
                    drop(inner);
                    self.notify();
                    return;
                }
                Some(key) => {
                    inner.snapshot.is_loading = true;
                    inner.snapshot.error = None;
                    (inner.generation, key)
                }
            }
        };
        self.notify();

        let this = self.clone();
        let request = (self.fetch)(key);
        self.runtime.spawn(async move {
            let result = request.await;
            let mut inner = lock(&this.inner);
            if inner.generation != generation {
                tracing::debug!("Dropping stale result for fetch #{}", generation);
                return;
            }
            match result {
                Ok(data) => inner.snapshot.data = Some(data),
                Err(err) => {
                    inner.snapshot.error = Some(err.message);
                    inner.snapshot.data = None;
                }
            }
            inner.snapshot.is_loading = false;
            drop(inner);
            this.notify();
        });
    }

    /// Wait until no fetch is in flight and return the settled state.
    pub async fn settled(&self) -> Snapshot<T> {
        let mut rx = self.changes.subscribe();
        loop {
            let snapshot = self.snapshot();
            if !snapshot.is_loading {
                return snapshot;
            }
            if rx.changed().await.is_err() {
                return self.snapshot();
            }
        }
    }
}

use crate::data::StudentId;
use std::{
    collections::HashMap,
    fmt::{self, Display},
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
    time::{Duration, Instant},
};
use tokio::sync::Mutex as FetchLock;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    entity: &'static str,
    id: StudentId,
}

impl QueryKey {
    pub const fn student(id: StudentId) -> Self {
        Self {
            entity: "student",
            id,
        }
    }
}

impl Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.entity, self.id)
    }
}

///versions only ever grow, so two snapshots with the same version are the same write
#[derive(Debug)]
pub struct Snapshot<T> {
    pub version: u64,
    pub data: Arc<T>,
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            version: self.version,
            data: Arc::clone(&self.data),
        }
    }
}

#[derive(Debug)]
struct Entry<T> {
    snapshot: Snapshot<T>,
    written_at: Instant,
}

/// Concurrent fetches of one key are funnelled through a per-key lock, so only the first one
/// reaches the fetcher and the rest pick up what it wrote.
#[derive(Debug)]
pub struct QueryCache<T> {
    stale_time: Duration,
    next_version: AtomicU64,
    entries: Mutex<HashMap<QueryKey, Entry<T>>>,
    in_flight: Mutex<HashMap<QueryKey, Arc<FetchLock<()>>>>,
}

impl<T> QueryCache<T> {
    pub fn new(stale_time: Duration) -> Self {
        Self {
            stale_time,
            next_version: AtomicU64::new(1),
            entries: Mutex::new(HashMap::new()),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    pub fn get_fresh(&self, key: &QueryKey) -> Option<Snapshot<T>> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .filter(|entry| entry.written_at.elapsed() < self.stale_time)
            .map(|entry| entry.snapshot.clone())
    }

    ///last writer wins, and anything gone stale is dropped on the way
    pub fn set_query_data(&self, key: QueryKey, data: T) -> Snapshot<T> {
        let snapshot = Snapshot {
            version: self.next_version.fetch_add(1, Ordering::Relaxed),
            data: Arc::new(data),
        };

        {
            let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            let before = entries.len();
            entries.retain(|_, entry| entry.written_at.elapsed() < self.stale_time);
            if entries.len() < before {
                debug!(dropped = before - entries.len(), "dropped stale queries");
            }

            entries.insert(
                key,
                Entry {
                    snapshot: snapshot.clone(),
                    written_at: Instant::now(),
                },
            );
        }

        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|_, lock| Arc::strong_count(lock) > 1);

        snapshot
    }

    pub async fn fetch<F, Fut, E>(&self, key: &QueryKey, fetcher: F) -> Result<Snapshot<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(fresh) = self.get_fresh(key) {
            debug!(%key, version = fresh.version, "query cache hit");
            return Ok(fresh);
        }

        let lock = Arc::clone(
            self.in_flight
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .entry(key.clone())
                .or_default(),
        );
        let _fetching = lock.lock().await;

        if let Some(fresh) = self.get_fresh(key) {
            debug!(%key, version = fresh.version, "query fetched while waiting");
            return Ok(fresh);
        }

        debug!(%key, "query cache miss, fetching");
        let data = fetcher().await?;
        Ok(self.set_query_data(key.clone(), data))
    }
}

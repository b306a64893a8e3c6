//! Bounded SQLite connection pool
//!
//! Request handlers borrow one connection per search. At most `limit`
//! connections are in use at any time; callers beyond that wait for a permit.
//! Connections are opened lazily and kept for reuse after each call.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tokio::sync::Semaphore;

use super::database::Database;
use super::error::StorageError;

/// Pool of database connections shared by all request handlers
pub struct ConnectionPool {
    path: PathBuf,
    limit: usize,
    permits: Arc<Semaphore>,
    idle: Arc<Mutex<Vec<Database>>>,
}

impl ConnectionPool {
    /// Create a pool for the database at `path`
    ///
    /// A limit of zero is raised to one.
    pub fn new(path: impl Into<PathBuf>, limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            path: path.into(),
            limit,
            permits: Arc::new(Semaphore::new(limit)),
            idle: Arc::new(Mutex::new(Vec::with_capacity(limit))),
        }
    }

    /// Path of the underlying database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Maximum number of connections in use at the same time
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of open connections waiting for reuse
    pub fn idle_count(&self) -> usize {
        self.idle.lock().map(|idle| idle.len()).unwrap_or(0)
    }

    /// Stop handing out connections; pending and future calls fail
    pub fn close(&self) {
        self.permits.close();
        if let Ok(mut idle) = self.idle.lock() {
            idle.clear();
        }
    }

    /// Run `f` with a pooled connection on the blocking thread pool
    ///
    /// The connection goes back to the pool whether `f` succeeds or fails. It
    /// is dropped only if `f` panics. The permit travels with the blocking
    /// task, so a caller that gives up waiting does not free its slot before
    /// `f` has finished.
    pub async fn run<T, F>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Database) -> Result<T, StorageError> + Send + 'static,
        T: Send + 'static,
    {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| StorageError::PoolClosed)?;

        let permits = self.permits.clone();
        let idle = self.idle.clone();
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || {
            let _permit = permit;

            let cached = idle.lock().map_err(|_| StorageError::LockError)?.pop();
            let db = match cached {
                Some(db) => db,
                None => {
                    tracing::debug!(path = %path.display(), "opening pooled connection");
                    Database::new(&path)?
                }
            };

            let result = f(&db);

            if !permits.is_closed() {
                idle.lock().map_err(|_| StorageError::LockError)?.push(db);
            }
            result
        })
        .await
        .map_err(|e| StorageError::Task(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tempfile::tempdir;

    /// Work that records how many connections are busy at once
    fn tracked(
        active: Arc<AtomicUsize>,
        peak: Arc<AtomicUsize>,
        hold: Duration,
    ) -> impl FnOnce(&Database) -> Result<u64, StorageError> + Send + 'static {
        move |db| {
            let now = active.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(hold);
            active.fetch_sub(1, Ordering::SeqCst);
            db.count_stock_groups()
        }
    }

    #[tokio::test]
    async fn test_run_reuses_connection() {
        let dir = tempdir().unwrap();
        let pool = ConnectionPool::new(dir.path().join("inventory.db"), 4);
        assert_eq!(pool.idle_count(), 0);

        let groups = pool.run(|db| db.count_stock_groups()).await.unwrap();
        assert_eq!(groups, 0);
        assert_eq!(pool.idle_count(), 1);

        pool.run(|db| db.count_stock_groups()).await.unwrap();
        assert_eq!(pool.idle_count(), 1);
    }

    #[tokio::test]
    async fn test_connection_returned_after_error() {
        let dir = tempdir().unwrap();
        let pool = ConnectionPool::new(dir.path().join("inventory.db"), 2);

        let result: Result<(), StorageError> = pool
            .run(|db| {
                db.connection().execute("SELECT * FROM missing_table", [])?;
                Ok(())
            })
            .await;

        assert!(matches!(result, Err(StorageError::Database(_))));
        assert_eq!(pool.idle_count(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_use_stays_within_limit() {
        let dir = tempdir().unwrap();
        let pool = Arc::new(ConnectionPool::new(dir.path().join("inventory.db"), 3));
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let mut tasks = Vec::new();
        for _ in 0..12 {
            let pool = pool.clone();
            let work = tracked(active.clone(), peak.clone(), Duration::from_millis(10));
            tasks.push(tokio::spawn(async move { pool.run(work).await }));
        }
        for task in tasks {
            assert_eq!(task.await.unwrap().unwrap(), 0);
        }

        assert!(peak.load(Ordering::SeqCst) <= pool.limit());
        assert!(pool.idle_count() <= pool.limit());
    }

    #[tokio::test]
    async fn test_cancelled_caller_keeps_slot_until_work_finishes() {
        let dir = tempdir().unwrap();
        let pool = Arc::new(ConnectionPool::new(dir.path().join("inventory.db"), 1));
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let slow = {
            let pool = pool.clone();
            let work = tracked(active.clone(), peak.clone(), Duration::from_millis(300));
            tokio::spawn(async move { pool.run(work).await })
        };

        // Give up on the first call while its query is still running
        tokio::time::sleep(Duration::from_millis(50)).await;
        slow.abort();

        let groups = pool
            .run(tracked(active.clone(), peak.clone(), Duration::from_millis(10)))
            .await
            .unwrap();

        assert_eq!(groups, 0);
        assert_eq!(peak.load(Ordering::SeqCst), 1);
        // The abandoned call returned its connection, which was then reused
        assert_eq!(pool.idle_count(), 1);
    }

    #[tokio::test]
    async fn test_closed_pool_rejects_calls() {
        let dir = tempdir().unwrap();
        let pool = ConnectionPool::new(dir.path().join("inventory.db"), 1);
        pool.close();

        let result = pool.run(|db| db.count_stock_groups()).await;
        assert!(matches!(result, Err(StorageError::PoolClosed)));
    }

    #[test]
    fn test_zero_limit_is_raised() {
        let pool = ConnectionPool::new("unused.db", 0);
        assert_eq!(pool.limit(), 1);
    }
}

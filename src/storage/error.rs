//! Storage module error types
//!
//! Provides error types for database operations.

use thiserror::Error;

/// Storage operation error type
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection or query error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Lock error when accessing the idle connection list
    #[error("connection pool lock poisoned")]
    LockError,

    /// The pool no longer hands out connections
    #[error("connection pool closed")]
    PoolClosed,

    /// A blocking database task panicked or was cancelled
    #[error("database task failed: {0}")]
    Task(String),
}

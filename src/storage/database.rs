//! SQLite database connection management
//!
//! Provides database initialization and connection management for the
//! inventory store.

use std::path::Path;

use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

use super::error::StorageError;

/// SQL function lowering text with full Unicode case folding
///
/// SQLite's built-in `LOWER()` only folds ASCII letters.
pub const UNICODE_LOWER: &str = "unicode_lower";

/// Database wrapper for SQLite connection management
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open a database file and make sure the schema exists
    ///
    /// # Arguments
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    /// A new Database instance with initialized schema
    pub fn new(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        Self::initialize(conn)
    }

    /// Create an in-memory database for testing
    #[cfg(test)]
    pub fn new_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        Self::initialize(conn)
    }

    fn initialize(conn: Connection) -> Result<Self, StorageError> {
        // Enable foreign key support
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        conn.create_scalar_function(
            UNICODE_LOWER,
            1,
            FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
            |ctx| Ok(ctx.get::<Option<String>>(0)?.map(|text| text.to_lowercase())),
        )?;

        // Schema statements are idempotent, so existing files are left intact
        conn.execute_batch(include_str!("schema.sql"))?;

        Ok(Self { conn })
    }

    /// Number of stock groups, used as a cheap connectivity check at startup
    pub fn count_stock_groups(&self) -> Result<u64, StorageError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM stock_group", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    /// Get a reference to the underlying connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_database_creation() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("inventory.db");

        let db = Database::new(&db_path);
        assert!(db.is_ok(), "Database creation failed: {:?}", db.err());

        // Verify database file exists
        assert!(db_path.exists());
    }

    #[test]
    fn test_in_memory_database() {
        let db = Database::new_in_memory();
        assert!(db.is_ok(), "In-memory database creation failed: {:?}", db.err());
    }

    #[test]
    fn test_schema_initialization() {
        let db = Database::new_in_memory().unwrap();

        for table in ["stock", "stock_group", "invoice", "invoice_detail", "warehouse"] {
            let exists: i64 = db
                .connection()
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                    [table],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(exists, 1, "table {} should exist", table);
        }
    }

    #[test]
    fn test_reopen_keeps_data() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("inventory.db");

        {
            let db = Database::new(&db_path).unwrap();
            db.connection()
                .execute("INSERT INTO stock_group (group_id, description) VALUES (1, 'Fasteners')", [])
                .unwrap();
        }

        let db = Database::new(&db_path).unwrap();
        assert_eq!(db.count_stock_groups().unwrap(), 1);
    }

    #[test]
    fn test_unicode_lower_function() {
        let db = Database::new_in_memory().unwrap();

        let lowered: String = db
            .connection()
            .query_row("SELECT unicode_lower('ÉCROU Ø Straße')", [], |row| row.get(0))
            .unwrap();
        assert_eq!(lowered, "écrou ø straße");

        let null: Option<String> = db
            .connection()
            .query_row("SELECT unicode_lower(NULL)", [], |row| row.get(0))
            .unwrap();
        assert_eq!(null, None);
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let db = Database::new_in_memory().unwrap();

        let fk_enabled: i32 = db
            .connection()
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();

        assert_eq!(fk_enabled, 1, "Foreign keys should be enabled");
    }
}

//! DuckDB database backend implementation
//!
//! DuckDB has no user-version pragma, so the migration version is stored as
//! a single row in `stepmig.version`. The table is created on first write and
//! kept out of schema dumps.

use crate::error::{DbError, DbResult};
use crate::traits::{Database, VersionStore};
use async_trait::async_trait;
use duckdb::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Schema that holds the version table.
const VERSION_SCHEMA: &str = "stepmig";

/// Catalog queries used to rebuild the schema, in output order.
const SCHEMA_QUERIES: [&str; 3] = [
    "SELECT sql FROM duckdb_tables() WHERE schema_name <> 'stepmig' AND sql IS NOT NULL",
    "SELECT sql FROM duckdb_views() WHERE NOT internal AND schema_name <> 'stepmig' AND sql IS NOT NULL",
    "SELECT sql FROM duckdb_indexes() WHERE schema_name <> 'stepmig' AND sql IS NOT NULL",
];

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Self::from_connection(conn)
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Self::from_connection(conn)
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn from_connection(conn: Connection) -> DbResult<Self> {
        let backend = Self {
            conn: Mutex::new(conn),
        };
        backend.ping()?;
        Ok(backend)
    }

    fn ping(&self) -> DbResult<()> {
        self.lock()?
            .query_row("SELECT 1", [], |_| Ok(()))
            .map_err(|e| DbError::ConnectionError(e.to_string()))
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        Ok(self.conn.lock()?)
    }

    /// Execute batch SQL synchronously
    fn execute_batch_sync(&self, sql: &str) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(sql)
            .map_err(|e| DbError::ExecutionError(e.to_string()))
    }

    fn schema_sql_sync(&self) -> DbResult<Vec<String>> {
        let conn = self.lock()?;
        let mut statements = Vec::new();
        for query in SCHEMA_QUERIES {
            let mut stmt = conn.prepare(query)?;
            let rows = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?;
            statements.extend(rows);
        }
        Ok(statements)
    }

    fn version_table_exists(conn: &Connection) -> DbResult<bool> {
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = ? AND table_name = 'version'",
                duckdb::params![VERSION_SCHEMA],
                |row| row.get(0),
            )
            .map_err(|e| DbError::VersionError(format!("failed to inspect catalog: {e}")))?;
        Ok(count > 0)
    }

    fn read_version_sync(&self) -> DbResult<u32> {
        let conn = self.lock()?;
        if !Self::version_table_exists(&conn)? {
            return Ok(0);
        }

        let version: Option<i64> = conn
            .query_row(
                "SELECT CAST(MAX(version) AS BIGINT) FROM stepmig.version",
                [],
                |row| row.get(0),
            )
            .map_err(|e| DbError::VersionError(format!("failed to read version: {e}")))?;

        match version {
            None => Ok(0),
            Some(v) => u32::try_from(v)
                .map_err(|_| DbError::VersionError(format!("stored version {v} is out of range"))),
        }
    }

    /// Replace the stored version inside a `BEGIN` / `COMMIT` transaction,
    /// rolling back on error.
    fn write_version_sync(&self, version: u32) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(
            "CREATE SCHEMA IF NOT EXISTS stepmig;
             CREATE TABLE IF NOT EXISTS stepmig.version (version INTEGER NOT NULL);",
        )
        .map_err(|e| DbError::VersionError(format!("failed to create version table: {e}")))?;

        conn.execute_batch("BEGIN TRANSACTION")
            .map_err(|e| DbError::VersionError(format!("BEGIN failed: {e}")))?;

        let result = conn
            .execute_batch("DELETE FROM stepmig.version")
            .and_then(|_| {
                conn.execute(
                    "INSERT INTO stepmig.version (version) VALUES (?)",
                    duckdb::params![i64::from(version)],
                )
            })
            .map_err(|e| DbError::VersionError(format!("failed to write version: {e}")));

        match result {
            Ok(_) => {
                if let Err(commit_err) = conn.execute_batch("COMMIT") {
                    let _ = conn.execute_batch("ROLLBACK");
                    return Err(DbError::VersionError(format!(
                        "COMMIT failed: {commit_err}"
                    )));
                }
                Ok(())
            }
            Err(e) => {
                let _ = conn.execute_batch("ROLLBACK");
                Err(e)
            }
        }
    }
}

#[async_trait]
impl Database for DuckDbBackend {
    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.execute_batch_sync(sql)
    }

    async fn schema_sql(&self) -> DbResult<Vec<String>> {
        self.schema_sql_sync()
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

/// Version storage for DuckDB.
///
/// DuckDB has no per-database scalar like SQLite's `user_version`, so the
/// version is a row in the user table `stepmig.version`. The table is hidden
/// from [`Database::schema_sql`], but a migration that drops the `stepmig`
/// schema resets the version to 0.
#[async_trait]
impl VersionStore for DuckDbBackend {
    async fn read_version(&self) -> DbResult<u32> {
        self.read_version_sync()
    }

    async fn write_version(&self, version: u32) -> DbResult<()> {
        log::debug!("Setting {VERSION_SCHEMA}.version to {version}");
        self.write_version_sync(version)
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;

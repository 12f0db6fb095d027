//! SQLite database backend implementation
//!
//! The migration version is kept in `PRAGMA user_version`, a header field of
//! the database file. It needs no table of its own and survives a migration
//! that drops every table.

use crate::error::{DbError, DbResult};
use crate::traits::{Database, VersionStore};
use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// SQLite database backend
pub struct SqliteBackend {
    conn: Mutex<Connection>,
}

impl SqliteBackend {
    /// Create a new in-memory SQLite connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Self::from_connection(conn)
    }

    /// Open (or create) a SQLite database file
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

    /// Round-trip a trivial query so open failures surface immediately
    fn ping(&self) -> DbResult<()> {
        self.lock()?
            .query_row("SELECT 1", [], |_| Ok(()))
            .map_err(|e| DbError::ConnectionError(e.to_string()))
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        Ok(self.conn.lock()?)
    }

    fn execute_batch_sync(&self, sql: &str) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(sql)
            .map_err(|e| DbError::ExecutionError(e.to_string()))
    }

    fn schema_sql_sync(&self) -> DbResult<Vec<String>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT sql FROM sqlite_master WHERE sql IS NOT NULL AND name NOT LIKE 'sqlite_%'",
        )?;
        let statements = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(statements)
    }

    fn read_version_sync(&self) -> DbResult<u32> {
        let conn = self.lock()?;
        let version = conn
            .pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))
            .optional()
            .map_err(|e| DbError::VersionError(format!("failed to read user_version: {e}")))?;
        Ok(version.unwrap_or(0))
    }

    fn write_version_sync(&self, version: u32) -> DbResult<()> {
        // user_version is a signed 32-bit header field
        if i32::try_from(version).is_err() {
            return Err(DbError::VersionError(format!(
                "version {version} does not fit in user_version"
            )));
        }
        let conn = self.lock()?;
        conn.pragma_update(None, "user_version", version)
            .map_err(|e| DbError::VersionError(format!("failed to write user_version: {e}")))
    }
}

#[async_trait]
impl Database for SqliteBackend {
    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.execute_batch_sync(sql)
    }

    async fn schema_sql(&self) -> DbResult<Vec<String>> {
        self.schema_sql_sync()
    }

    fn db_type(&self) -> &'static str {
        "sqlite"
    }
}

#[async_trait]
impl VersionStore for SqliteBackend {
    async fn read_version(&self) -> DbResult<u32> {
        self.read_version_sync()
    }

    async fn write_version(&self, version: u32) -> DbResult<()> {
        log::debug!("Setting sqlite user_version to {version}");
        self.write_version_sync(version)
    }
}

#[cfg(test)]
#[path = "sqlite_test.rs"]
mod tests;

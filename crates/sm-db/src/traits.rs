//! Database trait definitions

use crate::error::DbResult;
use async_trait::async_trait;

/// Statement executor the migration scripts run through.
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute one or more SQL statements.
    ///
    /// Atomicity across the statements is whatever the backend provides
    /// natively; no outer transaction is added.
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// DDL statements describing the current schema
    async fn schema_sql(&self) -> DbResult<Vec<String>>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}

/// Persisted count of applied migrations.
///
/// The counter lives in the target database itself so that it survives
/// process restarts.
#[async_trait]
pub trait VersionStore: Send + Sync {
    /// Read the current version, 0 if none has been written yet
    async fn read_version(&self) -> DbResult<u32>;

    /// Overwrite the stored version
    async fn write_version(&self, version: u32) -> DbResult<()>;
}

/// A database that can both run scripts and track the migration version.
pub trait Backend: Database + VersionStore {}

impl<T: Database + VersionStore + ?Sized> Backend for T {}

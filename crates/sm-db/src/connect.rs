//! Backend selection from a data source string.

use crate::duckdb::DuckDbBackend;
use crate::error::{DbError, DbResult};
use crate::sqlite::SqliteBackend;
use crate::traits::Backend;
use std::fmt;

/// File extensions that select the DuckDB backend without a prefix.
const DUCKDB_EXTENSIONS: [&str; 2] = [".duckdb", ".ddb"];

/// A data source string resolved to a backend kind and location.
///
/// Accepted forms:
/// - `sqlite:<path>` or `duckdb:<path>`
/// - a path ending in `.duckdb` / `.ddb` (DuckDB)
/// - `:memory:` or any other path (SQLite)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// SQLite database file or `:memory:`
    Sqlite(String),
    /// DuckDB database file or `:memory:`
    DuckDb(String),
}

impl DataSource {
    /// Parse a data source string.
    pub fn parse(dsn: &str) -> DbResult<Self> {
        let dsn = dsn.trim();
        let invalid = |reason: &str| DbError::InvalidDsn {
            dsn: dsn.to_string(),
            reason: reason.to_string(),
        };

        let source = if let Some(path) = dsn.strip_prefix("sqlite:") {
            DataSource::Sqlite(path.to_string())
        } else if let Some(path) = dsn.strip_prefix("duckdb:") {
            DataSource::DuckDb(path.to_string())
        } else if DUCKDB_EXTENSIONS.iter().any(|ext| dsn.ends_with(ext)) {
            DataSource::DuckDb(dsn.to_string())
        } else {
            DataSource::Sqlite(dsn.to_string())
        };

        if source.location().is_empty() {
            return Err(invalid("missing database path"));
        }
        Ok(source)
    }

    /// Path (or `:memory:`) handed to the driver.
    pub fn location(&self) -> &str {
        match self {
            DataSource::Sqlite(path) | DataSource::DuckDb(path) => path,
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Sqlite(path) => write!(f, "sqlite:{path}"),
            DataSource::DuckDb(path) => write!(f, "duckdb:{path}"),
        }
    }
}

/// Open the backend named by `dsn` and confirm it is reachable.
pub fn connect(dsn: &str) -> DbResult<Box<dyn Backend>> {
    let source = DataSource::parse(dsn)?;
    log::debug!("Opening {source}");
    let backend: Box<dyn Backend> = match &source {
        DataSource::Sqlite(path) => Box::new(SqliteBackend::new(path)?),
        DataSource::DuckDb(path) => Box::new(DuckDbBackend::new(path)?),
    };
    Ok(backend)
}

#[cfg(test)]
#[path = "connect_test.rs"]
mod tests;

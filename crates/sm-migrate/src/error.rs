//! Error types for sm-migrate

use sm_core::{CoreError, Direction};
use sm_db::DbError;
use thiserror::Error;

/// Migration driver errors
#[derive(Error, Debug)]
pub enum MigrateError {
    /// File naming, validation, or read failure
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Backend failure outside of script execution
    #[error(transparent)]
    Db(#[from] DbError),

    /// Script execution failed; the version was not changed (M001)
    ///
    /// Statements that ran before the failure are not undone.
    #[error("[M001] Migration {sequence} ({file}) failed running {direction} script, version left at {version}: {source}")]
    ExecutionFailed {
        direction: Direction,
        sequence: u32,
        file: String,
        version: u32,
        #[source]
        source: DbError,
    },

    /// Script succeeded but the new version could not be stored (M002)
    #[error("[M002] {direction} script of {file} ran but version {version} could not be recorded: {source}")]
    VersionNotRecorded {
        direction: Direction,
        file: String,
        version: u32,
        #[source]
        source: DbError,
    },
}

/// Result type alias for MigrateError
pub type MigrateResult<T> = Result<T, MigrateError>;

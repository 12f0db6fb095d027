//! Error types for sm-core

use thiserror::Error;

/// Core error type for stepmig
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: No migration files matched the naming pattern
    #[error("[E004] No migration files in '{dir}', expected names like 001_description.sql")]
    NoMigrationFiles { dir: String },

    /// E005: File name does not start with a valid sequence number
    #[error("[E005] Can't parse sequence number from file name '{name}': {reason}")]
    InvalidFileName { name: String, reason: String },

    /// E006: File sequence has a gap, duplicate, or wrong starting point
    #[error("[E006] Invalid file '{path}': expected sequence number {expected}, found {found}")]
    SequenceMismatch {
        path: String,
        expected: u32,
        found: u32,
    },

    /// E007: Persisted version is ahead of the files on disk
    #[error("[E007] Missing migration files: database is at version {version} but only {available} file(s) exist")]
    MissingFiles { version: u32, available: u32 },

    /// E008: Version does not address a file in the set
    #[error("[E008] No migration file for version {version} ({available} file(s) available)")]
    VersionOutOfRange { version: u32, available: u32 },

    /// E009: Glob pattern error during discovery
    #[error("[E009] Invalid migration directory pattern: {message}")]
    PatternError { message: String },

    /// IO error with the path that caused it
    #[error("[E010] IO error on {path}: {source}")]
    IoWithPath {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Read fault while scanning migration content
    #[error("[E011] Failed to read migration content: {0}")]
    ReadError(#[source] std::io::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<serde_yaml::Error> for CoreError {
    fn from(err: serde_yaml::Error) -> Self {
        CoreError::ConfigParseError {
            message: err.to_string(),
        }
    }
}

//! Migration status report

use serde::Serialize;
use std::fmt;

/// Applied state of one migration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationEntry {
    /// 1-indexed sequence number
    pub sequence: u32,

    /// Path of the migration file
    pub file: String,

    /// Whether the stored version covers this file
    pub applied: bool,
}

/// Stored version plus every known migration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationStatus {
    /// Number of applied migrations
    pub version: u32,

    /// Number of files not yet applied
    pub pending: u32,

    /// All migration files in sequence order
    pub migrations: Vec<MigrationEntry>,
}

impl fmt::Display for MigrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DB version {}", self.version)?;
        for entry in &self.migrations {
            let mark = if entry.applied { '*' } else { ' ' };
            writeln!(f, "[{mark}] {}", entry.file)?;
        }
        Ok(())
    }
}

//! Migration file naming contract.
//!
//! A migration file is named `NNN_description.sql`, where `NNN` is a
//! zero-padded three digit sequence number in the range 001-999.

use crate::error::{CoreError, CoreResult};
use std::fmt;
use std::path::{Path, PathBuf};

/// Width of the zero-padded sequence prefix.
pub const SEQUENCE_WIDTH: usize = 3;

/// Extract the sequence number from a migration file path.
///
/// Only the final path component is inspected. Its first three characters
/// must all be decimal digits and must not form the value zero.
pub fn sequence_number(path: impl AsRef<Path>) -> CoreResult<u32> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let invalid = |reason: &str| CoreError::InvalidFileName {
        name: name.clone(),
        reason: reason.to_string(),
    };

    let prefix = name
        .as_bytes()
        .get(..SEQUENCE_WIDTH)
        .ok_or_else(|| invalid("name is shorter than 3 characters"))?;

    if !prefix.iter().all(u8::is_ascii_digit) {
        return Err(invalid("first 3 characters must be digits"));
    }

    let number = prefix
        .iter()
        .fold(0u32, |acc, digit| acc * 10 + u32::from(digit - b'0'));

    if number == 0 {
        return Err(invalid("sequence number must be greater than zero"));
    }

    Ok(number)
}

/// A single migration file discovered on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFile {
    /// Sequence number parsed from the file name (1-indexed)
    pub sequence: u32,

    /// Location of the file
    pub path: PathBuf,
}

impl MigrationFile {
    /// Build a migration file from its path, parsing the sequence number.
    pub fn from_path(path: impl Into<PathBuf>) -> CoreResult<Self> {
        let path = path.into();
        let sequence = sequence_number(&path)?;
        Ok(Self { sequence, path })
    }

    /// File name without the directory part.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Read the raw file content.
    pub fn read(&self) -> CoreResult<Vec<u8>> {
        std::fs::read(&self.path).map_err(|e| CoreError::IoWithPath {
            path: self.path.display().to_string(),
            source: e,
        })
    }
}

impl fmt::Display for MigrationFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

#[cfg(test)]
#[path = "migration_file_test.rs"]
mod tests;

//! Ordered set of migration files and its sequencing rules.

use crate::error::{CoreError, CoreResult};
use crate::migration_file::{sequence_number, MigrationFile};
use std::path::{Path, PathBuf};

/// Glob pattern for migration file names inside the migration directory.
pub const MIGRATION_FILE_PATTERN: &str = "[0-9][0-9][0-9]_*.sql";

/// Migration files in listing order.
///
/// [`FileSet::discover`] sorts file names lexically, which matches numeric
/// order because the prefix is fixed-width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    paths: Vec<PathBuf>,
}

impl FileSet {
    /// Discover migration files in `dir`.
    ///
    /// Files not matching `NNN_*.sql` are ignored. Finding none at all is an
    /// error.
    pub fn discover(dir: &Path) -> CoreResult<Self> {
        let dir_str = dir.to_str().ok_or_else(|| CoreError::PatternError {
            message: format!("directory path is not valid UTF-8: {}", dir.display()),
        })?;
        let pattern = Path::new(&glob::Pattern::escape(dir_str))
            .join(MIGRATION_FILE_PATTERN)
            .to_string_lossy()
            .into_owned();

        let entries = glob::glob(&pattern).map_err(|e| CoreError::PatternError {
            message: e.to_string(),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| CoreError::IoWithPath {
                path: e.path().display().to_string(),
                source: e.into_error(),
            })?;
            if path.is_file() {
                paths.push(path);
            }
        }

        if paths.is_empty() {
            return Err(CoreError::NoMigrationFiles {
                dir: dir.display().to_string(),
            });
        }

        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        log::debug!("Discovered {} migration file(s) in {}", paths.len(), dir.display());
        Ok(Self { paths })
    }

    /// Build a file set from an existing listing, kept in the given order.
    ///
    /// A misordered listing is reported by [`FileSet::validate`].
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Check that the files form a gapless sequence starting at 1 and that
    /// `version` does not run past the last file.
    ///
    /// Stops at the first problem found.
    pub fn validate(&self, version: u32) -> CoreResult<()> {
        for (index, path) in self.paths.iter().enumerate() {
            let expected = index as u32 + 1;
            let found = sequence_number(path)?;
            if found != expected {
                return Err(CoreError::SequenceMismatch {
                    path: path.display().to_string(),
                    expected,
                    found,
                });
            }
        }

        let available = self.len();
        if version > available {
            return Err(CoreError::MissingFiles { version, available });
        }
        Ok(())
    }

    /// Look up the file for a 1-indexed version.
    pub fn get(&self, version: u32) -> CoreResult<MigrationFile> {
        let out_of_range = || CoreError::VersionOutOfRange {
            version,
            available: self.len(),
        };
        let index = version.checked_sub(1).ok_or_else(out_of_range)? as usize;
        let path = self.paths.get(index).ok_or_else(out_of_range)?;
        MigrationFile::from_path(path.clone())
    }

    /// Number of files in the set.
    pub fn len(&self) -> u32 {
        self.paths.len() as u32
    }

    /// True when the set holds no files.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Iterate over file paths in sequence order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }
}

#[cfg(test)]
#[path = "file_set_test.rs"]
mod tests;

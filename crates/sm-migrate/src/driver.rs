//! Single-step migration driver.
//!
//! The state is the stored version `v` in `0..=N`, where `N` is the number of
//! migration files. `up` runs file `v + 1` and stores `v + 1`; `down` runs
//! file `v` and stores `v - 1`. A failed script leaves `v` untouched.
//! Each call performs at most one step.
//!
//! Scripts are sent to the backend as-is, without an enclosing transaction.
//! If a multi-statement script fails halfway, the statements before the
//! failure stay applied while the version does not move.

use crate::error::{MigrateError, MigrateResult};
use crate::status::{MigrationEntry, MigrationStatus};
use sm_core::{parse_migration, Direction, FileSet, MigrationFile};
use sm_db::{Backend, Database, VersionStore};

/// Result of one `up` or `down` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The next migration was applied
    Applied {
        from: u32,
        to: u32,
        file: MigrationFile,
        script: String,
    },
    /// The latest migration was reverted
    Reverted {
        from: u32,
        to: u32,
        file: MigrationFile,
        script: String,
    },
    /// Every file is already applied; nothing ran
    AlreadyLatest { version: u32 },
    /// Nothing is applied; nothing ran
    AlreadyLowest,
}

impl StepOutcome {
    /// Version stored after this step.
    pub fn version(&self) -> u32 {
        match self {
            StepOutcome::Applied { to, .. } | StepOutcome::Reverted { to, .. } => *to,
            StepOutcome::AlreadyLatest { version } => *version,
            StepOutcome::AlreadyLowest => 0,
        }
    }

    /// True when no script ran and the version did not change.
    pub fn is_noop(&self) -> bool {
        matches!(
            self,
            StepOutcome::AlreadyLatest { .. } | StepOutcome::AlreadyLowest
        )
    }
}

/// Applies or reverts migration files one at a time.
pub struct Migrator<'a> {
    backend: &'a dyn Backend,
    files: FileSet,
}

impl<'a> Migrator<'a> {
    /// Create a driver after checking the file set against the stored version.
    ///
    /// Fails if the files are not numbered 1..=N without gaps, or if the
    /// stored version is greater than N.
    pub async fn new(backend: &'a dyn Backend, files: FileSet) -> MigrateResult<Self> {
        let version = backend.read_version().await?;
        files.validate(version)?;
        log::debug!(
            "{} database at version {version}, {} migration file(s)",
            backend.db_type(),
            files.len()
        );
        Ok(Self { backend, files })
    }

    /// The validated file set.
    pub fn files(&self) -> &FileSet {
        &self.files
    }

    /// Version currently stored in the database.
    pub async fn current_version(&self) -> MigrateResult<u32> {
        Ok(self.backend.read_version().await?)
    }

    /// Apply the next unapplied migration, if any.
    pub async fn up(&self) -> MigrateResult<StepOutcome> {
        let version = self.current_version().await?;
        if version >= self.files.len() {
            log::info!("Already at latest migration {version}");
            return Ok(StepOutcome::AlreadyLatest { version });
        }

        let target = version + 1;
        let file = self.files.get(target)?;
        let script = self.run_script(Direction::Up, &file, version).await?;
        self.record(Direction::Up, &file, target).await?;

        log::info!("Applied migration {target} ({})", file.file_name());
        Ok(StepOutcome::Applied {
            from: version,
            to: target,
            file,
            script,
        })
    }

    /// Revert the most recently applied migration, if any.
    pub async fn down(&self) -> MigrateResult<StepOutcome> {
        let version = self.current_version().await?;
        if version == 0 {
            log::info!("Already at lowest migration");
            return Ok(StepOutcome::AlreadyLowest);
        }

        let target = version - 1;
        let file = self.files.get(version)?;
        let script = self.run_script(Direction::Down, &file, version).await?;
        self.record(Direction::Down, &file, target).await?;

        log::info!("Reverted migration {version} ({})", file.file_name());
        Ok(StepOutcome::Reverted {
            from: version,
            to: target,
            file,
            script,
        })
    }

    /// Current version and the applied state of every file.
    pub async fn status(&self) -> MigrateResult<MigrationStatus> {
        let version = self.current_version().await?;
        let migrations = self
            .files
            .iter()
            .enumerate()
            .map(|(index, path)| {
                let sequence = index as u32 + 1;
                MigrationEntry {
                    sequence,
                    file: path.display().to_string(),
                    applied: sequence <= version,
                }
            })
            .collect();

        Ok(MigrationStatus {
            version,
            pending: self.files.len().saturating_sub(version),
            migrations,
        })
    }

    /// Parse `file` and execute the script for `direction`.
    async fn run_script(
        &self,
        direction: Direction,
        file: &MigrationFile,
        version: u32,
    ) -> MigrateResult<String> {
        let parsed = parse_migration(&file.read()?)?;
        let script = parsed.script(direction).to_string();

        if script.trim().is_empty() {
            log::warn!(
                "{} has an empty {direction} section, nothing to execute",
                file.file_name()
            );
            return Ok(script);
        }

        log::debug!("Running {direction} script of {}", file.file_name());
        self.backend
            .execute_batch(&script)
            .await
            .map_err(|source| MigrateError::ExecutionFailed {
                direction,
                sequence: file.sequence,
                file: file.file_name(),
                version,
                source,
            })?;
        Ok(script)
    }

    async fn record(
        &self,
        direction: Direction,
        file: &MigrationFile,
        version: u32,
    ) -> MigrateResult<()> {
        self.backend
            .write_version(version)
            .await
            .map_err(|source| MigrateError::VersionNotRecorded {
                direction,
                file: file.file_name(),
                version,
                source,
            })
    }
}

#[cfg(test)]
#[path = "driver_test.rs"]
mod tests;

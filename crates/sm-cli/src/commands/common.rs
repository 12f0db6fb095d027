//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use clap::CommandFactory;
use sm_core::{Config, FileSet, Settings};
use sm_db::{connect, Backend};
use sm_migrate::StepOutcome;
use std::fmt;
use std::path::Path;

use crate::cli::{Cli, GlobalArgs};

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Control flow only; the message was already printed.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Load the config file and apply command-line overrides.
///
/// A missing data source prints the usage and exits with code 1.
pub(crate) fn load_settings(global: &GlobalArgs) -> Result<Settings> {
    let config = match &global.config {
        Some(path) => Config::load(path).context("Failed to load configuration file")?,
        None => Config::load_from_dir(Path::new("."))
            .context("Failed to load stepmig.yml")?,
    };

    match config.resolve(global.dir.as_deref(), global.dsn.as_deref()) {
        Ok(settings) => Ok(settings),
        Err(e) => {
            eprintln!("{e}\n");
            eprintln!("{}", Cli::command().render_help());
            Err(ExitCode(1).into())
        }
    }
}

/// Connection and migration files for one invocation.
pub(crate) struct MigrationContext {
    /// Open database handle, released when the context drops
    pub backend: Box<dyn Backend>,

    /// Discovered migration files
    pub files: FileSet,
}

impl MigrationContext {
    /// Resolve settings, open the database, and discover migration files.
    pub(crate) fn open(global: &GlobalArgs) -> Result<Self> {
        let settings = load_settings(global)?;

        let backend = connect(&settings.dsn)
            .with_context(|| format!("Failed to open database '{}'", settings.dsn))?;

        let files = FileSet::discover(&settings.dir)
            .with_context(|| format!("Failed to read migrations from {}", settings.dir.display()))?;

        log::info!(
            "{} migration file(s) in {}",
            files.len(),
            settings.dir.display()
        );

        Ok(Self { backend, files })
    }
}

/// Print what a single `up` or `down` step did.
pub(crate) fn print_outcome(outcome: &StepOutcome) {
    match outcome {
        StepOutcome::Applied { to, file, script, .. } => {
            println!("Migration {to} up: {}", file.file_name());
            println!("{script}");
        }
        StepOutcome::Reverted { from, file, script, .. } => {
            println!("Migration {from} down: {}", file.file_name());
            println!("{script}");
        }
        StepOutcome::AlreadyLatest { version } => {
            println!("Already at latest migration {version}");
        }
        StepOutcome::AlreadyLowest => {
            println!("Already at lowest migration 0");
        }
    }
}

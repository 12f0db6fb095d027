//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// stepmig - apply or revert numbered SQL migrations one step at a time
#[derive(Parser, Debug)]
#[command(name = "stepmig")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the migration folder [default: .]
    #[arg(short, long, global = true)]
    pub dir: Option<PathBuf>,

    /// Data source: a SQLite path, `:memory:`, `sqlite:<path>`, `duckdb:<path>`
    /// or a path ending in .duckdb
    #[arg(long, global = true, env = "STEPMIG_DSN")]
    pub dsn: Option<String>,

    /// Config file path [default: ./stepmig.yml if present]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply the next pending migration
    Up,

    /// Revert the most recently applied migration
    Down,

    /// Show the database version and which migrations are applied
    Show(ShowArgs),

    /// Print the current database schema
    Schema,
}

/// Arguments for the show command
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: ShowOutput,
}

/// Show output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowOutput {
    /// One line per migration file
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

//! sm-core - Core library for stepmig
//!
//! This crate provides the migration file naming contract, file set discovery
//! and validation, the UP/DOWN section parser, and the optional YAML
//! configuration file shared by the other stepmig crates.

pub mod config;
pub mod error;
pub mod file_set;
pub mod migration_file;
pub mod parser;

pub use config::{Config, Settings};
pub use error::{CoreError, CoreResult};
pub use file_set::FileSet;
pub use migration_file::{sequence_number, MigrationFile};
pub use parser::{parse_migration, parse_migration_reader, Direction, ParsedMigration, Section};

//! sm-db - Database abstraction layer for stepmig
//!
//! This crate provides the `Database` and `VersionStore` traits and their
//! SQLite and DuckDB implementations, plus [`connect`] to pick a backend from
//! a data source string.

pub mod connect;
pub mod duckdb;
pub mod error;
pub mod sqlite;
pub mod traits;

pub use connect::{connect, DataSource};
pub use self::duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use sqlite::SqliteBackend;
pub use traits::{Backend, Database, VersionStore};

//! sm-migrate - Migration driver for stepmig
//!
//! [`Migrator`] moves the persisted version one step at a time: `up` applies
//! the next file's UP script, `down` reverts the latest applied file with its
//! DOWN script. The file set is validated against the stored version before
//! any step runs.

pub mod driver;
pub mod error;
pub mod status;

pub use driver::{Migrator, StepOutcome};
pub use error::{MigrateError, MigrateResult};
pub use status::{MigrationEntry, MigrationStatus};

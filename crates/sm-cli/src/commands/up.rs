//! Up command implementation

use anyhow::{Context, Result};
use sm_migrate::Migrator;

use crate::cli::GlobalArgs;
use crate::commands::common::{print_outcome, MigrationContext};

/// Execute the up command: apply at most one pending migration
pub async fn execute(global: &GlobalArgs) -> Result<()> {
    let ctx = MigrationContext::open(global)?;
    let migrator = Migrator::new(ctx.backend.as_ref(), ctx.files)
        .await
        .context("Migration files validation failed")?;

    let outcome = migrator.up().await?;
    print_outcome(&outcome);
    Ok(())
}

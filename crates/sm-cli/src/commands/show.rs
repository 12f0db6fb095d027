//! Show command implementation

use anyhow::{Context, Result};
use sm_migrate::Migrator;

use crate::cli::{GlobalArgs, ShowArgs, ShowOutput};
use crate::commands::common::MigrationContext;

/// Execute the show command
pub async fn execute(args: &ShowArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = MigrationContext::open(global)?;
    let migrator = Migrator::new(ctx.backend.as_ref(), ctx.files)
        .await
        .context("Migration files validation failed")?;

    let status = migrator.status().await?;
    match args.output {
        ShowOutput::Table => print!("{status}"),
        ShowOutput::Json => println!("{}", serde_json::to_string_pretty(&status)?),
    }
    Ok(())
}

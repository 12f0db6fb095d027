//! Schema command implementation

use anyhow::{Context, Result};
use sm_db::Database;
use sm_migrate::Migrator;

use crate::cli::GlobalArgs;
use crate::commands::common::MigrationContext;

/// Execute the schema command: print the DDL of the current database
pub async fn execute(global: &GlobalArgs) -> Result<()> {
    let ctx = MigrationContext::open(global)?;
    // Same startup checks as the other commands
    Migrator::new(ctx.backend.as_ref(), ctx.files.clone())
        .await
        .context("Migration files validation failed")?;

    let statements = ctx
        .backend
        .schema_sql()
        .await
        .context("Failed to read database schema")?;

    if statements.is_empty() {
        log::info!("{} database has no schema objects", ctx.backend.db_type());
    }
    for sql in statements {
        println!("{};", sql.trim_end_matches(';'));
    }
    Ok(())
}

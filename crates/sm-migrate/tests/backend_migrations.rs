//! End-to-end driver tests against the real SQLite and DuckDB backends.

use sm_core::FileSet;
use sm_db::{connect, Backend, Database, DuckDbBackend, SqliteBackend, VersionStore};
use sm_migrate::{MigrateError, Migrator, StepOutcome};
use std::fs;
use tempfile::{tempdir, TempDir};

fn write_migrations(files: &[(&str, &str)]) -> TempDir {
    let dir = tempdir().unwrap();
    for (name, content) in files {
        fs::write(dir.path().join(name), content).unwrap();
    }
    dir
}

fn shop_migrations() -> TempDir {
    write_migrations(&[
        (
            "001_create_customers.sql",
            "-- UP
             CREATE TABLE customers (id INTEGER PRIMARY KEY, name TEXT);
             -- DOWN
             DROP TABLE customers;",
        ),
        (
            "002_create_orders.sql",
            "-- UP
             CREATE TABLE orders (id INTEGER PRIMARY KEY, customer_id INTEGER);
             CREATE INDEX idx_orders_customer ON orders(customer_id);
             -- DOWN
             DROP INDEX idx_orders_customer;
             DROP TABLE orders;",
        ),
    ])
}

async fn table_count(backend: &dyn Backend, needle: &str) -> usize {
    backend
        .schema_sql()
        .await
        .unwrap()
        .iter()
        .filter(|sql| sql.contains(needle))
        .count()
}

#[tokio::test]
async fn test_sqlite_full_cycle() {
    let dir = shop_migrations();
    let backend = SqliteBackend::in_memory().unwrap();
    let files = FileSet::discover(dir.path()).unwrap();
    let migrator = Migrator::new(&backend, files).await.unwrap();

    assert_eq!(migrator.up().await.unwrap().version(), 1);
    assert_eq!(table_count(&backend, "customers").await, 1);

    assert_eq!(migrator.up().await.unwrap().version(), 2);
    assert_eq!(table_count(&backend, "orders").await, 2);

    assert!(migrator.up().await.unwrap().is_noop());
    assert_eq!(backend.read_version().await.unwrap(), 2);

    assert_eq!(migrator.down().await.unwrap().version(), 1);
    assert_eq!(table_count(&backend, "orders").await, 0);

    assert_eq!(migrator.down().await.unwrap().version(), 0);
    assert!(backend.schema_sql().await.unwrap().is_empty());
    assert_eq!(migrator.down().await.unwrap(), StepOutcome::AlreadyLowest);
}

#[tokio::test]
async fn test_sqlite_version_persists_between_runs() {
    let dir = shop_migrations();
    let db_dir = tempdir().unwrap();
    let dsn = db_dir.path().join("shop.sqlite").display().to_string();

    {
        let backend = connect(&dsn).unwrap();
        let migrator = Migrator::new(backend.as_ref(), FileSet::discover(dir.path()).unwrap())
            .await
            .unwrap();
        migrator.up().await.unwrap();
    }

    let backend = connect(&dsn).unwrap();
    let migrator = Migrator::new(backend.as_ref(), FileSet::discover(dir.path()).unwrap())
        .await
        .unwrap();
    assert_eq!(migrator.current_version().await.unwrap(), 1);

    let outcome = migrator.up().await.unwrap();
    assert!(matches!(outcome, StepOutcome::Applied { from: 1, to: 2, .. }));
}

#[tokio::test]
async fn test_sqlite_partial_failure_keeps_earlier_statements() {
    let dir = write_migrations(&[(
        "001_half.sql",
        "-- UP
         CREATE TABLE first_half (id INTEGER);
         CREATE TABLE broken (;
         -- DOWN
         DROP TABLE first_half;",
    )]);
    let backend = SqliteBackend::in_memory().unwrap();
    let migrator = Migrator::new(&backend, FileSet::discover(dir.path()).unwrap())
        .await
        .unwrap();

    let err = migrator.up().await.unwrap_err();
    assert!(matches!(err, MigrateError::ExecutionFailed { version: 0, .. }));
    assert_eq!(backend.read_version().await.unwrap(), 0);
    // No outer transaction: the first statement stays applied
    assert_eq!(table_count(&backend, "first_half").await, 1);
}

#[tokio::test]
async fn test_sqlite_rejects_files_missing_for_stored_version() {
    let dir = shop_migrations();
    let backend = SqliteBackend::in_memory().unwrap();
    backend.write_version(5).await.unwrap();

    let result = Migrator::new(&backend, FileSet::discover(dir.path()).unwrap()).await;
    assert!(matches!(result, Err(MigrateError::Core(_))));
}

#[tokio::test]
async fn test_duckdb_full_cycle() {
    let dir = write_migrations(&[
        (
            "001_events.sql",
            "-- UP\nCREATE TABLE events (id INTEGER, kind VARCHAR);\n-- DOWN\nDROP TABLE events;",
        ),
        (
            "002_event_view.sql",
            "-- UP\nCREATE VIEW event_kinds AS SELECT DISTINCT kind FROM events;\n-- DOWN\nDROP VIEW event_kinds;",
        ),
    ]);
    let backend = DuckDbBackend::in_memory().unwrap();
    let migrator = Migrator::new(&backend, FileSet::discover(dir.path()).unwrap())
        .await
        .unwrap();

    migrator.up().await.unwrap();
    migrator.up().await.unwrap();
    assert_eq!(backend.read_version().await.unwrap(), 2);
    assert_eq!(table_count(&backend, "event_kinds").await, 1);

    migrator.down().await.unwrap();
    assert_eq!(backend.read_version().await.unwrap(), 1);
    assert_eq!(table_count(&backend, "event_kinds").await, 0);
}

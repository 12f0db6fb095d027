use super::*;
use crate::traits::{Database, VersionStore};

#[test]
fn test_parse_prefixed_sources() {
    assert_eq!(
        DataSource::parse("sqlite:app.db").unwrap(),
        DataSource::Sqlite("app.db".to_string())
    );
    assert_eq!(
        DataSource::parse("duckdb:warehouse.db").unwrap(),
        DataSource::DuckDb("warehouse.db".to_string())
    );
}

#[test]
fn test_parse_by_extension() {
    assert_eq!(
        DataSource::parse("data/warehouse.duckdb").unwrap(),
        DataSource::DuckDb("data/warehouse.duckdb".to_string())
    );
    assert_eq!(
        DataSource::parse("local.ddb").unwrap(),
        DataSource::DuckDb("local.ddb".to_string())
    );
    assert_eq!(
        DataSource::parse("app.sqlite3").unwrap(),
        DataSource::Sqlite("app.sqlite3".to_string())
    );
}

#[test]
fn test_parse_memory() {
    assert_eq!(
        DataSource::parse(":memory:").unwrap(),
        DataSource::Sqlite(":memory:".to_string())
    );
    assert_eq!(
        DataSource::parse("duckdb::memory:").unwrap(),
        DataSource::DuckDb(":memory:".to_string())
    );
}

#[test]
fn test_parse_empty_rejected() {
    assert!(matches!(
        DataSource::parse("").unwrap_err(),
        DbError::InvalidDsn { .. }
    ));
    assert!(DataSource::parse("sqlite:").is_err());
    assert!(DataSource::parse("  ").is_err());
}

#[test]
fn test_display_round_trips() {
    let source = DataSource::parse("x.duckdb").unwrap();
    assert_eq!(source.to_string(), "duckdb:x.duckdb");
    assert_eq!(DataSource::parse(&source.to_string()).unwrap(), source);
}

#[tokio::test]
async fn test_connect_selects_backend() {
    let sqlite = connect(":memory:").unwrap();
    assert_eq!(sqlite.db_type(), "sqlite");

    let duck = connect("duckdb::memory:").unwrap();
    assert_eq!(duck.db_type(), "duckdb");
    assert_eq!(duck.read_version().await.unwrap(), 0);
}

use super::*;

#[tokio::test]
async fn test_in_memory() {
    let db = SqliteBackend::in_memory().unwrap();
    assert_eq!(db.db_type(), "sqlite");
}

#[tokio::test]
async fn test_fresh_database_reads_version_zero() {
    let db = SqliteBackend::in_memory().unwrap();
    assert_eq!(db.read_version().await.unwrap(), 0);
}

#[tokio::test]
async fn test_version_round_trip() {
    let db = SqliteBackend::in_memory().unwrap();
    db.write_version(42).await.unwrap();
    assert_eq!(db.read_version().await.unwrap(), 42);

    db.write_version(0).await.unwrap();
    assert_eq!(db.read_version().await.unwrap(), 0);
}

#[tokio::test]
async fn test_version_rejects_values_past_i32() {
    let db = SqliteBackend::in_memory().unwrap();
    let err = db.write_version(u32::MAX).await.unwrap_err();
    assert!(matches!(err, DbError::VersionError(_)));
    assert_eq!(db.read_version().await.unwrap(), 0);
}

#[tokio::test]
async fn test_version_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.sqlite");
    {
        let db = SqliteBackend::from_path(&path).unwrap();
        db.write_version(7).await.unwrap();
    }
    let db = SqliteBackend::from_path(&path).unwrap();
    assert_eq!(db.read_version().await.unwrap(), 7);
}

#[tokio::test]
async fn test_version_survives_dropping_tables() {
    let db = SqliteBackend::in_memory().unwrap();
    db.execute_batch("CREATE TABLE a (id INTEGER); CREATE TABLE b (id INTEGER);")
        .await
        .unwrap();
    db.write_version(2).await.unwrap();
    db.execute_batch("DROP TABLE a; DROP TABLE b;").await.unwrap();
    assert_eq!(db.read_version().await.unwrap(), 2);
}

#[tokio::test]
async fn test_execute_batch_and_schema() {
    let db = SqliteBackend::in_memory().unwrap();
    db.execute_batch(
        "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT);\nCREATE INDEX idx_users_name ON users(name);",
    )
    .await
    .unwrap();

    let schema = db.schema_sql().await.unwrap();
    assert_eq!(schema.len(), 2);
    assert!(schema[0].starts_with("CREATE TABLE users"));
    assert!(schema[1].starts_with("CREATE INDEX idx_users_name"));
}

#[tokio::test]
async fn test_execute_batch_error() {
    let db = SqliteBackend::in_memory().unwrap();
    let err = db.execute_batch("CREATE TABLE broken (").await.unwrap_err();
    assert!(matches!(err, DbError::ExecutionError(_)));
}

#[tokio::test]
async fn test_open_in_missing_directory_fails() {
    let result = SqliteBackend::new("/nonexistent/dir/app.sqlite");
    assert!(matches!(result, Err(DbError::ConnectionError(_))));
}

use super::*;

#[test]
fn test_sequence_number_plain_digits() {
    assert_eq!(sequence_number("042").unwrap(), 42);
}

#[test]
fn test_sequence_number_uses_base_name() {
    assert_eq!(sequence_number("migrations/001_test.sql").unwrap(), 1);
    assert_eq!(sequence_number("001_test.sql").unwrap(), 1);
}

#[test]
fn test_sequence_number_upper_bound() {
    assert_eq!(sequence_number("999_last.sql").unwrap(), 999);
}

#[test]
fn test_sequence_number_rejects_zero() {
    let err = sequence_number("000").unwrap_err();
    assert!(matches!(err, CoreError::InvalidFileName { .. }));
    assert!(err.to_string().contains("greater than zero"));
}

#[test]
fn test_sequence_number_rejects_signs() {
    assert!(sequence_number("-005").is_err());
    assert!(sequence_number("+05_add.sql").is_err());
}

#[test]
fn test_sequence_number_rejects_letters() {
    assert!(sequence_number("abc").is_err());
    assert!(sequence_number("aaa_test.sql").is_err());
    assert!(sequence_number("01a_test.sql").is_err());
}

#[test]
fn test_sequence_number_rejects_short_names() {
    assert!(sequence_number("").is_err());
    assert!(sequence_number("7").is_err());
    assert!(sequence_number("dir/12").is_err());
}

#[test]
fn test_sequence_number_ignores_digits_in_directory() {
    assert!(sequence_number("123/abc_test.sql").is_err());
}

#[test]
fn test_sequence_number_multibyte_prefix() {
    // Must not panic on a non-ASCII boundary inside the first 3 bytes
    assert!(sequence_number("é1_test.sql").is_err());
}

#[test]
fn test_migration_file_from_path() {
    let file = MigrationFile::from_path("db/003_add_index.sql").unwrap();
    assert_eq!(file.sequence, 3);
    assert_eq!(file.file_name(), "003_add_index.sql");
}

#[test]
fn test_migration_file_read_missing() {
    let file = MigrationFile::from_path("/nonexistent/dir/001_missing.sql").unwrap();
    let err = file.read().unwrap_err();
    assert!(matches!(err, CoreError::IoWithPath { .. }));
}

#[test]
fn test_migration_file_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("001_init.sql");
    std::fs::write(&path, "-- UP\ncreate table t (id int);").unwrap();

    let file = MigrationFile::from_path(&path).unwrap();
    assert_eq!(file.read().unwrap(), b"-- UP\ncreate table t (id int);");
}

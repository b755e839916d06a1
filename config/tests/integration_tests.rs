use std::path::PathBuf;

use pocketbook_config::{Config, ConfigError};

#[test]
fn test_load_from_handwritten_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pocketbook.yml");
    std::fs::write(&path, "data_dir: /data\nlogging:\n  level: info\n").unwrap();

    let config = Config::load_or_default(Some(&path)).unwrap();
    assert_eq!(config.data_dir, PathBuf::from("/data"));
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.databases.expenses, "expenses");
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(dir.path().join("nope.yml")).unwrap_err();
    assert!(matches!(err, ConfigError::IoError { .. }));
    assert!(err.to_string().contains("nope.yml"));
}

#[test]
fn test_malformed_file_is_yaml_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.yml");
    std::fs::write(&path, "data_dir: [unclosed\n").unwrap();

    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::YamlError { .. }));
}

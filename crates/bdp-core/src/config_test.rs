use super::*;
use tempfile::TempDir;

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.datasets_path, "datasets");
    assert_eq!(config.database.path, "bdp.duckdb");
    assert_eq!(config.metadata_namespace, "dataset");
    assert_eq!(config.script_interpreter, "bash");
}

#[test]
fn test_parse_empty_document_uses_defaults() {
    let config: Config = serde_yaml::from_str("{}").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
datasets_path: assets
database:
  path: ./warehouse.duckdb
metadata_namespace: asset
script_interpreter: sh
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.datasets_path, "assets");
    assert_eq!(config.database.path, "./warehouse.duckdb");
    assert_eq!(config.metadata_namespace, "asset");
    assert_eq!(config.script_interpreter, "sh");
}

#[test]
fn test_unknown_fields_rejected() {
    let result: Result<Config, _> = serde_yaml::from_str("model_paths: [models]");
    assert!(result.is_err());
}

#[test]
fn test_load_from_dir_without_file() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_from_dir_reads_yaml() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("bdp.yaml"), "datasets_path: data\n").unwrap();
    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.datasets_path, "data");
}

#[test]
fn test_load_rejects_bad_namespace() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("bdp.yml"), "metadata_namespace: my-ns\n").unwrap();
    let err = Config::load_from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::ConfigInvalid { .. }));
}

#[test]
fn test_load_reports_parse_errors_with_path() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("bdp.yml"), "database: [not, a, map]\n").unwrap();
    let err = Config::load_from_dir(dir.path()).unwrap_err();
    match err {
        CoreError::ConfigParseError { path, .. } => assert!(path.ends_with("bdp.yml")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_database_path_resolution() {
    let root = std::path::PathBuf::from("/tmp/project");
    assert_eq!(
        resolve_db_path("bdp.duckdb", &root),
        root.join("bdp.duckdb").display().to_string()
    );
    assert_eq!(resolve_db_path(":memory:", &root), ":memory:");
    assert_eq!(resolve_db_path("/data/x.duckdb", &root), "/data/x.duckdb");
}

use super::*;

fn build(kind: AssetKind, source: &str) -> CoreResult<Asset> {
    Asset::from_source(
        PathBuf::from("datasets/raw/file"),
        kind,
        source.to_string(),
        "dataset",
    )
}

#[test]
fn test_kind_from_extension() {
    assert_eq!(AssetKind::from_path(Path::new("a/b.sql")), Some(AssetKind::Query));
    assert_eq!(AssetKind::from_path(Path::new("a/b.rs")), Some(AssetKind::Transform));
    assert_eq!(AssetKind::from_path(Path::new("a/b.sh")), Some(AssetKind::Script));
    assert_eq!(AssetKind::from_path(Path::new("a/b.py")), None);
    assert_eq!(AssetKind::from_path(Path::new("a/README")), None);
}

#[test]
fn test_build_query_asset() {
    let asset = build(
        AssetKind::Query,
        "-- dataset.name = orders\n-- dataset.schema = raw\n-- dataset.description = All orders\nselect * from range(3)\n",
    )
    .unwrap();

    assert_eq!(asset.name, "raw.orders");
    assert_eq!(asset.schema(), "raw");
    assert_eq!(asset.table(), "orders");
    assert_eq!(asset.kind, AssetKind::Query);
    assert_eq!(asset.description.as_deref(), Some("All orders"));
    assert!(asset.depends.is_empty());
    assert_eq!(asset.body(), "select * from range(3)\n");
}

#[test]
fn test_name_is_schema_dot_table() {
    let asset = build(
        AssetKind::Script,
        "#!/bin/bash\n# dataset.schema = staging\n# dataset.name = events\necho\n",
    )
    .unwrap();
    assert_eq!(asset.name.as_str(), format!("{}.{}", asset.schema(), asset.table()));
}

#[test]
fn test_depends_split_trimmed_and_deduplicated() {
    let asset = build(
        AssetKind::Transform,
        "// dataset.name = c\n// dataset.schema = raw\n// dataset.depends = raw.b,  raw.a ,\n// dataset.depends = raw.b\nfn c() {}\n",
    )
    .unwrap();
    assert_eq!(asset.depends, vec!["raw.b", "raw.a"]);
}

#[test]
fn test_missing_metadata() {
    let err = build(AssetKind::Query, "select 1\n").unwrap_err();
    assert!(matches!(err, CoreError::MissingMetadata { .. }));
}

#[test]
fn test_missing_required_keys() {
    let err = build(AssetKind::Query, "-- dataset.name = a\nselect 1").unwrap_err();
    match err {
        CoreError::MissingMetadataKey { key, path } => {
            assert_eq!(key, "dataset.schema");
            assert_eq!(path, "datasets/raw/file");
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = build(AssetKind::Query, "-- dataset.schema = raw\nselect 1").unwrap_err();
    assert!(err.to_string().contains("dataset.name"));
}

#[test]
fn test_duplicate_required_key() {
    let err = build(
        AssetKind::Query,
        "-- dataset.name = a\n-- dataset.name = b\n-- dataset.schema = raw\nselect 1",
    )
    .unwrap_err();
    assert!(matches!(err, CoreError::DuplicateMetadataKey { .. }));
}

#[test]
fn test_empty_required_value() {
    let err = build(AssetKind::Query, "-- dataset.name =\n-- dataset.schema = raw\nselect 1")
        .unwrap_err();
    assert!(matches!(err, CoreError::EmptyMetadataValue { .. }));
}

#[test]
fn test_invalid_identifiers() {
    let err = build(AssetKind::Query, "-- dataset.name = 1st\n-- dataset.schema = raw\nselect 1")
        .unwrap_err();
    assert!(matches!(err, CoreError::InvalidIdentifier { ref label, .. } if label == "table"));

    let err = build(
        AssetKind::Query,
        "-- dataset.name = a\n-- dataset.schema = raw-data\nselect 1",
    )
    .unwrap_err();
    assert!(matches!(err, CoreError::InvalidIdentifier { ref label, .. } if label == "schema"));
}

#[test]
fn test_invalid_dependency_references() {
    for bad in ["orders", "a.b.c", "raw.", "raw.x y"] {
        let source = format!(
            "-- dataset.name = a\n-- dataset.schema = raw\n-- dataset.depends = {}\nselect 1",
            bad
        );
        let err = build(AssetKind::Query, &source).unwrap_err();
        assert!(
            matches!(
                err,
                CoreError::InvalidDependency { .. } | CoreError::InvalidIdentifier { .. }
            ),
            "{bad} should be rejected, got {err}"
        );
    }
}

#[test]
fn test_parse_dependencies_keeps_duplicates() {
    let values = vec!["raw.a, raw.b".to_string(), "raw.a".to_string(), String::new()];
    let deps = parse_dependencies(&values, Path::new("x.sql")).unwrap();
    assert_eq!(deps, vec!["raw.a", "raw.b", "raw.a"]);
}

#[test]
fn test_from_file_rejects_unknown_extension() {
    let err = Asset::from_file(Path::new("datasets/notes.txt"), "dataset").unwrap_err();
    assert!(matches!(err, CoreError::UnsupportedAsset { .. }));
}

use super::*;
use std::fs;
use tempfile::TempDir;

fn write(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn chain_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "datasets/raw/a.sql",
        "-- dataset.name = a\n-- dataset.schema = raw\nSELECT 1 AS x\n",
    );
    write(
        dir.path(),
        "datasets/raw/b.rs",
        "// dataset.name = b\n// dataset.schema = raw\n// dataset.depends = raw.a\npub fn b() {}\n",
    );
    write(
        dir.path(),
        "datasets/raw/c.sh",
        "#!/usr/bin/env bash\n# dataset.name = c\n# dataset.schema = raw\n# dataset.depends = raw.b\necho hi\n",
    );
    dir
}

fn order(plan: &Plan) -> Vec<&str> {
    plan.order.iter().map(AssetName::as_str).collect()
}

#[test]
fn test_load_discovers_assets() {
    let dir = chain_project();
    let project = Project::load(dir.path()).unwrap();
    assert_eq!(project.assets.len(), 3);
    assert_eq!(project.root, dir.path());
    let b = project.assets.get("raw.b").unwrap();
    assert_eq!(project.relative_path(b), Path::new("raw/b.rs"));
}

#[test]
fn test_load_walks_up_to_root() {
    let dir = chain_project();
    let nested = dir.path().join("datasets").join("raw");
    let project = Project::load(&nested).unwrap();
    assert_eq!(project.root, dir.path());
}

#[test]
fn test_load_uses_configured_datasets_path() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "bdp.yml", "datasets_path: assets\n");
    write(
        dir.path(),
        "assets/s/t.sql",
        "-- dataset.name = t\n-- dataset.schema = s\nSELECT 1\n",
    );
    let project = Project::load(dir.path()).unwrap();
    assert!(project.assets.get("s.t").is_some());
}

#[test]
fn test_load_without_datasets_fails() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "bdp.yml", "datasets_path: nowhere\n");
    let err = Project::load(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::DatasetsNotFound { .. }));
}

#[test]
fn test_plan_selection_closure_orders_chain() {
    let dir = chain_project();
    let project = Project::load(dir.path()).unwrap();

    let plan = project
        .plan(&Selection::Names(vec!["raw.c".to_string()]))
        .unwrap();
    assert_eq!(order(&plan), vec!["raw.a", "raw.b", "raw.c"]);

    let plan = project.plan(&Selection::All).unwrap();
    assert_eq!(order(&plan), vec!["raw.a", "raw.b", "raw.c"]);
}

#[test]
fn test_plan_partial_selection() {
    let dir = chain_project();
    let project = Project::load(dir.path()).unwrap();
    let plan = project
        .plan(&Selection::Names(vec!["raw.a".to_string()]))
        .unwrap();
    assert_eq!(order(&plan), vec!["raw.a"]);
    assert_eq!(plan.dependencies.len(), 3);
}

#[test]
fn test_plan_rejects_unknown_dependency_outside_selection() {
    let dir = chain_project();
    write(
        dir.path(),
        "datasets/raw/d.sql",
        "-- dataset.name = d\n-- dataset.schema = raw\n-- dataset.depends = raw.ghost\nSELECT 1\n",
    );
    let project = Project::load(dir.path()).unwrap();
    let err = project
        .plan(&Selection::Names(vec!["raw.a".to_string()]))
        .unwrap_err();
    match err {
        CoreError::UnknownDependency {
            asset, dependency, ..
        } => {
            assert_eq!(asset, "raw.d");
            assert_eq!(dependency, "raw.ghost");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_database_path_defaults_under_root() {
    let dir = chain_project();
    let project = Project::load(dir.path()).unwrap();
    assert_eq!(
        project.database_path(),
        dir.path().join("bdp.duckdb").display().to_string()
    );
}

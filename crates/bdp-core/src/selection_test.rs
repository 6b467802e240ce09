use super::*;

fn name(s: &str) -> AssetName {
    AssetName::parse(s).unwrap()
}

fn chain() -> DependencyMap {
    let mut map = DependencyMap::new();
    map.insert(name("raw.z"), vec![]);
    map.insert(name("raw.y"), vec![name("raw.z")]);
    map.insert(name("raw.x"), vec![name("raw.y")]);
    map.insert(name("raw.other"), vec![]);
    map
}

fn names(set: &BTreeSet<AssetName>) -> Vec<&str> {
    set.iter().map(|n| n.as_str()).collect()
}

#[test]
fn test_all_selects_everything() {
    let selected = Selection::All.resolve(&chain()).unwrap();
    assert_eq!(selected.len(), 4);
}

#[test]
fn test_all_ignores_names() {
    let selection = Selection::from_args(&["raw.x".to_string()], true).unwrap();
    assert_eq!(selection, Selection::All);
    assert_eq!(selection.resolve(&chain()).unwrap().len(), 4);
}

#[test]
fn test_closure_pulls_in_transitive_dependencies() {
    let selected = Selection::Names(vec!["raw.x".to_string()])
        .resolve(&chain())
        .unwrap();
    assert_eq!(names(&selected), vec!["raw.x", "raw.y", "raw.z"]);
}

#[test]
fn test_leaf_selection_stays_small() {
    let selected = Selection::Names(vec!["raw.z".to_string()])
        .resolve(&chain())
        .unwrap();
    assert_eq!(names(&selected), vec!["raw.z"]);
}

#[test]
fn test_unknown_names_all_reported() {
    let err = Selection::Names(vec![
        "raw.missing".to_string(),
        "raw.x".to_string(),
        "raw.also_missing".to_string(),
    ])
    .resolve(&chain())
    .unwrap_err();
    match err {
        CoreError::UnknownAssets { names } => {
            assert_eq!(names, vec!["raw.also_missing", "raw.missing"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unknown_name_message_lists_it() {
    let err = Selection::Names(vec!["raw.missing".to_string()])
        .resolve(&chain())
        .unwrap_err();
    assert!(err.to_string().contains("raw.missing"));
}

#[test]
fn test_empty_selection_is_usage_error() {
    assert!(matches!(
        Selection::from_args(&[], false),
        Err(CoreError::EmptySelection)
    ));
    assert!(matches!(
        Selection::from_args(&["  ".to_string()], false),
        Err(CoreError::EmptySelection)
    ));
    assert!(matches!(
        Selection::Names(vec![]).resolve(&chain()),
        Err(CoreError::EmptySelection)
    ));
}

use super::*;
use tempfile::TempDir;

#[test]
fn test_in_memory() {
    let db = DuckDbBackend::in_memory().unwrap();
    assert_eq!(db.db_type(), "duckdb");
    assert_eq!(db.location(), ":memory:");
}

#[test]
fn test_replace_table_as() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.create_schema_if_not_exists("raw").unwrap();
    db.replace_table_as("raw", "t", "SELECT 1 AS id, 'hello' AS name")
        .unwrap();

    assert!(db.table_exists("raw", "t").unwrap());
    assert!(!db.table_exists("raw", "missing").unwrap());
    assert!(!db.table_exists("other", "t").unwrap());
}

#[test]
fn test_create_or_replace_is_idempotent() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.create_schema_if_not_exists("raw").unwrap();
    for _ in 0..2 {
        db.replace_table_as("raw", "nums", "SELECT * FROM range(5) t(n)")
            .unwrap();
        assert_eq!(db.row_count("raw", "nums").unwrap(), 5);
    }
}

#[test]
fn test_create_schema_if_not_exists_twice() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.create_schema_if_not_exists("staging").unwrap();
    db.create_schema_if_not_exists("staging").unwrap();
}

#[test]
fn test_invalid_identifiers_rejected() {
    let db = DuckDbBackend::in_memory().unwrap();
    let err = db.create_schema_if_not_exists("raw; DROP TABLE x").unwrap_err();
    assert!(matches!(err, DbError::InvalidIdentifier(_)));
    let err = db
        .replace_table_as("raw", "t--", "SELECT 1")
        .unwrap_err();
    assert!(matches!(err, DbError::InvalidIdentifier(_)));
    assert!(db.row_count("1raw", "t").is_err());
}

#[test]
fn test_execute_with_params() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch("CREATE TABLE kv (k VARCHAR, v BIGINT)").unwrap();
    let inserted = db
        .execute(
            "INSERT INTO kv VALUES (?, ?), (?, ?)",
            &[
                Value::Text("a".into()),
                Value::Int(1),
                Value::Text("b".into()),
                Value::Null,
            ],
        )
        .unwrap();
    assert_eq!(inserted, 2);

    let frame = db.query_frame("SELECT * FROM kv ORDER BY k").unwrap();
    assert_eq!(frame.row(1), vec![Value::Text("b".into()), Value::Null]);
}

#[test]
fn test_columns_of() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.create_schema_if_not_exists("raw").unwrap();
    db.replace_table_as("raw", "t", "SELECT 1::BIGINT AS id, 'x' AS label")
        .unwrap();
    let columns = db.columns_of("raw", "t").unwrap();
    assert_eq!(
        columns,
        vec![
            ColumnInfo {
                name: "id".into(),
                data_type: "BIGINT".into()
            },
            ColumnInfo {
                name: "label".into(),
                data_type: "VARCHAR".into()
            },
        ]
    );
}

#[test]
fn test_query_frame_maps_types() {
    let db = DuckDbBackend::in_memory().unwrap();
    let frame = db
        .query_frame(
            "SELECT 1::INTEGER AS i, 2.5::DOUBLE AS f, true AS b, 'txt' AS s, \
             DATE '2024-01-02' AS d, SUM(x) AS total FROM (VALUES (3), (4)) v(x);",
        )
        .unwrap();
    assert_eq!(frame.column("i").unwrap().sql_type(), "BIGINT");
    assert_eq!(frame.column("f").unwrap().sql_type(), "DOUBLE");
    assert_eq!(frame.column("b").unwrap().sql_type(), "BOOLEAN");
    assert_eq!(frame.column("s").unwrap().sql_type(), "VARCHAR");
    assert_eq!(frame.column("d").unwrap().sql_type(), "VARCHAR");
    assert_eq!(
        frame.row(0),
        vec![
            Value::Int(1),
            Value::Float(2.5),
            Value::Bool(true),
            Value::Text("txt".into()),
            Value::Text("2024-01-02".into()),
            Value::Int(7),
        ]
    );
}

#[test]
fn test_query_frame_empty_result_keeps_columns() {
    let db = DuckDbBackend::in_memory().unwrap();
    let frame = db
        .query_frame("SELECT 1 AS a, 'x' AS b WHERE false")
        .unwrap();
    assert_eq!(frame.height(), 0);
    assert_eq!(frame.column_names(), vec!["a", "b"]);
}

#[test]
fn test_query_frame_with_trailing_line_comment() {
    let db = DuckDbBackend::in_memory().unwrap();
    let frame = db.query_frame("SELECT 1 AS x -- note").unwrap();
    assert_eq!(frame.column_names(), vec!["x"]);
    assert_eq!(frame.row(0), vec![Value::Int(1)]);

    db.create_schema_if_not_exists("raw").unwrap();
    db.replace_table_as("raw", "t", "SELECT 2 AS y -- trailing")
        .unwrap();
    assert_eq!(db.row_count("raw", "t").unwrap(), 1);
}

#[test]
fn test_write_frame_round_trip() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.create_schema_if_not_exists("raw").unwrap();
    let frame = Frame::new(vec![
        Column::new("value", vec![1i64, 2, 3]),
        Column::new("ratio", vec![Some(0.5f64), None, Some(1.5)]),
        Column::new("is even", vec![false, true, false]),
        Column::new("label", vec!["one", "two", "three"]),
    ])
    .unwrap();

    db.write_frame("raw", "numbers", &frame).unwrap();
    assert_eq!(db.row_count("raw", "numbers").unwrap(), 3);

    let back = db.read_table("raw", "numbers").unwrap();
    assert_eq!(back, frame);

    let types: Vec<String> = db
        .columns_of("raw", "numbers")
        .unwrap()
        .into_iter()
        .map(|c| c.data_type)
        .collect();
    assert_eq!(types, vec!["BIGINT", "DOUBLE", "BOOLEAN", "VARCHAR"]);
}

#[test]
fn test_write_frame_replaces_previous_contents() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.create_schema_if_not_exists("raw").unwrap();
    let first = Frame::new(vec![Column::new("a", vec![1i64, 2, 3])]).unwrap();
    let second = Frame::new(vec![Column::new("b", vec!["x"])]).unwrap();
    db.write_frame("raw", "t", &first).unwrap();
    db.write_frame("raw", "t", &second).unwrap();
    assert_eq!(db.row_count("raw", "t").unwrap(), 1);
    assert_eq!(db.columns_of("raw", "t").unwrap()[0].name, "b");
}

#[test]
fn test_sample_rows_limits() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.create_schema_if_not_exists("raw").unwrap();
    db.replace_table_as("raw", "nums", "SELECT range AS n FROM range(20)")
        .unwrap();
    let (columns, rows) = db.sample_rows("raw", "nums", 3).unwrap();
    assert_eq!(columns, vec!["n"]);
    assert_eq!(rows.len(), 3);
}

#[test]
fn test_missing_table_is_table_not_found() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.create_schema_if_not_exists("raw").unwrap();
    let err = db.read_table("raw", "nope").unwrap_err();
    assert!(matches!(err, DbError::TableNotFound(_)), "got {err}");
}

#[test]
fn test_file_database_persists_across_operations() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("test.duckdb");
    let db = DuckDbBackend::new(path.to_str().unwrap()).unwrap();
    db.create_schema_if_not_exists("raw").unwrap();
    db.replace_table_as("raw", "t", "SELECT 42 AS answer")
        .unwrap();

    let reopened = DuckDbBackend::from_path(&path);
    assert!(reopened.table_exists("raw", "t").unwrap());
    assert_eq!(
        reopened.query_frame("SELECT answer FROM raw.t").unwrap().row(0),
        vec![Value::Int(42)]
    );
}

use super::*;

fn numbers() -> Frame {
    Frame::new(vec![
        Column::new("value", vec![1i64, 2, 3, 4]),
        Column::new("square", vec![1i64, 4, 9, 16]),
        Column::new("is_even", vec![false, true, false, true]),
        Column::new("label", vec!["one", "two", "three", "four"]),
    ])
    .unwrap()
}

#[test]
fn test_frame_shape() {
    let frame = numbers();
    assert_eq!(frame.height(), 4);
    assert_eq!(frame.width(), 4);
    assert_eq!(frame.column_names(), vec!["value", "square", "is_even", "label"]);
    assert_eq!(frame.column("square").unwrap().sql_type(), "BIGINT");
    assert!(frame.column("missing").is_none());
}

#[test]
fn test_frame_rows() {
    let frame = numbers();
    assert_eq!(
        frame.row(1),
        vec![
            Value::Int(2),
            Value::Int(4),
            Value::Bool(true),
            Value::Text("two".to_string())
        ]
    );
    assert_eq!(frame.rows().count(), 4);
}

#[test]
fn test_nullable_cells() {
    let frame = Frame::new(vec![
        Column::new("x", vec![Some(1.5f64), None]),
        Column::new("s", vec![None, Some("b".to_string())]),
    ])
    .unwrap();
    assert_eq!(frame.row(0), vec![Value::Float(1.5), Value::Null]);
    assert_eq!(frame.row(1)[0].to_string(), "null");
}

#[test]
fn test_zero_rows_is_valid() {
    let frame = Frame::new(vec![Column::new("x", Vec::<i64>::new())]).unwrap();
    assert_eq!(frame.height(), 0);
    assert_eq!(frame.rows().count(), 0);
}

#[test]
fn test_no_columns_rejected() {
    assert_eq!(Frame::new(vec![]), Err(FrameError::NoColumns));
}

#[test]
fn test_length_mismatch_rejected() {
    let err = Frame::new(vec![
        Column::new("a", vec![1i64, 2]),
        Column::new("b", vec![true]),
    ])
    .unwrap_err();
    assert_eq!(
        err,
        FrameError::LengthMismatch {
            column: "b".to_string(),
            expected: 2,
            actual: 1
        }
    );
}

#[test]
fn test_duplicate_and_empty_names_rejected() {
    let err = Frame::new(vec![
        Column::new("a", vec![1i64]),
        Column::new("a", vec![2i64]),
    ])
    .unwrap_err();
    assert!(matches!(err, FrameError::DuplicateColumn { .. }));

    let err = Frame::new(vec![Column::new("", vec![1i64])]).unwrap_err();
    assert_eq!(err, FrameError::EmptyColumnName { index: 0 });
}

#[test]
fn test_value_display() {
    assert_eq!(Value::Int(42).to_string(), "42");
    assert_eq!(Value::Bool(false).to_string(), "false");
    assert_eq!(Value::Text("hi".into()).to_string(), "hi");
}

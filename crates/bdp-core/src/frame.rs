//! Table-shaped values produced by transform assets.
//!
//! A [`Frame`] is an ordered list of named, typed columns that all have the
//! same number of rows. Construction validates the shape so every frame that
//! reaches the database can be written as-is.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Frame shape errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// F001: No columns at all
    #[error("[F001] Frame must have at least one column")]
    NoColumns,

    /// F002: Column with an empty name
    #[error("[F002] Column {index} has an empty name")]
    EmptyColumnName { index: usize },

    /// F003: Two columns share a name
    #[error("[F003] Duplicate column name '{name}'")]
    DuplicateColumn { name: String },

    /// F004: Columns of different lengths
    #[error("[F004] Column '{column}' has {actual} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },
}

/// A single cell value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// Typed column storage; every cell is nullable
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Bool(Vec<Option<bool>>),
    Int(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl ColumnData {
    /// Number of rows
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Bool(v) => v.len(),
            ColumnData::Int(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    /// Whether the column has no rows
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// SQL type used when creating a table for this column
    pub fn sql_type(&self) -> &'static str {
        match self {
            ColumnData::Bool(_) => "BOOLEAN",
            ColumnData::Int(_) => "BIGINT",
            ColumnData::Float(_) => "DOUBLE",
            ColumnData::Text(_) => "VARCHAR",
        }
    }

    /// Cell at `row`, or `Value::Null` when out of range or null
    pub fn value(&self, row: usize) -> Value {
        match self {
            ColumnData::Bool(v) => v.get(row).copied().flatten().map_or(Value::Null, Value::Bool),
            ColumnData::Int(v) => v.get(row).copied().flatten().map_or(Value::Null, Value::Int),
            ColumnData::Float(v) => v.get(row).copied().flatten().map_or(Value::Null, Value::Float),
            ColumnData::Text(v) => v
                .get(row)
                .cloned()
                .flatten()
                .map_or(Value::Null, Value::Text),
        }
    }
}

macro_rules! column_data_from {
    ($ty:ty, $variant:ident) => {
        impl From<Vec<$ty>> for ColumnData {
            fn from(values: Vec<$ty>) -> Self {
                ColumnData::$variant(values.into_iter().map(Some).collect())
            }
        }

        impl From<Vec<Option<$ty>>> for ColumnData {
            fn from(values: Vec<Option<$ty>>) -> Self {
                ColumnData::$variant(values)
            }
        }
    };
}

column_data_from!(bool, Bool);
column_data_from!(i64, Int);
column_data_from!(f64, Float);
column_data_from!(String, Text);

impl From<Vec<&str>> for ColumnData {
    fn from(values: Vec<&str>) -> Self {
        ColumnData::Text(values.into_iter().map(|s| Some(s.to_string())).collect())
    }
}

/// A named column
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: impl Into<ColumnData>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

/// Ordered named columns of uniform length
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    columns: Vec<Column>,
    height: usize,
}

impl Frame {
    /// Validate and build a frame.
    pub fn new(columns: Vec<Column>) -> Result<Self, FrameError> {
        let first = columns.first().ok_or(FrameError::NoColumns)?;
        let height = first.data.len();

        let mut seen: HashSet<&str> = HashSet::new();
        for (index, column) in columns.iter().enumerate() {
            if column.name.is_empty() {
                return Err(FrameError::EmptyColumnName { index });
            }
            if !seen.insert(column.name.as_str()) {
                return Err(FrameError::DuplicateColumn {
                    name: column.name.clone(),
                });
            }
            if column.data.len() != height {
                return Err(FrameError::LengthMismatch {
                    column: column.name.clone(),
                    expected: height,
                    actual: column.data.len(),
                });
            }
        }

        Ok(Self { columns, height })
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Columns in order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&ColumnData> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.data)
    }

    /// All cells of one row, in column order
    pub fn row(&self, index: usize) -> Vec<Value> {
        self.columns.iter().map(|c| c.data.value(index)).collect()
    }

    /// Iterate rows
    pub fn rows(&self) -> impl Iterator<Item = Vec<Value>> + '_ {
        (0..self.height).map(move |i| self.row(i))
    }
}

#[cfg(test)]
#[path = "frame_test.rs"]
mod tests;

//! Database trait definition

use crate::error::{DbError, DbResult};
use bdp_core::{is_valid_identifier, Frame, Value};

/// A column as reported by the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
}

/// Database surface used by the materializer, transforms, and docs.
///
/// Every call is blocking. Schema and table arguments are validated as
/// identifiers before they are interpolated into SQL text.
pub trait Database: Send + Sync {
    /// Execute one statement with bound parameters, returns affected rows
    fn execute(&self, sql: &str, params: &[Value]) -> DbResult<usize>;

    /// Execute multiple SQL statements
    fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Create a schema if it does not exist
    fn create_schema_if_not_exists(&self, schema: &str) -> DbResult<()>;

    /// Create or replace `schema.table` from a SELECT statement
    fn replace_table_as(&self, schema: &str, table: &str, select: &str) -> DbResult<()>;

    /// Check if a table or view exists
    fn table_exists(&self, schema: &str, table: &str) -> DbResult<bool>;

    /// Columns of a table in declaration order
    fn columns_of(&self, schema: &str, table: &str) -> DbResult<Vec<ColumnInfo>>;

    /// Number of rows in a table
    fn row_count(&self, schema: &str, table: &str) -> DbResult<usize>;

    /// Column names plus up to `limit` rows
    fn sample_rows(
        &self,
        schema: &str,
        table: &str,
        limit: usize,
    ) -> DbResult<(Vec<String>, Vec<Vec<Value>>)> {
        let sql = format!("SELECT * FROM {} LIMIT {}", qualified_name(schema, table)?, limit);
        let frame = self.query_frame(&sql)?;
        let columns = frame.column_names().into_iter().map(String::from).collect();
        Ok((columns, frame.rows().collect()))
    }

    /// Run a query and collect its result as a frame
    fn query_frame(&self, sql: &str) -> DbResult<Frame>;

    /// Read a whole table
    fn read_table(&self, schema: &str, table: &str) -> DbResult<Frame> {
        self.query_frame(&format!("SELECT * FROM {}", qualified_name(schema, table)?))
    }

    /// Replace `schema.table` with the contents of `frame`
    fn write_frame(&self, schema: &str, table: &str, frame: &Frame) -> DbResult<()>;

    /// Database location (file path or `:memory:`)
    fn location(&self) -> &str;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}

/// Validate an identifier before it is placed into SQL text
pub fn checked_identifier(value: &str) -> DbResult<&str> {
    if is_valid_identifier(value) {
        Ok(value)
    } else {
        Err(DbError::InvalidIdentifier(value.to_string()))
    }
}

/// `schema.table` after validating both parts
pub fn qualified_name(schema: &str, table: &str) -> DbResult<String> {
    Ok(format!(
        "{}.{}",
        checked_identifier(schema)?,
        checked_identifier(table)?
    ))
}

/// Double-quote an arbitrary column name
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

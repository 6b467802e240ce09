//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::{checked_identifier, qualified_name, quote_ident, ColumnInfo, Database};
use bdp_core::{Column, ColumnData, Frame, Value};
use duckdb::types::Value as DuckValue;
use duckdb::{params, params_from_iter, Connection};
use std::path::PathBuf;
use std::sync::Mutex;

/// In-memory database location
const MEMORY: &str = ":memory:";

enum Handle {
    /// A file database, opened for each operation and closed after it
    File(PathBuf),
    /// An in-memory database lives only as long as its one connection
    Memory(Mutex<Connection>),
}

/// DuckDB database backend
pub struct DuckDbBackend {
    location: String,
    handle: Handle,
}

/// How a result column is read back into a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Bool,
    Int,
    Float,
    Text,
}

impl ColumnKind {
    fn from_type(data_type: &str) -> Self {
        let upper = data_type.to_ascii_uppercase();
        match upper.as_str() {
            "BOOLEAN" => Self::Bool,
            // HUGEINT is what SUM over BIGINT yields; values past i64 fail the cast
            "TINYINT" | "SMALLINT" | "INTEGER" | "BIGINT" | "HUGEINT" | "UTINYINT"
            | "USMALLINT" | "UINTEGER" | "UBIGINT" => Self::Int,
            "FLOAT" | "REAL" | "DOUBLE" => Self::Float,
            t if t.starts_with("DECIMAL") => Self::Float,
            _ => Self::Text,
        }
    }

    fn cast_target(self) -> &'static str {
        match self {
            Self::Bool => "BOOLEAN",
            Self::Int => "BIGINT",
            Self::Float => "DOUBLE",
            Self::Text => "VARCHAR",
        }
    }
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            location: MEMORY.to_string(),
            handle: Handle::Memory(Mutex::new(conn)),
        })
    }

    /// Use a database file. Each operation opens its own connection.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            location: path.display().to_string(),
            handle: Handle::File(path),
        }
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == MEMORY {
            Self::in_memory()
        } else {
            Ok(Self::from_path(path))
        }
    }

    /// Run `f` against a connection scoped to this one operation
    fn with_conn<T>(&self, f: impl FnOnce(&mut Connection) -> DbResult<T>) -> DbResult<T> {
        match &self.handle {
            Handle::File(path) => {
                let mut conn = Connection::open(path)
                    .map_err(|e| DbError::ConnectionError(format!("{}: {}", path.display(), e)))?;
                f(&mut conn)
            }
            Handle::Memory(conn) => {
                let mut guard = conn
                    .lock()
                    .map_err(|e| DbError::MutexPoisoned(e.to_string()))?;
                f(&mut guard)
            }
        }
    }
}

fn to_duck_value(value: &Value) -> DuckValue {
    match value {
        Value::Null => DuckValue::Null,
        Value::Bool(b) => DuckValue::Boolean(*b),
        Value::Int(n) => DuckValue::BigInt(*n),
        Value::Float(x) => DuckValue::Double(*x),
        Value::Text(s) => DuckValue::Text(s.clone()),
    }
}

fn execution_error(e: duckdb::Error, sql: &str) -> DbError {
    match DbError::from(e) {
        DbError::ExecutionError(msg) => DbError::ExecutionError(format!("{}: {}", msg, sql)),
        other => other,
    }
}

/// Names and read strategy of every column `sql` returns
fn describe(conn: &Connection, sql: &str) -> DbResult<Vec<(String, ColumnKind)>> {
    let describe_sql = format!("DESCRIBE SELECT * FROM ({}\n) AS q", sql);
    let mut stmt = conn
        .prepare(&describe_sql)
        .map_err(|e| execution_error(e, sql))?;
    let columns = stmt
        .query_map([], |row| {
            let name: String = row.get(0)?;
            let data_type: String = row.get(1)?;
            Ok((name, ColumnKind::from_type(&data_type)))
        })
        .map_err(|e| execution_error(e, sql))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(columns)
}

fn read_frame(conn: &Connection, sql: &str) -> DbResult<Frame> {
    let sql = sql.trim().trim_end_matches(';');
    let described = describe(conn, sql)?;

    let projection = described
        .iter()
        .map(|(name, kind)| {
            let quoted = quote_ident(name);
            format!("CAST({} AS {}) AS {}", quoted, kind.cast_target(), quoted)
        })
        .collect::<Vec<_>>()
        .join(", ");
    let select = format!("SELECT {} FROM ({}\n) AS q", projection, sql);

    let mut data: Vec<ColumnData> = described
        .iter()
        .map(|(_, kind)| match kind {
            ColumnKind::Bool => ColumnData::Bool(Vec::new()),
            ColumnKind::Int => ColumnData::Int(Vec::new()),
            ColumnKind::Float => ColumnData::Float(Vec::new()),
            ColumnKind::Text => ColumnData::Text(Vec::new()),
        })
        .collect();

    let mut stmt = conn.prepare(&select).map_err(|e| execution_error(e, sql))?;
    let mut rows = stmt.query([]).map_err(|e| execution_error(e, sql))?;
    while let Some(row) = rows.next()? {
        for (i, column) in data.iter_mut().enumerate() {
            match column {
                ColumnData::Bool(v) => v.push(row.get(i)?),
                ColumnData::Int(v) => v.push(row.get(i)?),
                ColumnData::Float(v) => v.push(row.get(i)?),
                ColumnData::Text(v) => v.push(row.get(i)?),
            }
        }
    }

    let columns = described
        .into_iter()
        .zip(data)
        .map(|((name, _), data)| Column { name, data })
        .collect();
    Ok(Frame::new(columns)?)
}

impl Database for DuckDbBackend {
    fn execute(&self, sql: &str, params: &[Value]) -> DbResult<usize> {
        self.with_conn(|conn| {
            conn.execute(sql, params_from_iter(params.iter().map(to_duck_value)))
                .map_err(|e| execution_error(e, sql))
        })
    }

    fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.with_conn(|conn| conn.execute_batch(sql).map_err(|e| execution_error(e, sql)))
    }

    fn create_schema_if_not_exists(&self, schema: &str) -> DbResult<()> {
        let sql = format!("CREATE SCHEMA IF NOT EXISTS {}", checked_identifier(schema)?);
        self.execute_batch(&sql)
    }

    fn replace_table_as(&self, schema: &str, table: &str, select: &str) -> DbResult<()> {
        let sql = format!(
            "CREATE OR REPLACE TABLE {} AS {}\n",
            qualified_name(schema, table)?,
            select
        );
        self.execute_batch(&sql)
    }

    fn table_exists(&self, schema: &str, table: &str) -> DbResult<bool> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = ? AND table_name = ?",
                params![schema, table],
                |row| row.get(0),
            )?;
            Ok(count > 0)
        })
    }

    fn columns_of(&self, schema: &str, table: &str) -> DbResult<Vec<ColumnInfo>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT column_name, data_type FROM information_schema.columns \
                 WHERE table_schema = ? AND table_name = ? ORDER BY ordinal_position",
            )?;
            let columns = stmt
                .query_map(params![schema, table], |row| {
                    Ok(ColumnInfo {
                        name: row.get(0)?,
                        data_type: row.get(1)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(columns)
        })
    }

    fn row_count(&self, schema: &str, table: &str) -> DbResult<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", qualified_name(schema, table)?);
        self.with_conn(|conn| {
            let count: i64 = conn
                .query_row(&sql, [], |row| row.get(0))
                .map_err(|e| execution_error(e, &sql))?;
            Ok(count as usize)
        })
    }

    fn query_frame(&self, sql: &str) -> DbResult<Frame> {
        self.with_conn(|conn| read_frame(conn, sql))
    }

    fn write_frame(&self, schema: &str, table: &str, frame: &Frame) -> DbResult<()> {
        let name = qualified_name(schema, table)?;
        let definitions = frame
            .columns()
            .iter()
            .map(|c| format!("{} {}", quote_ident(&c.name), c.data.sql_type()))
            .collect::<Vec<_>>()
            .join(", ");
        let create = format!("CREATE OR REPLACE TABLE {} ({})", name, definitions);
        let placeholders = vec!["?"; frame.width()].join(", ");
        let insert = format!("INSERT INTO {} VALUES ({})", name, placeholders);

        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            tx.execute_batch(&create)
                .map_err(|e| execution_error(e, &create))?;
            {
                let mut stmt = tx.prepare(&insert)?;
                for row in frame.rows() {
                    stmt.execute(params_from_iter(row.iter().map(to_duck_value)))
                        .map_err(|e| execution_error(e, &insert))?;
                }
            }
            tx.commit()?;
            log::debug!("Wrote {} rows to {}", frame.height(), name);
            Ok(())
        })
    }

    fn location(&self) -> &str {
        &self.location
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;

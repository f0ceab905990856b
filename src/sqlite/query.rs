use std::sync::Arc;

use rusqlite::types::Value;

use crate::error::{FeedbaseError, Result};
use crate::query_utils::extract_column_names;
use crate::results::{ColumnIndex, DbRow, build_column_index};
use crate::types::RowValues;

/// Extract a `RowValues` from a `SQLite` row.
///
/// # Errors
///
/// Returns `FeedbaseError::StepFailed` if the column cannot be read.
pub fn sqlite_extract_value(row: &rusqlite::Row<'_>, idx: usize) -> Result<RowValues> {
    let value: Value = row.get(idx).map_err(FeedbaseError::StepFailed)?;
    Ok(match value {
        Value::Null => RowValues::Null,
        Value::Integer(i) => RowValues::Int(i),
        Value::Real(f) => RowValues::Float(f),
        Value::Text(s) => RowValues::Text(s),
        Value::Blob(b) => RowValues::Blob(b),
    })
}

/// Column labels of a prepared statement, computed once and shared by every row it yields.
#[derive(Debug, Clone)]
pub(crate) struct RowShape {
    pub(crate) names: Arc<Vec<String>>,
    pub(crate) index: ColumnIndex,
}

impl RowShape {
    pub(crate) fn of(stmt: &rusqlite::Statement<'_>) -> Self {
        let names = extract_column_names(stmt.column_names());
        let index = build_column_index(&names);
        Self {
            names: Arc::new(names),
            index,
        }
    }

    /// Marshal the current step into an owned row snapshot.
    pub(crate) fn build_row(&self, row: &rusqlite::Row<'_>) -> Result<DbRow> {
        let values = (0..self.names.len())
            .map(|i| sqlite_extract_value(row, i))
            .collect::<Result<Vec<_>>>()?;
        Ok(DbRow::with_index(
            Arc::clone(&self.names),
            Arc::clone(&self.index),
            values,
        ))
    }
}

use crate::error::{FeedbaseError, Result};
use crate::query_utils::quote_identifier;
use crate::types::RowValues;

use super::{ID_COLUMN, Record, TableCrud};

impl TableCrud<'_> {
    /// Insert `record`, returning the new row id.
    ///
    /// An empty record inserts a row of defaults.
    ///
    /// # Errors
    /// Returns `InvalidIdentifier`/`UnknownColumn` for bad field names, or
    /// `StepFailed` on constraint violations.
    pub fn insert(&mut self, record: &Record) -> Result<i64> {
        self.check_fields(record)?;
        let table = self.quoted_table()?;
        let sql = if record.is_empty() {
            format!("INSERT INTO {table} DEFAULT VALUES")
        } else {
            let columns = record
                .names()
                .map(quote_identifier)
                .collect::<Result<Vec<_>>>()?;
            let placeholders = (1..=record.len())
                .map(|i| format!("?{i}"))
                .collect::<Vec<_>>();
            format!(
                "INSERT INTO {table} ({}) VALUES ({})",
                columns.join(", "),
                placeholders.join(", ")
            )
        };
        let params: Vec<RowValues> = record.values().cloned().collect();
        let outcome = self.conn.exec_write(&sql, &params)?;
        outcome.row_id().ok_or_else(|| {
            FeedbaseError::ExecutionError(format!("insert into {} reported no row id", self.table))
        })
    }

    /// Overwrite the fields in `record` on row `row_id`; returns rows changed (0 or 1).
    ///
    /// # Errors
    /// Returns `ParameterError` for an empty record, `InvalidIdentifier`/
    /// `UnknownColumn` for bad field names, or the engine error.
    pub fn update(&mut self, record: &Record, row_id: i64) -> Result<usize> {
        if record.is_empty() {
            return Err(FeedbaseError::ParameterError(
                "update needs at least one field".into(),
            ));
        }
        self.check_fields(record)?;
        let assignments = record
            .names()
            .enumerate()
            .map(|(i, name)| quote_identifier(name).map(|column| format!("{column} = ?{}", i + 1)))
            .collect::<Result<Vec<_>>>()?;
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?{}",
            self.quoted_table()?,
            assignments.join(", "),
            quote_identifier(ID_COLUMN)?,
            record.len() + 1
        );
        let mut params: Vec<RowValues> = record.values().cloned().collect();
        params.push(RowValues::Int(row_id));
        let outcome = self.conn.exec_write(&sql, &params)?;
        Ok(outcome.rows_changed().unwrap_or(0))
    }

    /// Delete row `row_id`; returns rows removed (0 or 1).
    ///
    /// # Errors
    /// Returns the engine error.
    pub fn delete(&mut self, row_id: i64) -> Result<usize> {
        self.delete_where(&[(ID_COLUMN, RowValues::Int(row_id))])
    }

    /// Delete every row matching `filters`; returns rows removed.
    ///
    /// # Errors
    /// Returns `InvalidIdentifier`/`UnknownColumn` for bad column names, or the engine error.
    pub fn delete_where(&mut self, filters: &[(&str, RowValues)]) -> Result<usize> {
        let (clause, params) = self.filter_clause(filters)?;
        let sql = format!("DELETE FROM {}{clause}", self.quoted_table()?);
        let outcome = self.conn.exec_write(&sql, &params)?;
        Ok(outcome.rows_changed().unwrap_or(0))
    }
}

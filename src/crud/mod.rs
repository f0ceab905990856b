//! Generic create/read/update/delete over one table, templated from record field names.

mod dml;
mod record;
mod select;

pub use record::Record;

use crate::error::{FeedbaseError, Result};
use crate::query_utils::{quote_identifier, validate_identifier};
use crate::results::DbRow;
use crate::sqlite::Connection;
use crate::types::RowValues;

/// Column holding the row identifier in every CRUD-managed table.
pub const ID_COLUMN: &str = "id";

/// Sort order for id listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order<'a> {
    Asc(&'a str),
    Desc(&'a str),
}

/// CRUD client owning a [`Connection`] and a default table.
#[derive(Debug)]
pub struct CrudClient {
    conn: Connection,
    table: String,
}

impl CrudClient {
    /// Use the connection's configured table as the default.
    ///
    /// # Errors
    /// Returns `FeedbaseError::ConfigError` if the connection has no table name,
    /// or `InvalidIdentifier` if it is not a plain identifier.
    pub fn new(conn: Connection) -> Result<Self> {
        let table = conn
            .table_name()
            .ok_or_else(|| {
                FeedbaseError::ConfigError("connection has no default table name".into())
            })?
            .to_owned();
        Self::with_table(conn, table)
    }

    /// # Errors
    /// Returns `FeedbaseError::InvalidIdentifier` if `table` is not a plain identifier.
    pub fn with_table(conn: Connection, table: impl Into<String>) -> Result<Self> {
        let table = table.into();
        validate_identifier(&table)?;
        Ok(Self { conn, table })
    }

    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Operate on another table through the same connection.
    ///
    /// # Errors
    /// Returns `FeedbaseError::InvalidIdentifier` if `name` is not a plain identifier.
    pub fn table<'a>(&'a mut self, name: &'a str) -> Result<TableCrud<'a>> {
        TableCrud::new(&mut self.conn, name)
    }

    fn default_table(&mut self) -> TableCrud<'_> {
        TableCrud {
            conn: &mut self.conn,
            table: &self.table,
        }
    }

    /// Insert `record` into the default table, returning the new row id.
    ///
    /// # Errors
    /// See [`TableCrud::insert`].
    pub fn insert(&mut self, record: &Record) -> Result<i64> {
        self.default_table().insert(record)
    }

    /// # Errors
    /// See [`TableCrud::update`].
    pub fn update(&mut self, record: &Record, row_id: i64) -> Result<usize> {
        self.default_table().update(record, row_id)
    }

    /// # Errors
    /// See [`TableCrud::delete`].
    pub fn delete(&mut self, row_id: i64) -> Result<usize> {
        self.default_table().delete(row_id)
    }

    /// # Errors
    /// See [`TableCrud::get`].
    pub fn get(&mut self, row_id: i64) -> Result<Option<DbRow>> {
        self.default_table().get(row_id)
    }

    /// # Errors
    /// See [`TableCrud::count`].
    pub fn count(&mut self) -> Result<i64> {
        self.default_table().count()
    }

    pub fn connection(&mut self) -> &mut Connection {
        &mut self.conn
    }

    #[must_use]
    pub fn into_connection(self) -> Connection {
        self.conn
    }
}

/// CRUD operations bound to one table of a borrowed connection.
#[derive(Debug)]
pub struct TableCrud<'a> {
    conn: &'a mut Connection,
    table: &'a str,
}

impl<'a> TableCrud<'a> {
    /// # Errors
    /// Returns `FeedbaseError::InvalidIdentifier` if `table` is not a plain identifier.
    pub fn new(conn: &'a mut Connection, table: &'a str) -> Result<Self> {
        validate_identifier(table)?;
        Ok(Self { conn, table })
    }

    #[must_use]
    pub fn table_name(&self) -> &str {
        self.table
    }

    fn quoted_table(&self) -> Result<String> {
        quote_identifier(self.table)
    }

    /// Reject names that are not identifiers or not columns of the table.
    ///
    /// `SQLite` reads an unknown double-quoted name as a string literal, so a
    /// typo would otherwise filter or sort silently wrong.
    fn check_column(&mut self, name: &str) -> Result<()> {
        validate_identifier(name)?;
        if self.conn.column_exists(self.table, name)? {
            Ok(())
        } else {
            Err(FeedbaseError::UnknownColumn {
                table: self.table.to_owned(),
                column: name.to_owned(),
            })
        }
    }

    fn check_fields(&mut self, record: &Record) -> Result<()> {
        for name in record.names() {
            self.check_column(name)?;
        }
        Ok(())
    }

    /// Schema-checked [`where_clause`].
    fn filter_clause(&mut self, filters: &[(&str, RowValues)]) -> Result<(String, Vec<RowValues>)> {
        for (column, _) in filters {
            self.check_column(column)?;
        }
        where_clause(filters)
    }
}

/// Render `filters` as an `AND`-joined `WHERE` clause; `Null` values compare with `IS NULL`.
pub(crate) fn where_clause(filters: &[(&str, RowValues)]) -> Result<(String, Vec<RowValues>)> {
    if filters.is_empty() {
        return Ok((String::new(), Vec::new()));
    }
    let mut terms = Vec::with_capacity(filters.len());
    let mut params = Vec::with_capacity(filters.len());
    for (column, value) in filters {
        let column = quote_identifier(column)?;
        if value.is_null() {
            terms.push(format!("{column} IS NULL"));
        } else {
            params.push(value.clone());
            terms.push(format!("{column} = ?{}", params.len()));
        }
    }
    Ok((format!(" WHERE {}", terms.join(" AND ")), params))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn where_clause_numbers_only_bound_values() {
        let (sql, params) = where_clause(&[
            ("group_id", RowValues::Null),
            ("feed_id", RowValues::Int(3)),
            ("url", RowValues::from("u")),
        ])
        .unwrap();
        assert_eq!(
            sql,
            " WHERE \"group_id\" IS NULL AND \"feed_id\" = ?1 AND \"url\" = ?2"
        );
        assert_eq!(params, vec![RowValues::Int(3), RowValues::from("u")]);
    }

    #[test]
    fn empty_filters_render_nothing() {
        let (sql, params) = where_clause(&[]).unwrap();
        assert!(sql.is_empty());
        assert!(params.is_empty());
    }
}

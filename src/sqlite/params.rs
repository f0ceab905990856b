use crate::error::{FeedbaseError, Result};
use crate::types::RowValues;

/// Convert a single `RowValues` to a rusqlite `Value`.
#[must_use]
pub fn row_value_to_sqlite_value(value: &RowValues) -> rusqlite::types::Value {
    match value {
        RowValues::Null => rusqlite::types::Value::Null,
        RowValues::Int(i) => rusqlite::types::Value::Integer(*i),
        RowValues::Float(f) => rusqlite::types::Value::Real(*f),
        RowValues::Text(s) => rusqlite::types::Value::Text(s.clone()),
        RowValues::Blob(bytes) => rusqlite::types::Value::Blob(bytes.clone()),
    }
}

/// Owned `SQLite` parameter list, converted once and bound positionally.
#[derive(Debug, Clone, PartialEq)]
pub struct Params(pub Vec<rusqlite::types::Value>);

impl Params {
    /// Convert row values into `SQLite` values, preserving order.
    #[must_use]
    pub fn convert(params: &[RowValues]) -> Self {
        Params(params.iter().map(row_value_to_sqlite_value).collect())
    }

    /// Borrow the underlying values.
    #[must_use]
    pub fn as_values(&self) -> &[rusqlite::types::Value] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Bind `params` to the placeholders of `stmt`, in order.
///
/// Placeholder `?N` / `?` numbering is one-based; parameter `i` goes to slot `i + 1`.
///
/// # Errors
/// Returns `FeedbaseError::BindArityError` when the number of parameters differs
/// from the statement's placeholder count, or the underlying bind error.
pub fn bind_params(stmt: &mut rusqlite::Statement<'_>, params: &[RowValues]) -> Result<()> {
    let expected = stmt.parameter_count();
    if expected != params.len() {
        return Err(FeedbaseError::BindArityError {
            expected,
            actual: params.len(),
        });
    }
    for (idx, value) in Params::convert(params).0.into_iter().enumerate() {
        stmt.raw_bind_parameter(idx + 1, value)
            .map_err(|e| FeedbaseError::ParameterError(format!("bind #{}: {e}", idx + 1)))?;
    }
    Ok(())
}

use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

/// Format used when timestamps are stored as SQLite `TEXT`; matches `DATETIME('now')`.
pub const SQL_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Values that can be stored in a row or bound as query parameters.
///
/// The variants mirror SQLite's five storage classes, so a value read back
/// from a column can be bound again without loss:
/// ```rust
/// use feedbase::RowValues;
///
/// let params = vec![
///     RowValues::Int(1),
///     RowValues::from("alice"),
///     RowValues::Null,
/// ];
/// # let _ = params;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RowValues {
    /// NULL value
    Null,
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// UTF-8 text
    Text(String),
    /// Binary data
    Blob(Vec<u8>),
}

impl RowValues {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        if let RowValues::Int(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let RowValues::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            RowValues::Float(value) => Some(*value),
            #[allow(clippy::cast_precision_loss)]
            RowValues::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self.as_int() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let RowValues::Blob(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }

    /// Parse `TEXT` produced by `DATETIME(...)` (optionally with milliseconds).
    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        let s = self.as_text()?;
        NaiveDateTime::parse_from_str(s, SQL_TIMESTAMP_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
            .ok()
    }

    /// Name of the SQLite storage class this value maps to.
    #[must_use]
    pub fn storage_class(&self) -> &'static str {
        match self {
            RowValues::Null => "NULL",
            RowValues::Int(_) => "INTEGER",
            RowValues::Float(_) => "REAL",
            RowValues::Text(_) => "TEXT",
            RowValues::Blob(_) => "BLOB",
        }
    }

    /// JSON rendering used by [`crate::DbRow::to_json`]; blobs become byte arrays.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        match self {
            RowValues::Null => JsonValue::Null,
            RowValues::Int(i) => JsonValue::from(*i),
            RowValues::Float(f) => JsonValue::from(*f),
            RowValues::Text(s) => JsonValue::from(s.as_str()),
            RowValues::Blob(b) => JsonValue::from(b.clone()),
        }
    }
}

impl From<i64> for RowValues {
    fn from(value: i64) -> Self {
        RowValues::Int(value)
    }
}

impl From<i32> for RowValues {
    fn from(value: i32) -> Self {
        RowValues::Int(i64::from(value))
    }
}

impl From<bool> for RowValues {
    fn from(value: bool) -> Self {
        RowValues::Int(i64::from(value))
    }
}

impl From<f64> for RowValues {
    fn from(value: f64) -> Self {
        RowValues::Float(value)
    }
}

impl From<&str> for RowValues {
    fn from(value: &str) -> Self {
        RowValues::Text(value.to_owned())
    }
}

impl From<String> for RowValues {
    fn from(value: String) -> Self {
        RowValues::Text(value)
    }
}

impl From<Vec<u8>> for RowValues {
    fn from(value: Vec<u8>) -> Self {
        RowValues::Blob(value)
    }
}

impl From<&[u8]> for RowValues {
    fn from(value: &[u8]) -> Self {
        RowValues::Blob(value.to_vec())
    }
}

impl From<NaiveDateTime> for RowValues {
    fn from(value: NaiveDateTime) -> Self {
        RowValues::Text(value.format(SQL_TIMESTAMP_FORMAT).to_string())
    }
}

impl<T: Into<RowValues>> From<Option<T>> for RowValues {
    fn from(value: Option<T>) -> Self {
        value.map_or(RowValues::Null, Into::into)
    }
}

/// Result of a write executed through [`crate::Connection::exec_write`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The statement was an `INSERT`/`REPLACE`; carries the new rowid.
    Inserted { row_id: i64 },
    /// Any other write; carries the number of rows changed.
    Changed { rows: usize },
}

impl WriteOutcome {
    /// The rowid for inserts, otherwise the changed-row count.
    #[must_use]
    pub fn value(&self) -> i64 {
        match self {
            WriteOutcome::Inserted { row_id } => *row_id,
            WriteOutcome::Changed { rows } => i64::try_from(*rows).unwrap_or(i64::MAX),
        }
    }

    #[must_use]
    pub fn row_id(&self) -> Option<i64> {
        match self {
            WriteOutcome::Inserted { row_id } => Some(*row_id),
            WriteOutcome::Changed { .. } => None,
        }
    }

    #[must_use]
    pub fn rows_changed(&self) -> Option<usize> {
        match self {
            WriteOutcome::Changed { rows } => Some(*rows),
            WriteOutcome::Inserted { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_none_becomes_null() {
        let missing: Option<&str> = None;
        assert_eq!(RowValues::from(missing), RowValues::Null);
        assert_eq!(RowValues::from(Some(7_i64)), RowValues::Int(7));
    }

    #[test]
    fn timestamp_text_parses_with_and_without_fraction() {
        let plain = RowValues::from("2015-03-01 12:30:00");
        let fractional = RowValues::from("2015-03-01 12:30:00.250");
        assert!(plain.as_timestamp().is_some());
        assert!(fractional.as_timestamp().is_some());
        assert!(RowValues::Int(3).as_timestamp().is_none());
    }

    #[test]
    fn bools_are_stored_as_integers() {
        assert_eq!(RowValues::from(true), RowValues::Int(1));
        assert_eq!(RowValues::Int(0).as_bool(), Some(false));
        assert_eq!(RowValues::Int(2).as_bool(), None);
    }
}

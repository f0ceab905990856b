use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::types::RowValues;

/// Column name → position lookup shared by every row of one statement.
pub(crate) type ColumnIndex = Arc<HashMap<String, usize>>;

pub(crate) fn build_column_index(column_names: &[String]) -> ColumnIndex {
    Arc::new(
        column_names
            .iter()
            .enumerate()
            // first occurrence wins for duplicate labels (e.g. joins)
            .rev()
            .map(|(i, name)| (name.clone(), i))
            .collect(),
    )
}

/// One result row: ordered column labels plus their values.
///
/// A `DbRow` is a snapshot of a single step. It holds no reference to the
/// statement that produced it, so it stays valid after the statement moves
/// on or is finalized.
#[derive(Debug, Clone)]
pub struct DbRow {
    /// The column names for this row (shared across all rows of a statement)
    pub column_names: Arc<Vec<String>>,
    /// The values for this row, in column order
    pub values: Vec<RowValues>,
    #[doc(hidden)]
    pub(crate) column_index_cache: ColumnIndex,
}

impl DbRow {
    /// Create a row from column names and values.
    #[must_use]
    pub fn new(column_names: Arc<Vec<String>>, values: Vec<RowValues>) -> Self {
        let cache = build_column_index(&column_names);
        Self::with_index(column_names, cache, values)
    }

    pub(crate) fn with_index(
        column_names: Arc<Vec<String>>,
        column_index_cache: ColumnIndex,
        values: Vec<RowValues>,
    ) -> Self {
        Self {
            column_names,
            values,
            column_index_cache,
        }
    }

    /// Get the index of a column by name
    #[must_use]
    pub fn get_column_index(&self, column_name: &str) -> Option<usize> {
        self.column_index_cache.get(column_name).copied()
    }

    /// Get a value from the row by column name, or `None` if there is no such column.
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&RowValues> {
        self.get_column_index(column_name)
            .and_then(|idx| self.values.get(idx))
    }

    /// Get a value from the row by column index
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&RowValues> {
        self.values.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(label, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RowValues)> {
        self.column_names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// Render the row as a JSON object keyed by column label.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        let map: JsonMap<String, JsonValue> = self
            .iter()
            .map(|(name, value)| (name.to_owned(), value.to_json()))
            .collect();
        JsonValue::Object(map)
    }
}

impl PartialEq for DbRow {
    fn eq(&self, other: &Self) -> bool {
        self.column_names == other.column_names && self.values == other.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DbRow {
        DbRow::new(
            Arc::new(vec!["id".into(), "name".into(), "note".into()]),
            vec![RowValues::Int(2), RowValues::from("b"), RowValues::Null],
        )
    }

    #[test]
    fn lookup_by_label_and_position() {
        let row = sample();
        assert_eq!(row.get("name"), Some(&RowValues::from("b")));
        assert_eq!(row.get_by_index(0), Some(&RowValues::Int(2)));
        assert_eq!(row.get("missing"), None);
        assert_eq!(row.len(), 3);
    }

    #[test]
    fn json_keeps_nulls_as_null() {
        let json = sample().to_json();
        assert_eq!(json["id"], JsonValue::from(2));
        assert_eq!(json["name"], JsonValue::from("b"));
        assert!(json["note"].is_null());
    }

    #[test]
    fn duplicate_labels_resolve_to_first_column() {
        let row = DbRow::new(
            Arc::new(vec!["id".into(), "id".into()]),
            vec![RowValues::Int(1), RowValues::Int(9)],
        );
        assert_eq!(row.get("id"), Some(&RowValues::Int(1)));
    }
}

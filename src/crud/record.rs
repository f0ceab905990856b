use crate::results::DbRow;
use crate::types::RowValues;

/// Ordered field → value pairs written by the CRUD facade.
///
/// Field names become column names in the generated SQL; they are validated
/// against the table schema before anything is executed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, RowValues)>,
}

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Record::set`].
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<RowValues>) -> Self {
        self.set(field, value);
        self
    }

    /// Like [`Record::with`], but `None` leaves the field out entirely.
    #[must_use]
    pub fn with_some<V: Into<RowValues>>(self, field: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(field, value),
            None => self,
        }
    }

    /// Set `field`, replacing an earlier value for the same name in place.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<RowValues>) {
        let field = field.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((field, value)),
        }
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&RowValues> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Remove `field`, returning its value.
    pub fn remove(&mut self, field: &str) -> Option<RowValues> {
        let idx = self.fields.iter().position(|(name, _)| name == field)?;
        Some(self.fields.remove(idx).1)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &RowValues> {
        self.fields.iter().map(|(_, value)| value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<RowValues>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (field, value) in iter {
            record.set(field, value);
        }
        record
    }
}

impl From<&DbRow> for Record {
    fn from(row: &DbRow) -> Self {
        row.iter()
            .map(|(name, value)| (name, value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_in_place_and_keeps_order() {
        let mut record = Record::new().with("title", "a").with("url", "http://x");
        record.set("title", "b");
        assert_eq!(record.names().collect::<Vec<_>>(), vec!["title", "url"]);
        assert_eq!(record.get("title"), Some(&RowValues::from("b")));
        assert_eq!(record.remove("url"), Some(RowValues::from("http://x")));
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn with_some_skips_missing_values() {
        let record = Record::new()
            .with_some("title", Some("a"))
            .with_some("desc", None::<&str>);
        assert_eq!(record.names().collect::<Vec<_>>(), vec!["title"]);
    }
}

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{FeedbaseError, Result};

lazy_static! {
    static ref IDENTIFIER: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
}

/// Accept only plain SQL identifiers so names can be templated into SQL.
///
/// # Errors
/// Returns `FeedbaseError::InvalidIdentifier` for anything else.
pub fn validate_identifier(name: &str) -> Result<&str> {
    if IDENTIFIER.is_match(name) {
        Ok(name)
    } else {
        Err(FeedbaseError::InvalidIdentifier(name.to_owned()))
    }
}

/// Validate and double-quote an identifier.
///
/// # Errors
/// Same as [`validate_identifier`].
pub fn quote_identifier(name: &str) -> Result<String> {
    validate_identifier(name).map(|name| format!("\"{name}\""))
}

pub(crate) fn extract_column_names<I, T>(columns: I) -> Vec<String>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    columns
        .into_iter()
        .map(|col| col.as_ref().to_string())
        .collect()
}

/// True when `sql` starts with a row-creating keyword (`INSERT` or `REPLACE`).
pub(crate) fn is_insert(sql: &str) -> bool {
    let head = sql
        .trim_start()
        .split(|c: char| !c.is_ascii_alphabetic())
        .next()
        .unwrap_or_default();
    head.eq_ignore_ascii_case("insert") || head.eq_ignore_ascii_case("replace")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_detection_ignores_case_and_whitespace() {
        assert!(is_insert("INSERT INTO t VALUES (1)"));
        assert!(is_insert("\n  insert or ignore into t (a) values (?)"));
        assert!(is_insert("Replace INTO t VALUES (1)"));
        assert!(!is_insert("UPDATE t SET a = 1"));
        assert!(!is_insert("inserted_at_view"));
        assert!(!is_insert(""));
    }

    #[test]
    fn identifiers_are_validated_and_quoted() {
        assert_eq!(quote_identifier("feed_id").unwrap(), "\"feed_id\"");
        assert!(quote_identifier("_x9").is_ok());
        for bad in ["", "9lives", "a b", "t; DROP TABLE t", "na\"me"] {
            assert!(matches!(
                validate_identifier(bad),
                Err(FeedbaseError::InvalidIdentifier(_))
            ));
        }
    }
}

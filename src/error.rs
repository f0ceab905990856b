use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedbaseError {
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[error("Failed to open database at {}: {reason}", path.display())]
    OpenFailed { path: PathBuf, reason: String },

    #[error("SQL syntax error: {message}")]
    SqlSyntaxError { message: String },

    #[error("Failed to prepare statement: {0}")]
    PrepareFailed(#[source] rusqlite::Error),

    #[error("Statement expects {expected} parameters, got {actual}")]
    BindArityError { expected: usize, actual: usize },

    #[error("Statement step failed: {0}")]
    StepFailed(#[source] rusqlite::Error),

    #[error("Transaction state error: {0}")]
    TransactionStateError(String),

    #[error("Statement already stepped; prepare a new one to run it again")]
    StatementExhausted,

    #[error("SQL execution error: {0}")]
    ExecutionError(String),

    #[error("Column {column:?} does not hold {expected}")]
    RowDecodeError { column: String, expected: &'static str },

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid SQL identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("Table {table:?} has no column {column:?}")]
    UnknownColumn { table: String, column: String },

    #[error("Parameter error: {0}")]
    ParameterError(String),
}

impl FeedbaseError {
    /// Classify an error returned while compiling SQL.
    pub(crate) fn from_prepare(err: rusqlite::Error) -> Self {
        let message = err.to_string();
        if message.contains("syntax error") || message.contains("incomplete input") {
            FeedbaseError::SqlSyntaxError { message }
        } else {
            FeedbaseError::PrepareFailed(err)
        }
    }
}

/// Crate-wide result alias.
pub type Result<T, E = FeedbaseError> = std::result::Result<T, E>;

//! Editor error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("Row {index} does not exist (table has {len} rows)")]
    RowOutOfRange { index: usize, len: usize },

    #[error("Field '{0}' is not part of the table schema")]
    UnknownField(String),

    #[error("Column key '{0}' is used by more than one column")]
    DuplicateColumn(String),

    #[error("Column key '{0}' contains whitespace or is empty")]
    InvalidColumnKey(String),
}

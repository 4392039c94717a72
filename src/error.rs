use std::fmt;

use thiserror::Error;

use crate::types::FieldType;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a run (or, for `MalformedInfo`, that callers may choose to absorb).
#[derive(Debug, Error)]
pub enum Error {
    #[error("line {line}: expected {expected} tab-separated fields, found {found}")]
    Format {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: POS must be a positive integer, got {value:?}")]
    InvalidPosition { line: usize, value: String },

    #[error("INFO field is empty")]
    MalformedInfo,

    #[error("line {line}: INFO field {field} = {value:?} cannot be read as {expected}")]
    TypeCoercion {
        field: String,
        value: String,
        line: usize,
        expected: FieldType,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot open input: {0}")]
    Decompress(#[from] niffler::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Whether the error concerns a single row only.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::MalformedInfo)
    }
}

/// Row-level anomalies. These travel with the row to the output stage and never drop it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowWarning {
    /// INFO was empty; declared fields were null-filled.
    MalformedInfo,
    /// The annotation field was present but held no effect groups.
    EmptyAnnotation,
    /// Effect group `index` had `found` sub-attributes instead of 16.
    MalformedEffect { index: usize, found: usize },
}

impl fmt::Display for RowWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowWarning::MalformedInfo => write!(f, "empty INFO field, declared fields left null"),
            RowWarning::EmptyAnnotation => write!(f, "annotation field holds no effects"),
            RowWarning::MalformedEffect { index, found } => write!(
                f,
                "effect #{} has {} sub-fields instead of {}",
                index,
                found,
                crate::types::ANN_FIELD_COUNT
            ),
        }
    }
}

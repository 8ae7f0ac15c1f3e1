use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type shared by every table, matrix and model operation.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Dataset not found at '{}': {source}", path.display())]
    DatasetNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Column not found: '{0}'")]
    ColumnNotFound(String),

    #[error("Duplicate column: '{0}'")]
    DuplicateColumn(String),

    #[error("Column '{column}' has {got} rows, table has {expected}")]
    RaggedColumn {
        column: String,
        expected: usize,
        got: usize,
    },

    #[error("Column '{column}' row {row} is missing or non-numeric")]
    NonNumericCell { column: String, row: usize },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("Feature names differ: fitted {fitted:?}, got {got:?}")]
    FeatureNamesMismatch {
        fitted: Vec<String>,
        got: Vec<String>,
    },

    #[error("{0} must be fitted before use")]
    NotFitted(&'static str),

    #[error("Classifier failure: {0}")]
    ClassifierFailure(String),

    #[error("I/O error while {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

pub type DataResult<T> = Result<T, DataError>;

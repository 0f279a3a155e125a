use scorewatch_types::error::TypeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DriftError {
    #[error("Empty array: {0}")]
    EmptyArrayError(String),

    #[error("n_bins must be at least 1, got {0}")]
    InvalidBinCountError(usize),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error(transparent)]
    ArrowError(#[from] arrow::error::ArrowError),

    #[error(transparent)]
    TypeError(#[from] TypeError),
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetricError {
    #[error("Label and score length mismatch: {labels} labels, {scores} scores")]
    LengthMismatch { labels: usize, scores: usize },

    #[error("Labels must be 0 or 1, found {0}")]
    InvalidLabel(u8),

    #[error("Scores must not be NaN, found NaN at position {0}")]
    NanScore(usize),

    #[error("Only one class present in labels. AUC is not defined in that case")]
    SingleClass,

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("{0}")]
    InvalidParameterError(String),

    #[error(transparent)]
    ArrowError(#[from] arrow::error::ArrowError),

    #[error(transparent)]
    TypeError(#[from] scorewatch_types::error::TypeError),
}

use std::fmt::Display;
use thiserror::Error;
use tracing::error;

pub trait TracedError: Display {
    fn trace(&self) {
        error!("{}", self);
    }
}

#[derive(Error, Debug)]
pub enum UtilError {
    #[error("Failed to serialize: {0}")]
    SerializeError(String),

    #[error("Failed to deserialize: {0}")]
    DeSerializeError(String),

    #[error("Failed to get parent path")]
    GetParentPathError,

    #[error("Failed to create directory")]
    CreateDirectoryError,

    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

impl TracedError for UtilError {}

impl UtilError {
    pub fn traced_serialize_error(err: impl Display) -> Self {
        let error = Self::SerializeError(err.to_string());
        error.trace();
        error
    }

    pub fn traced_deserialize_error(err: impl Display) -> Self {
        let error = Self::DeSerializeError(err.to_string());
        error.trace();
        error
    }
}

#[derive(Error, Debug)]
pub enum TypeError {
    #[error("{0}")]
    InvalidParameterError(String),

    #[error("Empty array: {0}")]
    EmptyArrayError(String),

    #[error(transparent)]
    ArrowError(#[from] arrow::error::ArrowError),
}

//! FILENAME: core/persistence/src/error.rs

use matrix_engine::{DatasetError, ValidationError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XLSX write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("XLSX read error: {0}")]
    XlsxRead(#[from] calamine::XlsxError),

    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    #[error("Invalid dataset: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Invalid group {index}: {source}")]
    Group {
        index: usize,
        #[source]
        source: ValidationError,
    },
}

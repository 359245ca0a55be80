//! Error handling for the facility registry pipeline.

use std::io;
use std::path::{Path, PathBuf};

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Errors that can occur while running a pipeline stage
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Error opening, reading or writing a file
    #[error("IO error at {path}: {source}")]
    Io {
        /// Path of the file or directory involved
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Error reading a raw registry spreadsheet
    #[error("Spreadsheet error in {path}: {message}")]
    Spreadsheet {
        /// Path of the workbook
        path: PathBuf,
        /// Description of the failure
        message: String,
    },

    /// Arrow error
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error reading or writing a CSV exchange file
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error converting between records and Arrow batches or JSON
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid specialty taxonomy
    #[error("Taxonomy error: {0}")]
    Taxonomy(String),

    /// A required column is absent from a table
    #[error("Column '{0}' not found")]
    MissingColumn(String),

    /// Data failed a structural check
    #[error("Validation error: {0}")]
    Validation(String),
}

impl PipelineError {
    /// Wrap an IO error with the path it occurred on
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a spreadsheet error for the given workbook
    pub fn spreadsheet(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Spreadsheet {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }
}

impl From<serde_arrow::Error> for PipelineError {
    fn from(error: serde_arrow::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

//! Error handling for the survey base reader.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Specialized error type for the survey base reader
#[derive(Debug, Error)]
pub enum BaseReaderError {
    /// Error opening or reading the base file
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<io::Error>,
    },

    /// Error processing Arrow data
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Error parsing the CSV structure
    #[error("CSV error: {0}")]
    Csv(String),

    /// Error resolving or validating columns
    #[error("Schema error: {0}")]
    Schema(String),

    /// Error evaluating filter criteria
    #[error("Filter error: {0}")]
    Filter(String),

    /// Error talking to the generative model
    #[error("Interpreter error: {0}")]
    Interpreter(String),
}

impl BaseReaderError {
    /// Create an IO error with a message
    #[must_use]
    pub fn io_error(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: None,
            source: None,
        }
    }

    /// Create an IO error wrapping an underlying `std::io::Error`
    #[must_use]
    pub fn io_error_with_source(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            path: None,
            source: Some(source),
        }
    }

    /// Create a CSV error with a message
    #[must_use]
    pub fn csv_error(message: impl Into<String>) -> Self {
        Self::Csv(message.into())
    }

    /// Create a schema error with a message
    #[must_use]
    pub fn schema_error(message: impl Into<String>) -> Self {
        Self::Schema(message.into())
    }

    /// Create a filter error with a message
    #[must_use]
    pub fn filter_error(message: impl Into<String>) -> Self {
        Self::Filter(message.into())
    }

    /// Create an interpreter error with a message
    #[must_use]
    pub fn interpreter_error(message: impl Into<String>) -> Self {
        Self::Interpreter(message.into())
    }

    /// Attach a path to an IO error for richer context
    #[must_use]
    pub fn with_path(self, path: impl AsRef<Path>) -> Self {
        match self {
            Self::Io {
                message, source, ..
            } => Self::Io {
                message: format!("{message} (path: {})", path.as_ref().display()),
                path: Some(path.as_ref().to_path_buf()),
                source,
            },
            other => other,
        }
    }
}

/// Result type for survey base operations
pub type Result<T> = anyhow::Result<T>;

/// Create a filter error with the given message
pub fn filter_err<T>(message: impl AsRef<str>) -> Result<T> {
    Err(BaseReaderError::filter_error(message.as_ref()).into())
}

/// Create a column not found error
///
/// # Arguments
/// * `column_name` - The name of the column that was not found
///
/// # Returns
/// A filter error for the missing column
pub fn column_not_found<T>(column_name: &str) -> Result<T> {
    filter_err(format!("Column '{column_name}' not found"))
}

/// Create a column type error
///
/// # Arguments
/// * `column_name` - The name of the column
/// * `expected_type` - The expected type
///
/// # Returns
/// A filter error for the type mismatch
pub fn column_type_error<T>(column_name: &str, expected_type: &str) -> Result<T> {
    filter_err(format!(
        "Column '{column_name}' is not a {expected_type} array"
    ))
}

//! Errors
use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by partitioners, operators and vectors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Bad or inconsistent input. Nothing was modified.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Invalid index range or column count passed to a vector operation
    #[error("invalid argument in {operation}: {details}")]
    InvalidArgument {
        /// The operation that rejected its input
        operation: &'static str,
        /// What was wrong
        details: String,
    },

    /// The operation must be provided by a more specialised implementation
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
}

impl Error {
    pub(crate) fn configuration(details: impl Into<String>) -> Self {
        Self::Configuration(details.into())
    }

    pub(crate) fn invalid_argument(operation: &'static str, details: impl Into<String>) -> Self {
        Self::InvalidArgument {
            operation,
            details: details.into(),
        }
    }
}

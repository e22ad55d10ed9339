//! Crate-wide error type.
//!
//! Every validation failure is reported synchronously at the offending call.
//! Nothing is padded, truncated, or otherwise coerced.

/// Errors produced by the GA and network engines.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A vector or matrix does not have the width the operation requires.
    #[error("dimension mismatch in {context}: expected {expected}, got {actual}")]
    Dimension {
        /// Which argument or structure was mis-sized.
        context: &'static str,
        /// The required length.
        expected: usize,
        /// The length that was supplied.
        actual: usize,
    },

    /// A parameter or input structure is invalid.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A snapshot blob could not be encoded or decoded.
    #[error("snapshot encoding failed: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn dimension(context: &'static str, expected: usize, actual: usize) -> Self {
        Error::Dimension {
            context,
            expected,
            actual,
        }
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }
}

//! Custom error types for sankey-gen
//!
//! This module defines the error hierarchy for the report pipeline using
//! thiserror for ergonomic error definitions.

use thiserror::Error;

/// The main error type for sankey-gen operations
#[derive(Error, Debug)]
pub enum SankeyError {
    /// Configuration-related errors (missing sections, bad keys)
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Validation errors for loaded values
    #[error("Validation error: {0}")]
    Validation(String),

    /// A ledger row that could not be turned into a transaction
    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    /// An amount or sum that does not fit the integer range
    #[error("Amount overflow: {0}")]
    Overflow(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl SankeyError {
    /// Create a malformed record error for a ledger line
    pub fn malformed(line: u64, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }

    /// Check if this is a malformed record error
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedRecord { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for SankeyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for sankey-gen operations
pub type SankeyResult<T> = Result<T, SankeyError>;

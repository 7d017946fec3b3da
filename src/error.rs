//! Error types for search operations.
//!
//! This module provides the [`SearchError`] type for all marcgrep operations
//! and the [`Result`] convenience type.

use thiserror::Error;

/// Error type for all marcgrep operations.
///
/// Absent fields and degenerate records are never errors; predicate
/// evaluation resolves those locally as "unsatisfied". The variants here are
/// the conditions that abort a run.
#[derive(Error, Debug)]
pub enum SearchError {
    /// A field cardinality expression that is not `N`, `N+`, `-N`, `N-M`, or `0`.
    #[error("invalid count expression: '{0}'")]
    InvalidCount(String),

    /// A search pattern that is not a valid regular expression.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// The external decoder program could not be run or reported failure.
    #[error("decoder error: {0}")]
    Decoder(String),

    /// IO error from an input file or the decoder pipe.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Convenience type alias for [`std::result::Result`] with [`SearchError`].
pub type Result<T> = std::result::Result<T, SearchError>;

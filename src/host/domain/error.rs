//! Error types for host domain validation.

use thiserror::Error;

/// Errors returned while constructing a skill path.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathError {
    /// The path is empty.
    #[error("skill path must not be empty")]
    Empty,

    /// The path does not start with `/`.
    #[error("skill path '{0}' must start with '/'")]
    MissingLeadingSlash(String),

    /// The path contains whitespace.
    #[error("skill path '{0}' must not contain whitespace")]
    ContainsWhitespace(String),
}

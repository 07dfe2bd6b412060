//! Error types for rowmodel.

use std::fmt;

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the persistence core.
///
/// There is no retry or recovery at this layer: backend failures propagate
/// verbatim and callers own retry/abort policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The backend reported a failure (malformed query, constraint
    /// violation, connectivity).
    Backend {
        /// Driver-provided message, passed through untouched.
        message: String,
    },
    /// A declared primary-key field holds no value at update/delete time.
    ///
    /// This indicates a programming error in the concrete entity (a key
    /// declared but never set), not a transient condition.
    MissingKey {
        /// The absent primary-key field, in field-case.
        field: String,
        /// The storage target the entity persists to.
        target: String,
    },
}

impl Error {
    /// Construct a backend error from any driver message.
    pub fn backend(message: impl Into<String>) -> Self {
        Error::Backend {
            message: message.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Backend { message } => write!(f, "backend error: {message}"),
            Error::MissingKey { field, target } => {
                write!(f, "field {field} does not exist within {target}")
            }
        }
    }
}

impl std::error::Error for Error {}

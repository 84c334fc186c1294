//! Loader error types.

use std::path::PathBuf;

use crate::domain::DomainError;

/// Errors in the content of a configuration file.
///
/// Every variant carries the 1-based line number of the offending record.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Wrong number of fields or a non-numeric numeric field
    #[error("malformed data on line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    /// Record refers to a stop that was never declared
    #[error("unknown tram stop {id} on line {line}")]
    UnknownStop { line: usize, id: String },

    /// Record is well-formed but violates a network invariant
    #[error("invalid record on line {line}: {source}")]
    Invalid { line: usize, source: DomainError },

    /// The underlying reader failed
    #[error("failed to read line {line}: {source}")]
    Read {
        line: usize,
        source: std::io::Error,
    },
}

impl LoadError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        LoadError::Malformed {
            line,
            reason: reason.into(),
        }
    }
}

/// Errors while preparing a network from files on disk.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// Configuration file does not exist
    #[error("configuration file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Configuration file exists but cannot be read
    #[error("permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },

    /// A directory was given where a file is expected
    #[error("path is a directory, not a file: {}", path.display())]
    IsADirectory { path: PathBuf },

    /// Any other I/O failure
    #[error("failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// File was read but its content is invalid
    #[error("invalid configuration in {}: {source}", path.display())]
    Config { path: PathBuf, source: LoadError },

    /// A tram could not be registered on a line
    #[error("cannot register trams on line {line}: {source}")]
    Fleet { line: String, source: DomainError },
}

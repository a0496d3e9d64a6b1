//! Error types for costar-core.

use std::path::{Path, PathBuf};

/// Errors that can occur while loading or analysing credit data.
///
/// All error variants are marked with `#[non_exhaustive]` to allow
/// adding new error types without breaking changes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// I/O error with the path that triggered it.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// File that could not be read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// CSV reader error that is not tied to a single row.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed input that cannot be recovered from.
    #[error("Parse error: {message}")]
    Parse {
        /// What went wrong
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// A named entity (character, episode, file) was not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Kind of entity that was looked up
        kind: String,
        /// Identifier that was not found
        id: String,
    },
}

/// Convenience `Result` type alias for costar operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates an I/O error carrying the path that produced it.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a new parse error.
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Error::Parse {
            message: message.into(),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates a new not-found error.
    pub fn not_found<K, I>(kind: K, id: I) -> Self
    where
        K: Into<String>,
        I: Into<String>,
    {
        Error::NotFound {
            kind: kind.into(),
            id: id.into(),
        }
    }

    /// Returns whether this error means something was missing.
    ///
    /// True for unknown entities and for I/O errors of kind `NotFound`
    /// (a missing dataset file).
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound { .. } => true,
            Error::Io { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = Error::not_found("character", "Rose");
        assert_eq!(err.to_string(), "character not found: Rose");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_io_not_found_is_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Error::io_with_path(io, "/data/credits.csv");
        assert!(err.is_not_found());
        assert!(err.to_string().contains("/data/credits.csv"));
    }

    #[test]
    fn test_io_permission_denied_is_not_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::io_with_path(io, "/data/credits.csv");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_config_error() {
        let err = Error::config("unknown layout");
        assert_eq!(err.to_string(), "Configuration error: unknown layout");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_parse_error() {
        let err = Error::parse("header row missing");
        assert_eq!(err.to_string(), "Parse error: header row missing");
    }

    #[test]
    fn test_serde_error_conversion() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{bad").unwrap_err();
        let err: Error = serde_err.into();
        assert!(err.to_string().starts_with("Serialization error"));
    }

    #[test]
    fn test_error_implements_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}

//! Error types for docbind library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for docbind operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while aggregating or rendering documentation.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The documentation source directory does not exist.
    #[error("Missing source folder: {}", .0.display())]
    MissingSource(PathBuf),

    /// Invalid regular expression.
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// Error while walking the source tree.
    #[error("Source walk error: {0}")]
    Walk(String),

    /// Error building or serializing the PDF object graph.
    #[error("PDF writing error: {0}")]
    Pdf(String),

    /// The document tree handed to the renderer is not well formed.
    #[error("Malformed document tree: {0}")]
    MalformedTree(String),

    /// A renderer operation was called out of order.
    #[error("Invalid renderer state: expected {expected}, found {actual}")]
    InvalidState {
        /// State the operation requires
        expected: &'static str,
        /// State the renderer was in
        actual: &'static str,
    },

    /// Error during rendering (flow, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// No rendering strategy produced an output document.
    #[error("All rendering strategies failed: {}", .0.join("; "))]
    AllStrategiesFailed(Vec<String>),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::Pdf(err.to_string()),
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        match err.into_io_error() {
            Some(e) => Error::Io(e),
            None => Error::Walk("filesystem loop detected".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MissingSource(PathBuf::from("docs/content"));
        assert_eq!(err.to_string(), "Missing source folder: docs/content");

        let err = Error::InvalidState {
            expected: "walking",
            actual: "submitted",
        };
        assert_eq!(
            err.to_string(),
            "Invalid renderer state: expected walking, found submitted"
        );
    }

    #[test]
    fn test_all_strategies_failed_display() {
        let err = Error::AllStrategiesFailed(vec![
            "pandoc: not found".to_string(),
            "fallback: broken".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "All rendering strategies failed: pandoc: not found; fallback: broken"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}

//! Error types for sitegrab
//!
//! This module provides error handling for the library, including:
//! - Domain-specific error types (Mirror, Archive)
//! - Request validation errors raised before any subprocess is spawned
//! - Context information (exit codes, file paths)

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for sitegrab operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for sitegrab
///
/// This is the primary error type used throughout the library. Each variant includes
/// contextual information to help diagnose issues.
#[derive(Debug, Error)]
pub enum Error {
    /// Request rejected during validation, before HTTrack is launched
    #[error("invalid request: {message}")]
    InvalidRequest {
        /// Human-readable description of the rejected field
        message: String,
    },

    /// Mirroring error (binary discovery, launch, non-zero exit, missing output)
    #[error("mirror error: {0}")]
    Mirror(#[from] MirrorError),

    /// Archive packaging error
    #[error("archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A blocking worker task panicked or was cancelled
    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Errors from running the external HTTrack binary
#[derive(Debug, Error)]
pub enum MirrorError {
    /// HTTrack binary was not found via explicit path or PATH discovery
    #[error("httrack binary not found; install HTTrack or set ToolOptions::httrack_path")]
    BinaryNotFound,

    /// The subprocess could not be spawned
    #[error("failed to launch httrack at {path}: {reason}")]
    LaunchFailed {
        /// Path of the binary that failed to launch
        path: PathBuf,
        /// Underlying OS error text
        reason: String,
    },

    /// HTTrack exited with a non-zero status
    ///
    /// A non-zero exit after partial output is treated as fatal; the run is
    /// never continued on a best-effort basis.
    #[error("httrack exited with status {code:?}")]
    ToolFailed {
        /// Exit code reported by the OS, `None` if terminated by signal
        code: Option<i32>,
    },

    /// The expected project directory was absent after the subprocess completed
    #[error("httrack did not create expected directory: {path}")]
    OutputMissing {
        /// The project directory that should have been created
        path: PathBuf,
    },
}

/// Errors from packaging the mirrored tree into a ZIP archive
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The directory to be archived does not exist
    #[error("project directory does not exist: {path}")]
    MissingProjectDir {
        /// The directory that was expected to hold the mirrored tree
        path: PathBuf,
    },

    /// The archive file was absent or zero-length after writing
    #[error("archive was not created or is empty: {path}")]
    EmptyArchive {
        /// Path the archive was expected at
        path: PathBuf,
    },

    /// ZIP encoding error
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// A file disappeared or became unreadable mid-walk
    #[error("failed to read {path}: {reason}")]
    Unreadable {
        /// File that could not be read
        path: PathBuf,
        /// Underlying error text
        reason: String,
    },
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let err = Error::from(MirrorError::ToolFailed { code: Some(2) });
        assert!(err.to_string().contains("Some(2)"));

        let err = Error::from(ArchiveError::MissingProjectDir {
            path: PathBuf::from("/tmp/missing"),
        });
        assert!(err.to_string().contains("/tmp/missing"));
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn invalid_request_message_surfaces() {
        let err = Error::InvalidRequest {
            message: "URL must start with http:// or https://".to_string(),
        };
        assert!(err.to_string().starts_with("invalid request:"));
    }
}

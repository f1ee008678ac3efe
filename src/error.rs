//! Error types for codebase-casing.
//!
//! All fallible operations return `Result<T>` which aliases `Result<T, CasingError>`.
//! Only configuration errors escape a run; per-item failures are logged and
//! recorded on the batch that hit them.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from casing conversion runs.
#[derive(Debug, Error)]
pub enum CasingError {
    /// Target directory does not exist.
    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    /// Target path exists but is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// No `.gitignore` could be found while `--require-gitignore` is set.
    #[error(".gitignore file not found (looked in {0} and the current directory)")]
    IgnoreFileMissing(PathBuf),

    /// Extension list entry is malformed.
    #[error("Invalid file extension '{0}': {1}")]
    InvalidExtension(String, String),

    /// Uncommitted changes in the git working tree.
    #[error("Working tree has uncommitted changes")]
    DirtyWorkspace,

    /// Source file could not be parsed.
    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// File system operation failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Ignore rule loading or directory walking failed.
    #[error("Ignore error: {0}")]
    Ignore(#[from] ignore::Error),

    /// Unexpected error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for codebase-casing operations.
pub type Result<T> = std::result::Result<T, CasingError>;

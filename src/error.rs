//! Error types for linkreap
//!
//! Centralized error handling using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// All error types that can occur in linkreap
#[derive(Debug, Error)]
pub enum LinkreapError {
    /// A scan root does not exist
    #[error("Root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// A scan root exists but is not a directory
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Interactive input could not be read
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for linkreap operations
pub type Result<T> = std::result::Result<T, LinkreapError>;

/// Fail unless `path` is an existing directory.
pub fn ensure_dir(path: &std::path::Path) -> Result<()> {
    if !path.exists() {
        return Err(LinkreapError::RootNotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(LinkreapError::NotADirectory(path.to_path_buf()));
    }
    Ok(())
}

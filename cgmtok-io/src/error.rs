use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;
use thiserror::Error;

/// Error type for saving and loading encoded datasets.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// IO error occurred during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Failed to create the output directory.
    #[error("Failed to create dataset directory: {0}")]
    DirectoryCreation(PathBuf),

    /// Failed to encode or decode the Arrow payload.
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Failed to read or write dataset metadata.
    #[error("Metadata error: {0}")]
    Metadata(#[from] serde_json::Error),

    /// The directory is not a dataset written by this crate.
    #[error("Not a valid dataset directory: {0}")]
    InvalidDataset(String),
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;

//! Ingestion Error Types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort reading a whole sample file
#[derive(Debug, Error)]
pub enum ReadError {
    /// Input path does not exist
    #[error("File does not exist: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Underlying I/O failure while opening or reading
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

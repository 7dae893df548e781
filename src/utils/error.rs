//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading the source table
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Source table unavailable at {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Source table is not valid CSV: {0}")]
    ParseFailure(#[from] csv::Error),

    #[error("Source table has no header row after {0} metadata rows")]
    MissingHeader(usize),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),

    #[error("Report is not valid JSON: {0}")]
    DeserializationFailed(#[source] serde_json::Error),

    #[error("Failed to read report {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while using the comment log
#[derive(Error, Debug)]
pub enum CommentError {
    #[error("Comment log I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Comment log is malformed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Comment log lock was poisoned")]
    Poisoned,
}

//! Error types for normalization

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during normalization
#[derive(Error, Debug)]
pub enum NormalizerError {
    /// Input file path does not exist
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Input markup could not be parsed into sections
    #[error("XML parse error: {0}")]
    Parse(String),

    /// I/O failure while reading the input
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

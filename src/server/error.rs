//! Error types for the gateway server.

use std::path::PathBuf;

use thiserror::Error;

use crate::parser::Error as ParserError;

/// Errors that can occur during server operation.
#[derive(Debug, Error)]
pub enum Error {
    /// Error reading a request off the connection.
    #[error("Parse error: {0}")]
    ParseError(#[from] ParserError),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The configured working directory is missing or not a directory.
    #[error("Working directory {0} does not exist or is not a directory")]
    InvalidWorkingDirectory(PathBuf),
}

//! Error types for the request reader.

use thiserror::Error;

/// Errors that can occur while reading a request off the wire.
#[derive(Debug, Error)]
pub enum Error {
    /// The stream closed before a request line arrived.
    #[error("Empty request")]
    EmptyRequest,

    /// The request line does not carry both a verb and a path.
    #[error("Malformed request line: {0}")]
    MalformedRequestLine(String),

    /// The stream failed while reading the request line or headers.
    #[error("I/O error while reading request: {0}")]
    Io(#[from] std::io::Error),
}

//! Request reader module.
//!
//! This module turns the raw bytes of a connection into an [`HttpRequest`]:
//! one request line, a small set of recognized headers and a body of
//! exactly `Content-Length` bytes.

mod request;
mod method;
mod error;

// Re-export public items
pub use request::HttpRequest;
pub use method::Method;
pub use error::Error;

// Re-export the reading functions
pub use request::{parse_request_line, read_request};

//! HTTP request methods.

use std::fmt;

/// Request verbs understood by the gateway.
///
/// Any token outside the four filesystem verbs is kept verbatim in
/// [`Method::Other`] instead of being rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET method: reads a file or lists a directory.
    GET,
    /// POST method: creates a new file or directory.
    POST,
    /// PUT method: overwrites an existing file.
    PUT,
    /// DELETE method: removes a file or directory.
    DELETE,
    /// Any other verb token.
    Other(String),
}

impl From<&str> for Method {
    fn from(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            other => Method::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Other(token) => f.write_str(token),
            known => write!(f, "{known:?}"),
        }
    }
}

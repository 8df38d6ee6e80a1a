//! HTTP request reading and representation.

use log::{debug, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use crate::parser::error::Error;
use crate::parser::method::Method;

/// Upper bound on the buffer reserved up front for a request body.
///
/// The declared `Content-Length` is client controlled, so larger bodies
/// grow the buffer as bytes actually arrive.
const MAX_BODY_PREALLOCATION: usize = 64 * 1024;

/// Represents a request read off a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// The request verb (GET, POST, etc.)
    pub method: Method,
    /// The target path, relative to the working directory
    pub path: String,
    /// The declared body length
    pub content_length: usize,
    /// Set by `Create-Directory: True`
    pub create_directory: bool,
    /// Set by `Remove-Directory: True`
    pub remove_directory: bool,
    /// Set when the `Host` header disagrees with the expected domain
    pub wrong_domain: bool,
    /// The request body
    pub body: Vec<u8>,
}

impl HttpRequest {
    /// Create a new request with no headers applied and an empty body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            content_length: 0,
            create_directory: false,
            remove_directory: false,
            wrong_domain: false,
            body: Vec::new(),
        }
    }

    /// Create a new request carrying `body`, with a matching content length.
    pub fn with_body(method: Method, path: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        let mut request = Self::new(method, path);
        request.body = body.into();
        request.content_length = request.body.len();
        request
    }

    /// Apply one header line to the request.
    ///
    /// The line is split on its first space; the name keeps its trailing
    /// colon and is matched exactly. Unknown headers and recognized
    /// headers without a value are ignored.
    pub fn apply_header(&mut self, line: &str, expected_domain: Option<&str>) {
        let Some((name, value)) = line.split_once(' ') else {
            return;
        };

        match name {
            "Content-Length:" => {
                self.content_length = value.parse().unwrap_or(0);
            }
            "Create-Directory:" => {
                if value == "True" {
                    self.create_directory = true;
                }
            }
            "Remove-Directory:" => {
                if value == "True" {
                    self.remove_directory = true;
                }
            }
            "Host:" => match expected_domain {
                Some(domain) if !domain.is_empty() && domain != value => {
                    self.wrong_domain = true;
                }
                _ => {}
            },
            _ => {}
        }
    }
}

/// Split a request line into its verb and path.
///
/// Tokens are separated by single spaces. Anything after the path,
/// including the protocol version, is ignored.
pub fn parse_request_line(line: &str) -> Result<(Method, String), Error> {
    let mut parts = line.split(' ');
    match (parts.next(), parts.next()) {
        (Some(verb), Some(path)) => Ok((Method::from(verb), path.to_string())),
        _ => Err(Error::MalformedRequestLine(line.to_string())),
    }
}

/// Read one line, stripping the trailing CR/LF characters.
///
/// Returns `None` once the stream is exhausted.
async fn read_line<R>(reader: &mut R) -> Result<Option<String>, Error>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf).await? == 0 {
        return Ok(None);
    }

    while matches!(buf.last(), Some(b'\r' | b'\n')) {
        buf.pop();
    }

    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// Read a single request from a buffered stream.
///
/// # Arguments
///
/// * `reader` - The buffered connection stream
/// * `expected_domain` - The domain `Host` headers must match, if any
///
/// # Returns
///
/// The parsed request. A body shorter than the declared `Content-Length`
/// is logged and kept as received rather than treated as an error.
pub async fn read_request<R>(reader: &mut R, expected_domain: Option<&str>) -> Result<HttpRequest, Error>
where
    R: AsyncBufRead + Unpin,
{
    let request_line = read_line(reader).await?.ok_or(Error::EmptyRequest)?;
    debug!("Got line: {request_line:?}");

    let (method, path) = parse_request_line(&request_line)?;
    let mut request = HttpRequest::new(method, path);

    // End of stream terminates the header block just like a blank line
    while let Some(line) = read_line(reader).await? {
        if line.is_empty() {
            break;
        }
        debug!("Got line: {line:?}");
        request.apply_header(&line, expected_domain);
    }

    let expected = request.content_length;
    let mut body = Vec::with_capacity(expected.min(MAX_BODY_PREALLOCATION));
    match (&mut *reader).take(expected as u64).read_to_end(&mut body).await {
        Ok(n) if n < expected => {
            warn!("Error while reading body: expected {expected} bytes, got {n}");
        }
        Ok(_) => {}
        Err(e) => {
            warn!("Error while reading body after {len} bytes: {e}", len = body.len());
        }
    }
    request.body = body;

    Ok(request)
}

//! HTTP response types and the wire serializer.

use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Value of the `Server` header on every response.
pub const SERVER_NAME: &str = "filegate";

/// HTTP status codes with their standard reason phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusCode {
    #[default]
    Ok = 200,
    BadRequest = 400,
    NotFound = 404,
    NotAcceptable = 406,
    Conflict = 409,
}

impl StatusCode {
    /// Get the reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::NotAcceptable => "Not Acceptable",
            StatusCode::Conflict => "Conflict",
        }
    }

    /// Numeric code as it appears on the status line.
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }
}

/// The outcome of a single request, prior to serialization.
///
/// A response with no content type still emits an empty `Content-Type`
/// header; clients of the gateway already expect that shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code
    pub status: StatusCode,
    /// The content type, if one applies
    pub content_type: Option<String>,
    /// The response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Create a new empty response with the given status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    /// Set the response body with a string.
    pub fn with_body_string(self, body: impl Into<String>) -> Self {
        self.with_body_bytes(body.into().into_bytes())
    }

    /// Set the response body with bytes.
    pub fn with_body_bytes(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Set the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Convert the response to bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let content_type = self.content_type.as_deref().unwrap_or_default();
        let head = format!(
            "HTTP/1.1 {code} {reason}\r\n\
             Server: {SERVER_NAME}\r\n\
             Content-Length: {len}\r\n\
             Content-Type: {content_type}\r\n\
             \r\n",
            code = self.status.as_u16(),
            reason = self.status.reason_phrase(),
            len = self.body.len(),
        );

        let mut bytes = Vec::with_capacity(head.len() + self.body.len());
        bytes.extend_from_slice(head.as_bytes());
        bytes.extend_from_slice(&self.body);
        bytes
    }
}

/// Serialize `response` and write it to `stream` in a single pass.
pub async fn write_response<W>(stream: &mut W, response: &HttpResponse) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    stream.write_all(&response.to_bytes()).await?;
    stream.flush().await
}

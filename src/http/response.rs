use std::collections::HashMap;
use std::fmt;

use tokio::io::AsyncRead;

/// HTTP status codes the server emits.
///
/// - `Ok` (200): file served
/// - `BadRequest` (400): request head could not be parsed
/// - `Forbidden` (403): target resolved outside the asset root
/// - `NotFound` (404): missing file or non-file target
/// - `InternalServerError` (500): anything else
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use slingshot::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::Forbidden.as_u16(), 403);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

/// Source of a streamed response body.
pub type BodyReader = Box<dyn AsyncRead + Send + Unpin>;

/// Response payload.
pub enum Body {
    /// Small in-memory body (error messages)
    Full(Vec<u8>),
    /// Body read incrementally from `reader`; exactly `len` bytes are
    /// announced in `Content-Length`.
    Stream { reader: BodyReader, len: u64 },
}

impl Body {
    pub fn len(&self) -> u64 {
        match self {
            Body::Full(bytes) => bytes.len() as u64,
            Body::Stream { len, .. } => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Full(bytes) => f.debug_tuple("Full").field(&bytes.len()).finish(),
            Body::Stream { len, .. } => f.debug_struct("Stream").field("len", len).finish(),
        }
    }
}

/// An HTTP response ready to be written to a client.
#[derive(Debug)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// HTTP headers as key-value pairs
    pub headers: HashMap<String, String>,
    pub body: Body,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "image/png")
///     .stream(Box::new(file), len)
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: HashMap<String, String>,
    body: Body,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Body::Full(Vec::new()),
        }
    }

    /// Adds or replaces a header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets an in-memory body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Body::Full(body);
        self
    }

    /// Sets a streamed body of `len` bytes.
    pub fn stream(mut self, reader: BodyReader, len: u64) -> Self {
        self.body = Body::Stream { reader, len };
        self
    }

    /// Builds the final Response.
    ///
    /// Adds `Content-Length` from the body size unless already present.
    pub fn build(mut self) -> Response {
        let len = self.body.len();
        self.headers
            .entry("Content-Length".to_string())
            .or_insert_with(|| len.to_string());

        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// 200 OK streaming `len` bytes from `reader` as `content_type`.
    pub fn file(content_type: &str, reader: BodyReader, len: u64) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", content_type)
            .stream(reader, len)
            .build()
    }

    /// Plain-text response with a short fixed message.
    pub fn text(status: StatusCode, message: &str) -> Self {
        ResponseBuilder::new(status)
            .header("Content-Type", "text/plain")
            .body(message.as_bytes().to_vec())
            .build()
    }

    pub fn bad_request() -> Self {
        Self::text(StatusCode::BadRequest, "Bad request")
    }

    pub fn forbidden() -> Self {
        Self::text(StatusCode::Forbidden, "Forbidden")
    }

    pub fn not_found() -> Self {
        Self::text(StatusCode::NotFound, "Not found")
    }

    pub fn server_error() -> Self {
        Self::text(StatusCode::InternalServerError, "Server error")
    }

    /// Returns the in-memory body, or `None` for a streamed one.
    pub fn body_bytes(&self) -> Option<&[u8]> {
        match &self.body {
            Body::Full(bytes) => Some(bytes),
            Body::Stream { .. } => None,
        }
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("Content-Type").map(|v| v.as_str())
    }
}

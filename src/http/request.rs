use std::collections::HashMap;

/// HTTP request methods.
///
/// Every method is routed through the same asset pipeline; none is rejected.
/// `HEAD` is the only one treated differently, and only by the writer, which
/// omits the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
    /// PUT - Replace a resource
    PUT,
    /// DELETE - Delete a resource
    DELETE,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// OPTIONS - Describe communication options
    OPTIONS,
    /// PATCH - Partial modification of a resource
    PATCH,
    /// Any other syntactically valid method token
    Other(String),
}

/// A parsed HTTP request head. Request bodies are never read into memory;
/// the connection skips them using [`Request::body_framing`].
///
/// Header names are stored lowercased so lookups are case-insensitive.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The raw request target, query string included (e.g. "/js/game.js?v=2")
    pub target: String,
    /// HTTP version (typically "HTTP/1.1")
    pub version: String,
    /// Request headers keyed by lowercased name
    pub headers: HashMap<String, String>,
}

/// How the body following a request head is delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFraming {
    /// No body
    Empty,
    /// Exactly this many bytes follow the head
    Length(u64),
    /// `Transfer-Encoding` is present; the body can only be skipped by
    /// decoding it, so the connection is closed instead
    Unframed,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Option<Method>,
    target: Option<String>,
    version: Option<String>,
    headers: HashMap<String, String>,
}

impl Method {
    /// Parses a method token. Known methods are case-sensitive; any other
    /// valid token becomes `Method::Other`.
    ///
    /// Returns `None` if `s` is empty or contains characters that are not
    /// allowed in an HTTP token.
    ///
    /// # Example
    ///
    /// ```
    /// # use slingshot::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("get"), Some(Method::Other("get".into())));
    /// assert_eq!(Method::from_str("G(T"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let method = match s {
            "GET" => Method::GET,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            "HEAD" => Method::HEAD,
            "OPTIONS" => Method::OPTIONS,
            "PATCH" => Method::PATCH,
            _ if is_token(s) => Method::Other(s.to_string()),
            _ => return None,
        };
        Some(method)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
            Method::Other(s) => s.as_str(),
        }
    }
}

// RFC 9110 tchar
fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| {
            b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
        })
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            target: None,
            version: None,
            headers: HashMap::new(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(key.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        Ok(Request {
            method: self.method.unwrap_or(Method::GET),
            target: self.target.ok_or("target missing")?,
            version: self.version.unwrap_or_else(|| "HTTP/1.1".to_string()),
            headers: self.headers,
        })
    }
}

impl Request {
    /// Retrieves a header value by name, ignoring case.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&key.to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    /// Retrieves the Content-Length header value.
    ///
    /// Returns 0 if the header is missing or not a valid number.
    pub fn content_length(&self) -> u64 {
        self.header("Content-Length")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0)
    }

    /// `Transfer-Encoding` takes precedence over `Content-Length`.
    pub fn body_framing(&self) -> BodyFraming {
        if self.header("Transfer-Encoding").is_some() {
            return BodyFraming::Unframed;
        }
        match self.content_length() {
            0 => BodyFraming::Empty,
            n => BodyFraming::Length(n),
        }
    }

    /// Determines whether the connection should remain open after the response.
    ///
    /// An explicit `Connection` header wins. Without one, HTTP/1.1 keeps the
    /// connection alive and older versions close it.
    pub fn keep_alive(&self) -> bool {
        match self.header("Connection") {
            Some(v) if has_token(v, "close") => false,
            Some(v) if has_token(v, "keep-alive") => true,
            _ => self.version == "HTTP/1.1",
        }
    }

    pub fn is_head(&self) -> bool {
        self.method == Method::HEAD
    }
}

fn has_token(header: &str, token: &str) -> bool {
    header
        .split(',')
        .any(|t| t.trim().eq_ignore_ascii_case(token))
}

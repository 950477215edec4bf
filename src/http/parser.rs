use crate::http::request::{Method, Request};
use std::collections::HashMap;

/// Upper bound on the request line plus headers.
pub const MAX_HEAD_SIZE: usize = 16 * 1024;

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    InvalidRequest,
    InvalidMethod,
    InvalidHeader,
    InvalidContentLength,
    HeadTooLarge,
    Incomplete,
}

/// Parses one request head from the front of `buf`.
///
/// On success returns the request and the number of bytes the head
/// occupied, blank line included. Any body is left in `buf` for the
/// connection to skip.
pub fn parse_http_request(buf: &[u8]) -> Result<(Request, usize), ParseError> {
    let headers_end = match find_headers_end(buf) {
        Some(end) if end > MAX_HEAD_SIZE => return Err(ParseError::HeadTooLarge),
        Some(end) => end,
        None if buf.len() > MAX_HEAD_SIZE => return Err(ParseError::HeadTooLarge),
        None => return Err(ParseError::Incomplete),
    };
    let header_bytes = &buf[..headers_end];

    let headers_str = std::str::from_utf8(header_bytes)
        .map_err(|_| ParseError::InvalidRequest)?;

    let mut lines = headers_str.split("\r\n");

    // Request line
    let request_line = lines.next().ok_or(ParseError::InvalidRequest)?;
    let mut parts = request_line.split(' ');

    let method_str = parts.next().ok_or(ParseError::InvalidRequest)?;
    let target = parts.next().ok_or(ParseError::InvalidRequest)?;
    let version = parts.next().ok_or(ParseError::InvalidRequest)?;
    if parts.next().is_some() || target.is_empty() || !version.starts_with("HTTP/") {
        return Err(ParseError::InvalidRequest);
    }

    let method = Method::from_str(method_str).ok_or(ParseError::InvalidMethod)?;

    // Headers
    let mut headers = HashMap::new();

    for line in lines {
        if line.is_empty() {
            continue;
        }

        let (key, value) = line
            .split_once(':')
            .ok_or(ParseError::InvalidHeader)?;

        let key = key.trim();
        if key.is_empty() || key.contains(char::is_whitespace) {
            return Err(ParseError::InvalidHeader);
        }

        headers.insert(key.to_ascii_lowercase(), value.trim().to_string());
    }

    // Body framing is acted on by the connection; only validate it here
    if let Some(v) = headers.get("content-length") {
        v.parse::<u64>()
            .map_err(|_| ParseError::InvalidContentLength)?;
    }

    let request = Request {
        method,
        target: target.to_string(),
        version: version.to_string(),
        headers,
    };

    Ok((request, headers_end + 4))
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4)
        .position(|w| w == b"\r\n\r\n")
}

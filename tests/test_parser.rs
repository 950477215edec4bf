use slingshot::http::parser::{ParseError, parse_http_request};
use slingshot::http::request::Method;

#[test]
fn test_parse_simple_get_request() {
    let req = b"GET / HTTP/1.1\r\nHost: localhost:3000\r\n\r\n";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::GET);
    assert_eq!(parsed.target, "/");
    assert_eq!(parsed.version, "HTTP/1.1");
    assert_eq!(parsed.header("Host"), Some("localhost:3000"));
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_post_leaves_body_unconsumed() {
    let head = b"POST /public/index.html HTTP/1.1\r\nContent-Length: 5\r\n\r\n";
    let mut req = head.to_vec();
    req.extend_from_slice(b"hello");
    let (parsed, consumed) = parse_http_request(&req).unwrap();

    assert_eq!(parsed.method, Method::POST);
    assert_eq!(parsed.target, "/public/index.html");
    assert_eq!(parsed.content_length(), 5);
    assert_eq!(consumed, head.len());
}

#[test]
fn test_parse_target_keeps_query_string() {
    let req = b"GET /js/game.js?v=3 HTTP/1.1\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.target, "/js/game.js?v=3");
}

#[test]
fn test_parse_target_is_not_decoded() {
    let req = b"GET /%2e%2e/secret HTTP/1.1\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.target, "/%2e%2e/secret");
}

#[test]
fn test_parse_pipelined_requests_consume_one_at_a_time() {
    let req = b"GET /a.png HTTP/1.1\r\n\r\nGET /b.png HTTP/1.1\r\n\r\n";
    let (first, consumed) = parse_http_request(req).unwrap();
    let (second, rest) = parse_http_request(&req[consumed..]).unwrap();

    assert_eq!(first.target, "/a.png");
    assert_eq!(second.target, "/b.png");
    assert_eq!(consumed + rest, req.len());
}

#[test]
fn test_parse_incomplete_request_missing_blank_line() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n";

    assert_eq!(parse_http_request(req).unwrap_err(), ParseError::Incomplete);
}

#[test]
fn test_parse_does_not_wait_for_declared_body() {
    let req = b"POST /api HTTP/1.1\r\nContent-Length: 100000000\r\n\r\nabc";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.content_length(), 100_000_000);
    assert_eq!(consumed, req.len() - 3);
}

#[test]
fn test_parse_unknown_method_token_is_accepted() {
    let req = b"BREW /pot HTTP/1.1\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::Other("BREW".to_string()));
}

#[test]
fn test_parse_invalid_method_characters() {
    let req = b"GE(T / HTTP/1.1\r\n\r\n";

    assert_eq!(parse_http_request(req).unwrap_err(), ParseError::InvalidMethod);
}

#[test]
fn test_parse_malformed_request_line() {
    assert_eq!(
        parse_http_request(b"GET /\r\n\r\n").unwrap_err(),
        ParseError::InvalidRequest
    );
    assert_eq!(
        parse_http_request(b"GET / FTP/1.0\r\n\r\n").unwrap_err(),
        ParseError::InvalidRequest
    );
    assert_eq!(
        parse_http_request(b"GET / HTTP/1.1 extra\r\n\r\n").unwrap_err(),
        ParseError::InvalidRequest
    );
}

#[test]
fn test_parse_malformed_header() {
    let req = b"GET / HTTP/1.1\r\nBrokenHeader\r\n\r\n";

    assert_eq!(parse_http_request(req).unwrap_err(), ParseError::InvalidHeader);
}

#[test]
fn test_parse_invalid_content_length() {
    let req = b"POST / HTTP/1.1\r\nContent-Length: lots\r\n\r\n";

    assert_eq!(
        parse_http_request(req).unwrap_err(),
        ParseError::InvalidContentLength
    );
}

#[test]
fn test_parse_various_http_methods() {
    let methods = vec![
        ("GET", Method::GET),
        ("POST", Method::POST),
        ("PUT", Method::PUT),
        ("DELETE", Method::DELETE),
        ("HEAD", Method::HEAD),
        ("OPTIONS", Method::OPTIONS),
        ("PATCH", Method::PATCH),
    ];

    for (method_str, expected_method) in methods {
        let req = format!("{} / HTTP/1.1\r\n\r\n", method_str);
        let (parsed, _) = parse_http_request(req.as_bytes()).unwrap();
        assert_eq!(parsed.method, expected_method);
    }
}

#[test]
fn test_parse_header_names_are_case_insensitive() {
    let req = b"GET / HTTP/1.1\r\ncontent-LENGTH: 2\r\nCONNECTION: close\r\n\r\nok";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.content_length(), 2);
    assert_eq!(parsed.header("Connection"), Some("close"));
    assert_eq!(consumed, req.len() - 2);
}

use breakwater::http::response::{Body, Response, ResponseBuilder};
use breakwater::http::status::StatusCode;

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Continue.as_u16(), 100);
    assert_eq!(StatusCode::SwitchingProtocols.as_u16(), 101);
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::PartialContent.as_u16(), 206);
    assert_eq!(StatusCode::UseProxy.as_u16(), 305);
    assert_eq!(StatusCode::TemporaryRedirect.as_u16(), 307);
    assert_eq!(StatusCode::BadRequest.as_u16(), 400);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::ExpectationFailed.as_u16(), 417);
    assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
    assert_eq!(StatusCode::NotImplemented.as_u16(), 501);
    assert_eq!(StatusCode::HttpVersionNotSupported.as_u16(), 505);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(
        StatusCode::NonAuthoritativeInformation.reason_phrase(),
        "Non-Authoritative Information"
    );
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    assert_eq!(StatusCode::RequestTimeout.reason_phrase(), "Request Time-out");
    assert_eq!(StatusCode::RequestUriTooLong.reason_phrase(), "Request-URI Too Long");
    assert_eq!(StatusCode::GatewayTimeout.reason_phrase(), "Gateway Time-out");
}

#[test]
fn test_status_code_display() {
    assert_eq!(StatusCode::Ok.to_string(), "200 OK");
    assert_eq!(StatusCode::NotFound.to_string(), "404 Not Found");
}

#[test]
fn test_response_builder_basic() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .body(b"Hello, World!".to_vec())
        .build();

    assert_eq!(response.status, StatusCode::Ok);
    match &response.body {
        Body::Bytes(data) => assert_eq!(data, b"Hello, World!"),
        Body::Stream(_) => panic!("expected an in-memory body"),
    }
}

#[test]
fn test_response_builder_with_headers() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/plain")
        .header("X-Custom", "value")
        .body(b"test".to_vec())
        .build();

    assert_eq!(response.headers.get("Content-Type").unwrap(), "text/plain");
    assert_eq!(response.headers.get("X-Custom").unwrap(), "value");
}

#[test]
fn test_response_builder_auto_content_length() {
    let body = b"This is the body".to_vec();
    let response = ResponseBuilder::new(StatusCode::Ok).body(body.clone()).build();

    let content_length = response.headers.get("Content-Length").unwrap();
    assert_eq!(content_length, body.len().to_string());
}

#[test]
fn test_response_builder_preserves_custom_content_length() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Length", "999")
        .body(b"test".to_vec())
        .build();

    assert_eq!(response.headers.get("Content-Length").unwrap(), "999");
}

#[test]
fn test_response_always_has_connection_disposition() {
    let response = ResponseBuilder::new(StatusCode::Ok).body(b"x".to_vec()).build();

    assert_eq!(response.headers.get("Connection").unwrap(), "close");
}

#[test]
fn test_response_builder_preserves_custom_connection_header() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Connection", "upgrade")
        .build();

    assert_eq!(response.headers.get("Connection").unwrap(), "upgrade");
}

#[test]
fn test_stream_body_has_no_content_length() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .stream(std::io::Cursor::new(b"streamed".to_vec()))
        .build();

    assert!(response.body.content_length().is_none());
    assert!(!response.headers.contains("Content-Length"));
    assert_eq!(response.headers.get("Connection").unwrap(), "close");
}

#[test]
fn test_response_builder_empty_body() {
    let response = ResponseBuilder::new(StatusCode::NoContent).build();

    assert_eq!(response.body.content_length(), Some(0));
    assert_eq!(response.headers.get("Content-Length").unwrap(), "0");
}

#[test]
fn test_response_ok_helper() {
    let response = Response::ok(b"test content".to_vec());

    assert_eq!(response.status, StatusCode::Ok);
    match &response.body {
        Body::Bytes(data) => assert_eq!(data, b"test content"),
        Body::Stream(_) => panic!("expected an in-memory body"),
    }
}

#[test]
fn test_response_from_status() {
    let response = Response::from_status(StatusCode::ServiceUnavailable);

    assert_eq!(response.status, StatusCode::ServiceUnavailable);
    match &response.body {
        Body::Bytes(data) => assert_eq!(data, b"503 Service Unavailable"),
        Body::Stream(_) => panic!("expected an in-memory body"),
    }
}

#[test]
fn test_response_not_found_helper() {
    let response = Response::not_found();

    assert_eq!(response.status, StatusCode::NotFound);
    match &response.body {
        Body::Bytes(data) => assert_eq!(data, b"404 Not Found"),
        Body::Stream(_) => panic!("expected an in-memory body"),
    }
}

#[test]
fn test_response_internal_error_helper() {
    let response = Response::internal_error();

    assert_eq!(response.status, StatusCode::InternalServerError);
    match &response.body {
        Body::Bytes(data) => assert_eq!(data, b"500 Internal Server Error"),
        Body::Stream(_) => panic!("expected an in-memory body"),
    }
}

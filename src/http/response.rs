use crate::http::headers::Headers;
use crate::http::status::StatusCode;
use std::fmt;
use tokio::io::AsyncRead;

/// A response body: either bytes held in memory or a lazily-read stream.
///
/// A stream body is pulled chunk by chunk while the response is written,
/// so it is never buffered whole. Either way the body is consumed at most
/// once, by the connection that serializes it.
pub enum Body {
    Bytes(Vec<u8>),
    Stream(Box<dyn AsyncRead + Send + Unpin>),
}

impl Body {
    /// The body length, known only for in-memory bodies. Stream bodies are
    /// delimited by connection close instead of `Content-Length`.
    pub fn content_length(&self) -> Option<usize> {
        match self {
            Body::Bytes(data) => Some(data.len()),
            Body::Stream(_) => None,
        }
    }
}

impl Default for Body {
    fn default() -> Self {
        Body::Bytes(Vec::new())
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Bytes(data) => f.debug_tuple("Bytes").field(&data.len()).finish(),
            Body::Stream(_) => f.debug_tuple("Stream").finish(),
        }
    }
}

/// A complete HTTP response ready to be sent to a client.
#[derive(Debug)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// Response headers; always carries a `Connection: close` disposition
    pub headers: Headers,
    /// Response body
    pub body: Body,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "application/json")
///     .body(b"{}".to_vec())
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Headers,
    body: Body,
}

impl ResponseBuilder {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Headers::new(),
            body: Body::default(),
        }
    }

    /// Adds or replaces a header.
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Sets an in-memory response body.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Body::Bytes(body.into());
        self
    }

    /// Sets a stream-backed response body, read chunk by chunk while the
    /// response is written out.
    pub fn stream(mut self, reader: impl AsyncRead + Send + Unpin + 'static) -> Self {
        self.body = Body::Stream(Box::new(reader));
        self
    }

    /// Builds the final Response.
    ///
    /// Adds `Content-Length` for in-memory bodies if not already present,
    /// and ensures the `Connection: close` disposition header.
    pub fn build(mut self) -> Response {
        if let Some(len) = self.body.content_length() {
            if !self.headers.contains("Content-Length") {
                self.headers.insert("Content-Length", len.to_string());
            }
        }
        if !self.headers.contains("Connection") {
            self.headers.insert("Connection", "close");
        }
        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// Creates a simple 200 OK response with the given body.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        ResponseBuilder::new(StatusCode::Ok).body(body.into()).build()
    }

    /// Creates a response for a bare status code, with the status text as
    /// its body.
    pub fn from_status(status: StatusCode) -> Self {
        ResponseBuilder::new(status)
            .body(status.to_string().into_bytes())
            .build()
    }

    /// Creates a 404 Not Found response.
    pub fn not_found() -> Self {
        Self::from_status(StatusCode::NotFound)
    }

    /// Creates a 500 Internal Server Error response.
    pub fn internal_error() -> Self {
        Self::from_status(StatusCode::InternalServerError)
    }
}

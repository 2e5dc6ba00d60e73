use crate::http::status::StatusCode;

/// HTTP version used for a response when the request's own version was
/// never successfully read.
pub const DEFAULT_HTTP_VERSION: &str = "HTTP/1.1";

/// A failure carrying the HTTP status code that should be sent instead of
/// a normal response.
///
/// Parse failures, routing misses, and handler errors all flow through
/// this type so the connection can always finish with a status-coded
/// response. For failures raised while the request line was still being
/// parsed, `http_version` falls back to [`DEFAULT_HTTP_VERSION`].
#[derive(Debug, thiserror::Error)]
#[error("{status}")]
pub struct StatusError {
    status: StatusCode,
    http_version: Option<String>,
    cause: Option<anyhow::Error>,
}

impl StatusError {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            http_version: None,
            cause: None,
        }
    }

    /// 400 Bad Request, remembering the HTTP version parsed so far (if any)
    /// so the response status line can echo it.
    pub fn bad_request(http_version: Option<&str>) -> Self {
        Self {
            status: StatusCode::BadRequest,
            http_version: http_version.map(str::to_string),
            cause: None,
        }
    }

    pub fn not_implemented() -> Self {
        Self::new(StatusCode::NotImplemented)
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NotFound)
    }

    /// 500 Internal Server Error wrapping the underlying cause. The cause
    /// is for logging only and never reaches the wire.
    pub fn internal(cause: anyhow::Error) -> Self {
        Self {
            status: StatusCode::InternalServerError,
            http_version: None,
            cause: Some(cause),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The best-known HTTP version for the response status line.
    pub fn http_version(&self) -> &str {
        self.http_version.as_deref().unwrap_or(DEFAULT_HTTP_VERSION)
    }

    pub fn cause(&self) -> Option<&anyhow::Error> {
        self.cause.as_ref()
    }
}

use crate::errors::StatusError;
use crate::http::headers::Headers;
use crate::http::request::{Method, Request};
use url::Url;

/// Parser states, in the order a well-formed request moves through them.
/// `Error` discards input through the next line boundary so the connection
/// can still answer with a status-coded response instead of hanging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Method,
    Uri,
    Version,
    HeaderLine,
    HeaderName,
    HeaderValue,
    Done,
    Error,
}

/// An incremental HTTP request parser.
///
/// Fed one chunk at a time via [`feed`](RequestParser::feed); all state
/// (partial token, partial header, carriage-return lookahead) survives
/// between calls, so chunk boundaries are never observable in the outcome.
/// Once `feed` returns `true`, [`finish`](RequestParser::finish) yields
/// the request or the status-coded failure recorded along the way.
///
/// A parser is built fresh for every connection and never reused.
pub struct RequestParser {
    state: State,
    token: String,
    cr: bool,
    folding: bool,
    header_name: String,
    last_header: Option<String>,
    headers: Headers,
    method: Option<Method>,
    target: String,
    http_version: Option<String>,
    error: Option<StatusError>,
}

impl RequestParser {
    pub fn new() -> Self {
        Self {
            state: State::Start,
            token: String::new(),
            cr: false,
            folding: false,
            header_name: String::new(),
            last_header: None,
            headers: Headers::new(),
            method: None,
            target: String::new(),
            http_version: None,
            error: None,
        }
    }

    /// Parses the next chunk of data. Returns `true` once the request head
    /// is complete (or has failed terminally); any bytes after that point
    /// are absorbed and discarded.
    pub fn feed(&mut self, chunk: &[u8]) -> bool {
        for &byte in chunk {
            if self.state == State::Done {
                break;
            }
            let ch = match self.normalize(byte) {
                Ok(Some(ch)) => ch,
                Ok(None) => continue, // CR held back, waiting for its LF
                Err(err) => {
                    self.fail(err, byte as char);
                    continue;
                }
            };
            if let Err(err) = self.step(ch) {
                self.fail(err, ch);
            }
        }
        self.state == State::Done
    }

    /// Consumes the parser, yielding the finished request or the failure
    /// recorded while parsing.
    pub fn finish(self) -> Result<Request, StatusError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let version = self.http_version.as_deref();
        let method = self
            .method
            .ok_or_else(|| StatusError::bad_request(version))?;
        let uri = resolve_target(&self.target, self.headers.get("Host"), version)?;
        let http_version = self
            .http_version
            .clone()
            .ok_or_else(|| StatusError::bad_request(None))?;
        Ok(Request::new(method, uri, http_version, self.headers))
    }

    /// Converts CRLF and bare LF to a single `'\n'`. A CR at the end of a
    /// chunk is remembered until the next byte arrives; a CR followed by
    /// anything else is malformed.
    fn normalize(&mut self, byte: u8) -> Result<Option<char>, StatusError> {
        let ch = byte as char;
        if self.cr {
            self.cr = false;
            if ch == '\n' {
                return Ok(Some('\n'));
            }
            return Err(self.bad_request());
        }
        if ch == '\r' {
            self.cr = true;
            return Ok(None);
        }
        Ok(Some(ch))
    }

    fn step(&mut self, ch: char) -> Result<(), StatusError> {
        match self.state {
            State::Start => {
                // Ignore blank lines before the request line.
                if ch != '\n' {
                    self.token.push(ch);
                    self.state = State::Method;
                }
            }
            State::Method => {
                if ch == ' ' {
                    let method = Method::from_token(&self.token)
                        .ok_or_else(StatusError::not_implemented)?;
                    self.method = Some(method);
                    self.token.clear();
                    self.state = State::Uri;
                } else if ch == '\n' {
                    return Err(self.bad_request());
                } else {
                    self.token.push(ch);
                }
            }
            State::Uri => {
                if ch == ' ' {
                    self.target = std::mem::take(&mut self.token);
                    self.state = State::Version;
                } else if ch == '\n' {
                    return Err(self.bad_request());
                } else {
                    self.token.push(ch);
                }
            }
            State::Version => {
                if ch == '\n' {
                    self.http_version = Some(std::mem::take(&mut self.token));
                    self.state = State::HeaderLine;
                } else {
                    self.token.push(ch);
                }
            }
            State::HeaderLine => {
                if ch == '\n' {
                    self.state = State::Done;
                } else if ch == ' ' || ch == '\t' {
                    // Continuation line: folds into the previous header.
                    if self.last_header.is_none() {
                        return Err(self.bad_request());
                    }
                    self.folding = true;
                    self.state = State::HeaderValue;
                } else {
                    self.token.push(ch);
                    self.state = State::HeaderName;
                }
            }
            State::HeaderName => {
                if ch == ':' {
                    self.header_name = std::mem::take(&mut self.token);
                    self.folding = false;
                    self.state = State::HeaderValue;
                } else if ch == '\n' || ch == ' ' || ch == '\t' {
                    return Err(self.bad_request());
                } else {
                    self.token.push(ch);
                }
            }
            State::HeaderValue => {
                if ch == '\n' {
                    let value = std::mem::take(&mut self.token);
                    if self.folding {
                        if let Some(name) = self.last_header.clone() {
                            self.headers.fold(&name, &value);
                        }
                    } else {
                        self.headers.insert(&self.header_name, value);
                        self.last_header = Some(std::mem::take(&mut self.header_name));
                    }
                    self.state = State::HeaderLine;
                } else if self.token.is_empty() && (ch == ' ' || ch == '\t') {
                    // Strip whitespace between the colon and the value.
                } else {
                    self.token.push(ch);
                }
            }
            State::Done => {}
            State::Error => {
                if ch == '\n' {
                    self.state = State::Done;
                }
            }
        }
        Ok(())
    }

    /// Records the first failure and starts discarding input. If the
    /// offending character already ends a line, parsing completes at once.
    fn fail(&mut self, error: StatusError, ch: char) {
        if self.error.is_none() {
            self.error = Some(error);
        }
        self.state = if ch == '\n' { State::Done } else { State::Error };
    }

    fn bad_request(&self) -> StatusError {
        StatusError::bad_request(self.http_version.as_deref())
    }
}

impl Default for RequestParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves the raw request-target into an absolute uri: against
/// `http://<Host>` when a `Host` header is present, otherwise the target
/// itself must already be absolute.
fn resolve_target(
    target: &str,
    host: Option<&str>,
    http_version: Option<&str>,
) -> Result<Url, StatusError> {
    let resolved = match host {
        Some(host) => Url::parse(&format!("http://{host}")).and_then(|base| base.join(target)),
        None => Url::parse(target),
    };
    resolved.map_err(|_| StatusError::bad_request(http_version))
}

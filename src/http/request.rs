use crate::http::headers::Headers;
use std::collections::HashMap;
use url::Url;

/// HTTP request methods.
///
/// The fixed set of methods the server recognizes. A request line with any
/// other token is answered with 501 Not Implemented rather than treated as
/// a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// POST - Create or submit data
    POST,
    /// PUT - Replace a resource
    PUT,
    /// PATCH - Partial modification of a resource
    PATCH,
    /// DELETE - Delete a resource
    DELETE,
    /// TRACE - Echo the request back to the client
    TRACE,
}

impl Method {
    /// Parses an HTTP method from a request-line token (case-sensitive,
    /// uppercase per the wire format).
    ///
    /// # Example
    ///
    /// ```
    /// # use breakwater::http::request::Method;
    /// assert_eq!(Method::from_token("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_token("get"), None);
    /// ```
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "HEAD" => Some(Method::HEAD),
            "POST" => Some(Method::POST),
            "PUT" => Some(Method::PUT),
            "PATCH" => Some(Method::PATCH),
            "DELETE" => Some(Method::DELETE),
            "TRACE" => Some(Method::TRACE),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::PATCH => "PATCH",
            Method::DELETE => "DELETE",
            Method::TRACE => "TRACE",
        }
    }
}

/// A fully parsed HTTP request.
///
/// Immutable once built: the parser produces it, routing populates the
/// path parameters exactly once, handlers only read it. The uri is
/// absolute: the raw request-target resolved against the `Host` header.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    uri: Url,
    http_version: String,
    headers: Headers,
    path_params: HashMap<String, String>,
}

impl Request {
    pub fn new(
        method: Method,
        uri: Url,
        http_version: impl Into<String>,
        headers: Headers,
    ) -> Self {
        Self {
            method,
            uri,
            http_version: http_version.into(),
            headers,
            path_params: HashMap::new(),
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    /// The request path, used for routing.
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    pub fn http_version(&self) -> &str {
        &self.http_version
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Retrieves a header value by name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Parameters captured from the matched path pattern. Empty until
    /// routing has matched this request.
    pub fn path_params(&self) -> &HashMap<String, String> {
        &self.path_params
    }

    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.path_params.get(name).map(String::as_str)
    }

    pub(crate) fn set_path_params(&mut self, params: HashMap<String, String>) {
        self.path_params = params;
    }

    /// Decodes the query string into name/value pairs.
    ///
    /// Parameters without `=` or with an empty name are skipped; names and
    /// values are percent-decoded.
    pub fn query_params(&self) -> HashMap<String, String> {
        let mut params = HashMap::new();
        let Some(query) = self.uri.query() else {
            return params;
        };
        for pair in query.split('&') {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            if name.is_empty() {
                continue;
            }
            params.insert(decode_component(name), decode_component(value));
        }
        params
    }
}

fn decode_component(component: &str) -> String {
    url::form_urlencoded::parse(component.as_bytes())
        .map(|(k, v)| format!("{k}{v}"))
        .collect()
}

/// Builder for constructing Request objects, mainly for tests and tooling.
pub struct RequestBuilder {
    method: Option<Method>,
    uri: Option<Url>,
    http_version: String,
    headers: Headers,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            uri: None,
            http_version: "HTTP/1.1".to_string(),
            headers: Headers::new(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn uri(mut self, uri: &str) -> Self {
        self.uri = Url::parse(uri).ok();
        self
    }

    pub fn http_version(mut self, version: impl Into<String>) -> Self {
        self.http_version = version.into();
        self
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        Ok(Request {
            method: self.method.ok_or("method missing")?,
            uri: self.uri.ok_or("uri missing or invalid")?,
            http_version: self.http_version,
            headers: self.headers,
            path_params: HashMap::new(),
        })
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

use std::sync::Arc;

use http::Method;
use serde::Serialize;
use serde_json::Value;
use smallvec::SmallVec;
use url::Url;

/// Maximum inline headers before heap allocation
///
/// Most requests carry ≤16 headers.
pub const MAX_INLINE_HEADERS: usize = 16;

/// Stack-allocated header storage
///
/// Header names use `Arc<str>` instead of `String`: names repeat across
/// requests (Origin, Content-Type, ...) and `Arc::clone()` is O(1) versus an
/// O(n) string copy. Values remain `String` as they are per-request data.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// An already-parsed HTTP request as seen by the policy engine
///
/// Built by the surrounding server from its own request type. The engine
/// reads the method, the request URI (for the same-origin check) and the
/// `Origin` / `Access-Control-Request-*` headers; everything else passes
/// through untouched.
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP method (GET, POST, etc.)
    pub method: Method,
    /// Absolute request URI (scheme, host and port are significant)
    pub uri: Url,
    /// HTTP headers (stack-allocated for ≤16 headers)
    pub headers: HeaderVec,
    /// Request body parsed as JSON (if present)
    pub body: Option<Value>,
}

impl Request {
    /// Create a request with no headers and no body
    #[must_use]
    pub fn new(method: Method, uri: Url) -> Self {
        Self {
            method,
            uri,
            headers: HeaderVec::new(),
            body: None,
        }
    }

    /// Get a header by name (case-insensitive per RFC 7230)
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Add or replace a header
    pub fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value));
    }

    /// The request's own origin, serialized as `scheme://host[:port]`
    ///
    /// Default ports are omitted, matching how browsers serialize the
    /// `Origin` header.
    #[must_use]
    pub fn own_origin(&self) -> String {
        self.uri.origin().ascii_serialization()
    }
}

/// An HTTP response under construction
///
/// Carries the status code, headers and JSON body the surrounding server
/// will serialize onto the wire. The engine decorates responses through
/// [`Response::set_header`] and never touches the body of a downstream
/// response.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    /// HTTP status code (200, 401, etc.)
    pub status: u16,
    /// HTTP response headers (stack-allocated for ≤16 headers)
    #[serde(skip_serializing)]
    pub headers: HeaderVec,
    /// Response body as JSON
    pub body: Value,
}

impl Response {
    /// Create a new response with the given status, headers, and body
    #[must_use]
    pub fn new(status: u16, headers: HeaderVec, body: Value) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Create a JSON response with a content-type header
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        let mut headers = HeaderVec::new();
        headers.push((Arc::from("content-type"), "application/json".to_string()));
        Self {
            status,
            headers,
            body,
        }
    }

    /// Get a header by name (case-insensitive)
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Add or update a header
    pub fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value));
    }
}

/// Empty 200 response, the template shape used for preflight answers
impl Default for Response {
    fn default() -> Self {
        Self::new(200, HeaderVec::new(), Value::Null)
    }
}

use std::sync::Arc;

use http::Method;
use url::Url;

use super::{AllowedOrigins, CorsPolicy, ErrorHandler, MethodProvider, PolicyConfigError};
use crate::analyzer::CorsViolation;
use crate::message::{Request, Response};

/// Builder for [`CorsPolicy`] with a fluent API
///
/// Named setters replace the loosely-typed option map some middleware stacks
/// use; everything is validated once, in [`CorsPolicyBuilder::build`].
///
/// # Example
///
/// ```
/// use corsgate::CorsPolicy;
/// use http::Method;
///
/// let policy = CorsPolicy::builder()
///     .origins(&["https://example.com", "https://api.example.com"])
///     .methods(&[Method::GET, Method::POST, Method::PUT])
///     .allow_headers(&["Content-Type", "Authorization"])
///     .expose_headers(&["Etag"])
///     .credentials(true)
///     .max_age(3600)
///     .build()
///     .expect("valid CORS policy");
/// ```
pub struct CorsPolicyBuilder {
    origins: AllowedOrigins,
    methods: MethodProvider,
    allow_headers: Vec<String>,
    expose_headers: Vec<String>,
    credentials: bool,
    max_age: u32,
    error_handler: Option<ErrorHandler>,
}

impl CorsPolicyBuilder {
    /// Create a builder seeded with the defaults
    ///
    /// Any origin, GET/POST/PUT/PATCH/DELETE, empty header lists, no
    /// credentials, no preflight caching, no error handler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origins: AllowedOrigins::Any,
            methods: MethodProvider::default(),
            allow_headers: vec![],
            expose_headers: vec![],
            credentials: false,
            max_age: 0,
            error_handler: None,
        }
    }

    /// Admit any origin (the wildcard sentinel)
    #[must_use]
    pub fn any_origin(mut self) -> Self {
        self.origins = AllowedOrigins::Any;
        self
    }

    /// Set the origin whitelist
    ///
    /// Origins are matched by case-sensitive exact comparison; scheme, host
    /// and port are all significant. A `"*"` entry anywhere in the list
    /// enables the wildcard.
    #[must_use]
    pub fn origins(mut self, origins: &[&str]) -> Self {
        if origins.iter().any(|o| *o == "*") {
            self.origins = AllowedOrigins::Any;
        } else {
            self.origins = AllowedOrigins::Exact(origins.iter().map(|s| s.to_string()).collect());
        }
        self
    }

    /// Set a fixed allowed-method list
    #[must_use]
    pub fn methods(mut self, methods: &[Method]) -> Self {
        self.methods = MethodProvider::Static(methods.to_vec());
        self
    }

    /// Set a per-request method resolver
    ///
    /// The resolver is invoked once per classified request and must be
    /// side-effect free; it may run concurrently across in-flight requests.
    #[must_use]
    pub fn methods_fn<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&Request) -> Vec<Method> + Send + Sync + 'static,
    {
        self.methods = MethodProvider::Dynamic(Arc::new(resolver));
        self
    }

    /// Set the headers clients may send on cross-origin requests
    ///
    /// Compared case-insensitively against preflight
    /// `Access-Control-Request-Headers`; emitted in the case given here.
    #[must_use]
    pub fn allow_headers(mut self, headers: &[&str]) -> Self {
        self.allow_headers = headers.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Set the response headers exposed to client-side JavaScript
    #[must_use]
    pub fn expose_headers(mut self, headers: &[&str]) -> Self {
        self.expose_headers = headers.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Enable or disable credentialed requests
    ///
    /// When enabled, `Access-Control-Allow-Credentials: true` is emitted and
    /// the literal request origin is echoed even under the wildcard, since
    /// browsers reject `*` combined with credentials.
    #[must_use]
    pub fn credentials(mut self, allow: bool) -> Self {
        self.credentials = allow;
        self
    }

    /// Set the preflight cache lifetime in seconds
    ///
    /// Zero (the default) omits the `Access-Control-Max-Age` directive.
    #[must_use]
    pub fn max_age(mut self, seconds: u32) -> Self {
        self.max_age = seconds;
        self
    }

    /// Install a violation handler
    ///
    /// Invoked with the violation kind on every rejection. A returned
    /// response replaces the default one, with its status forced to 401;
    /// `None` keeps the default.
    #[must_use]
    pub fn error_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(CorsViolation) -> Option<Response> + Send + Sync + 'static,
    {
        self.error_handler = Some(Arc::new(handler));
        self
    }

    /// Build the policy
    ///
    /// # Errors
    ///
    /// - [`PolicyConfigError::InvalidOrigin`] when a non-wildcard origin is
    ///   not a canonical `scheme://host[:port]` serialization
    /// - [`PolicyConfigError::InvalidHeaderName`] when an allow/expose entry
    ///   is empty or contains whitespace
    pub fn build(self) -> Result<CorsPolicy, PolicyConfigError> {
        if let AllowedOrigins::Exact(origins) = &self.origins {
            for origin in origins {
                let canonical = Url::parse(origin)
                    .ok()
                    .map(|url| url.origin().ascii_serialization());
                if canonical.as_deref() != Some(origin.as_str()) {
                    return Err(PolicyConfigError::InvalidOrigin {
                        origin: origin.clone(),
                    });
                }
            }
        }
        for name in self.allow_headers.iter().chain(self.expose_headers.iter()) {
            if name.is_empty() || name.contains(char::is_whitespace) {
                return Err(PolicyConfigError::InvalidHeaderName { name: name.clone() });
            }
        }

        Ok(CorsPolicy {
            origins: self.origins,
            methods: self.methods,
            allow_headers: self.allow_headers,
            expose_headers: self.expose_headers,
            credentials: self.credentials,
            max_age: self.max_age,
            error_handler: self.error_handler,
        })
    }
}

impl Default for CorsPolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

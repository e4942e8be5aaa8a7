//! # Policy Module
//!
//! Validated CORS policy configuration.
//!
//! A [`CorsPolicy`] holds everything the analyzer needs to judge a request:
//! the admitted origins, the allowed methods (a fixed set or a per-request
//! resolver), the allowed and exposed header lists, the credentials flag and
//! the preflight cache lifetime. Policies are built through
//! [`CorsPolicyBuilder`], which validates the configuration at construction
//! time and returns a [`PolicyConfigError`] for anything malformed.
//!
//! A policy is immutable once built and safe to share across threads; the
//! engine treats it as read-only for the lifetime of the process.

mod builder;
mod error;
mod methods;

pub use builder::CorsPolicyBuilder;
pub use error::PolicyConfigError;
pub use methods::MethodProvider;

use std::fmt;
use std::sync::Arc;

use crate::analyzer::CorsViolation;
use crate::message::Response;

/// Origin admission rule
///
/// Either the wildcard sentinel, or exact string matching in which scheme,
/// host and port are all significant. There is no suffix or prefix matching.
#[derive(Clone)]
pub enum AllowedOrigins {
    /// Wildcard: any origin is admitted
    Any,
    /// Exact string matching against a whitelist
    Exact(Vec<String>),
}

impl fmt::Debug for AllowedOrigins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllowedOrigins::Any => write!(f, "Any"),
            AllowedOrigins::Exact(origins) => f.debug_tuple("Exact").field(origins).finish(),
        }
    }
}

impl AllowedOrigins {
    /// Check if an origin is admitted (case-sensitive exact match)
    pub(crate) fn matches(&self, origin: &str) -> bool {
        match self {
            AllowedOrigins::Any => true,
            AllowedOrigins::Exact(origins) => origins.iter().any(|o| o == origin),
        }
    }

    /// Check if the wildcard sentinel is configured
    pub(crate) fn is_wildcard(&self) -> bool {
        matches!(self, AllowedOrigins::Any)
    }
}

/// Handler invoked on CORS violations
///
/// May substitute its own response body; the engine forces the status to 401
/// regardless. Returning `None` falls back to the default response.
pub type ErrorHandler = Arc<dyn Fn(CorsViolation) -> Option<Response> + Send + Sync>;

/// A validated CORS policy
///
/// Immutable once built. Construct through [`CorsPolicy::builder`]; the
/// default policy is permissive (any origin, the common CRUD verbs, no
/// extra headers, no credentials, no preflight caching).
#[derive(Clone)]
pub struct CorsPolicy {
    pub(crate) origins: AllowedOrigins,
    pub(crate) methods: MethodProvider,
    pub(crate) allow_headers: Vec<String>,
    pub(crate) expose_headers: Vec<String>,
    pub(crate) credentials: bool,
    pub(crate) max_age: u32,
    pub(crate) error_handler: Option<ErrorHandler>,
}

impl fmt::Debug for CorsPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CorsPolicy")
            .field("origins", &self.origins)
            .field("methods", &self.methods)
            .field("allow_headers", &self.allow_headers)
            .field("expose_headers", &self.expose_headers)
            .field("credentials", &self.credentials)
            .field("max_age", &self.max_age)
            .field(
                "error_handler",
                &self.error_handler.as_ref().map(|_| "<function>"),
            )
            .finish()
    }
}

impl CorsPolicy {
    /// Start building a policy from the defaults
    #[must_use]
    pub fn builder() -> CorsPolicyBuilder {
        CorsPolicyBuilder::new()
    }
}

impl Default for CorsPolicy {
    /// Permissive defaults: any origin, GET/POST/PUT/PATCH/DELETE, no
    /// allowed or exposed headers, no credentials, no preflight caching
    fn default() -> Self {
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
}

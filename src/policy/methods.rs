use std::fmt;
use std::sync::Arc;

use http::Method;

use crate::message::Request;

/// Allowed-method resolution strategy
///
/// Most policies use a fixed verb list. `Dynamic` defers to a caller-supplied
/// resolver so the allowed set can depend on the request itself (per-path
/// verb lists, feature flags, ...). The resolver is consulted exactly once
/// per classification.
///
/// A dynamic resolver must be side-effect free: it may be invoked
/// concurrently, once per in-flight request.
#[derive(Clone)]
pub enum MethodProvider {
    /// Fixed set of verbs
    Static(Vec<Method>),
    /// Per-request resolver
    Dynamic(Arc<dyn Fn(&Request) -> Vec<Method> + Send + Sync>),
}

impl fmt::Debug for MethodProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodProvider::Static(methods) => f.debug_tuple("Static").field(methods).finish(),
            MethodProvider::Dynamic(_) => write!(f, "Dynamic(<function>)"),
        }
    }
}

impl MethodProvider {
    /// Resolve the allowed verb set for this request
    #[must_use]
    pub fn resolve(&self, req: &Request) -> Vec<Method> {
        match self {
            MethodProvider::Static(methods) => methods.clone(),
            MethodProvider::Dynamic(resolver) => resolver(req),
        }
    }
}

impl Default for MethodProvider {
    /// The common CRUD verbs: GET, POST, PUT, PATCH, DELETE
    fn default() -> Self {
        MethodProvider::Static(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
    }
}

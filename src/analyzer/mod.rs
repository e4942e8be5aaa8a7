//! # Analyzer Module
//!
//! Request classification against a [`CorsPolicy`], mirroring the Fetch-spec
//! CORS processing model.
//!
//! [`analyze`] inspects a single request and produces a [`CorsDecision`]:
//!
//! 1. No `Origin` header, or an origin equal to the request's own
//!    scheme+host+port → [`CorsDecision::OutOfScope`]. Non-CORS requests
//!    pass through untouched.
//! 2. Origin not admitted by the policy → rejection with
//!    [`CorsViolation::OriginNotAllowed`].
//! 3. `OPTIONS` carrying `Access-Control-Request-Method` → preflight: the
//!    requested method and headers are checked against the policy, and a
//!    valid probe yields the full preflight header set.
//! 4. Anything else is an actual cross-origin request: the actual method is
//!    checked against the same resolved set, and a valid request yields the
//!    headers to merge into the downstream response.
//!
//! Comparison rules: header names are case-insensitive, origin matching is
//! case-sensitive exact, and method matching is case-sensitive against the
//! literal configured verbs — client-supplied method casing is not
//! normalized.
//!
//! Classification is a pure function: the same request and policy always
//! yield the same decision, and nothing is shared between invocations.

mod headers;

use std::fmt;

use http::Method;
use tracing::{debug, warn};

use crate::message::{HeaderVec, Request};
use crate::policy::CorsPolicy;

/// A CORS violation detected during classification
///
/// All three kinds map to the same rejection status; the kind is preserved
/// for the error handler and for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorsViolation {
    /// Origin header present but not in the allowed set
    OriginNotAllowed,
    /// Requested or actual method not in the allowed set
    MethodNotSupported,
    /// At least one requested preflight header not in the allowed set
    HeadersNotSupported,
}

impl fmt::Display for CorsViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorsViolation::OriginNotAllowed => write!(f, "origin not allowed"),
            CorsViolation::MethodNotSupported => write!(f, "method not supported"),
            CorsViolation::HeadersNotSupported => write!(f, "headers not supported"),
        }
    }
}

/// Outcome of classifying a single request
///
/// Constructed fresh per request and consumed immediately by the engine;
/// nothing is persisted between calls.
#[derive(Debug, Clone, PartialEq)]
pub enum CorsDecision {
    /// Not a CORS request: no `Origin` header, or same-origin
    OutOfScope,
    /// CORS violation; reject without invoking the downstream handler
    Reject(CorsViolation),
    /// Valid preflight; answer immediately with these headers
    Preflight(HeaderVec),
    /// Valid cross-origin request; forward it, then merge these headers
    /// into the downstream response
    Actual(HeaderVec),
}

/// Classify a request against a policy
///
/// Pure and idempotent: no state survives the call, and a dynamic method
/// resolver is consulted exactly once.
#[must_use]
pub fn analyze(req: &Request, policy: &CorsPolicy) -> CorsDecision {
    let origin = match req.get_header("origin") {
        Some(origin) => origin,
        None => return CorsDecision::OutOfScope,
    };
    if origin == req.own_origin() {
        debug!(origin, "same-origin request, out of CORS scope");
        return CorsDecision::OutOfScope;
    }

    if !policy.origins.matches(origin) {
        warn!(origin, "origin not in allowed set");
        return CorsDecision::Reject(CorsViolation::OriginNotAllowed);
    }

    // Resolved once per request; both the preflight and the actual branch
    // judge against this same set.
    let methods = policy.methods.resolve(req);

    if req.method == Method::OPTIONS {
        if let Some(requested) = req.get_header("access-control-request-method") {
            return preflight(req, policy, origin, &methods, requested);
        }
    }

    // Actual cross-origin request: non-OPTIONS, or OPTIONS without the
    // preflight marker header. The actual method must still be allowed.
    if !methods.contains(&req.method) {
        warn!(method = %req.method, "method not in allowed set");
        return CorsDecision::Reject(CorsViolation::MethodNotSupported);
    }

    CorsDecision::Actual(headers::actual_headers(policy, origin))
}

/// Judge a preflight probe: requested method, then requested headers
fn preflight(
    req: &Request,
    policy: &CorsPolicy,
    origin: &str,
    methods: &[Method],
    requested: &str,
) -> CorsDecision {
    if !methods.iter().any(|m| m.as_str() == requested) {
        warn!(requested, "preflight method not in allowed set");
        return CorsDecision::Reject(CorsViolation::MethodNotSupported);
    }

    if let Some(requested_headers) = req.get_header("access-control-request-headers") {
        for header in requested_headers
            .split(',')
            .map(str::trim)
            .filter(|h| !h.is_empty())
        {
            if !policy
                .allow_headers
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(header))
            {
                warn!(header, "preflight header not in allowed set");
                return CorsDecision::Reject(CorsViolation::HeadersNotSupported);
            }
        }
    }

    CorsDecision::Preflight(headers::preflight_headers(policy, origin, methods))
}

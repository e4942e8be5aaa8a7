use std::sync::Arc;

use http::Method;

use crate::message::HeaderVec;
use crate::policy::CorsPolicy;

/// Response headers for a valid preflight answer
pub(crate) fn preflight_headers(
    policy: &CorsPolicy,
    origin: &str,
    methods: &[Method],
) -> HeaderVec {
    let mut headers = common_headers(policy, origin);

    headers.push((
        Arc::from("access-control-allow-methods"),
        methods
            .iter()
            .map(Method::as_str)
            .collect::<Vec<_>>()
            .join(","),
    ));

    if !policy.allow_headers.is_empty() {
        headers.push((
            Arc::from("access-control-allow-headers"),
            policy.allow_headers.join(","),
        ));
    }

    if policy.max_age > 0 {
        // Stringified: some response implementations reject integer header values.
        headers.push((
            Arc::from("access-control-max-age"),
            policy.max_age.to_string(),
        ));
    }

    headers
}

/// Response headers merged into a downstream response for an actual request
pub(crate) fn actual_headers(policy: &CorsPolicy, origin: &str) -> HeaderVec {
    let mut headers = common_headers(policy, origin);

    if !policy.expose_headers.is_empty() {
        headers.push((
            Arc::from("access-control-expose-headers"),
            policy.expose_headers.join(","),
        ));
    }

    headers
}

/// Allow-origin, Vary and credentials headers shared by both request types
///
/// The literal request origin is echoed whenever the match was exact or
/// credentials are enabled; browsers reject `*` combined with credentials.
/// Every echoed origin is accompanied by `Vary: Origin` so caches key on
/// the Origin header.
fn common_headers(policy: &CorsPolicy, origin: &str) -> HeaderVec {
    let mut headers = HeaderVec::new();

    if policy.origins.is_wildcard() && !policy.credentials {
        headers.push((Arc::from("access-control-allow-origin"), "*".to_string()));
    } else {
        headers.push((
            Arc::from("access-control-allow-origin"),
            origin.to_string(),
        ));
        headers.push((Arc::from("vary"), "Origin".to_string()));
    }

    if policy.credentials {
        headers.push((
            Arc::from("access-control-allow-credentials"),
            "true".to_string(),
        ));
    }

    headers
}

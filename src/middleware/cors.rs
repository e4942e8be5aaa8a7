use tracing::{debug, warn};

use crate::analyzer::{analyze, CorsDecision, CorsViolation};
use crate::message::{HeaderVec, Request, Response};
use crate::policy::CorsPolicy;

/// CORS policy engine
///
/// Classifies each incoming request against the configured policy and either
/// answers it directly (preflight, violation) or forwards it to the
/// downstream handler and decorates the response.
///
/// The engine holds no locks and mutates no shared state: one instance can
/// serve concurrent requests across threads or coroutines, and constructing
/// it per request is equally valid.
///
/// # Usage
///
/// ```
/// use corsgate::{Cors, CorsPolicy, Request, Response};
/// use http::Method;
///
/// let policy = CorsPolicy::builder()
///     .origins(&["https://app.example.com"])
///     .methods(&[Method::GET, Method::POST])
///     .build()
///     .expect("valid CORS policy");
/// let cors = Cors::with_policy(policy);
///
/// let request = Request::new(
///     Method::GET,
///     url::Url::parse("https://api.example.com/items").unwrap(),
/// );
/// let response = cors.process(&request, |_req| Response::default());
/// ```
pub struct Cors {
    policy: CorsPolicy,
    default_response: Response,
}

impl Cors {
    /// Create an engine from a policy and a default response template
    ///
    /// The template is cloned for preflight answers and for the default
    /// rejection path; it is never mutated in place.
    #[must_use]
    pub fn new(policy: CorsPolicy, default_response: Response) -> Self {
        Self {
            policy,
            default_response,
        }
    }

    /// Create an engine with an empty default response template
    #[must_use]
    pub fn with_policy(policy: CorsPolicy) -> Self {
        Self::new(policy, Response::default())
    }

    /// Process one request
    ///
    /// `next` is the downstream handler. It is invoked at most once, and
    /// never for preflights or rejections. Out-of-scope requests are
    /// forwarded untouched and their response returned with zero added
    /// headers.
    pub fn process<F>(&self, req: &Request, next: F) -> Response
    where
        F: FnOnce(&Request) -> Response,
    {
        match analyze(req, &self.policy) {
            CorsDecision::Reject(violation) => self.reject(violation),
            CorsDecision::Preflight(headers) => {
                debug!(path = req.uri.path(), "answering preflight");
                let mut response = self.default_response.clone();
                attach(&mut response, headers);
                response.status = 200;
                response
            }
            CorsDecision::OutOfScope => next(req),
            CorsDecision::Actual(headers) => {
                let mut response = next(req);
                attach(&mut response, headers);
                response
            }
        }
    }

    /// Build the rejection response for a violation
    ///
    /// The configured error handler may substitute its own response; the
    /// status is forced to 401 either way. A handler that returns `None`
    /// falls back silently to the default template.
    fn reject(&self, violation: CorsViolation) -> Response {
        warn!(%violation, "rejecting cross-origin request");

        if let Some(handler) = &self.policy.error_handler {
            if let Some(mut response) = handler(violation) {
                response.status = 401;
                return response;
            }
        }

        let mut response = self.default_response.clone();
        response.status = 401;
        response
    }
}

fn attach(response: &mut Response, headers: HeaderVec) {
    for (name, value) in headers {
        response.set_header(&name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;
    use url::Url;

    fn request(method: Method) -> Request {
        Request::new(method, Url::parse("https://example.com/api").unwrap())
    }

    #[test]
    fn reject_without_handler_uses_template() {
        let cors = Cors::with_policy(CorsPolicy::default());
        let response = cors.reject(CorsViolation::OriginNotAllowed);
        assert_eq!(response.status, 401);
        assert_eq!(response.body, serde_json::Value::Null);
    }

    #[test]
    fn reject_forces_handler_status_to_401() {
        let policy = CorsPolicy::builder()
            .error_handler(|_violation| {
                Some(Response::json(403, serde_json::json!({ "error": "blocked" })))
            })
            .build()
            .unwrap();
        let cors = Cors::with_policy(policy);

        let response = cors.reject(CorsViolation::MethodNotSupported);
        assert_eq!(response.status, 401);
        assert_eq!(response.body, serde_json::json!({ "error": "blocked" }));
    }

    #[test]
    fn declining_handler_falls_back_to_template() {
        let policy = CorsPolicy::builder()
            .error_handler(|_violation| None)
            .build()
            .unwrap();
        let cors = Cors::with_policy(policy);

        let response = cors.reject(CorsViolation::HeadersNotSupported);
        assert_eq!(response.status, 401);
        assert_eq!(response.body, serde_json::Value::Null);
    }

    #[test]
    fn preflight_clones_template_headers() {
        let mut template = Response::default();
        template.set_header("server", "corsgate-test".to_string());
        let cors = Cors::new(CorsPolicy::default(), template);

        let mut req = request(Method::OPTIONS);
        req.set_header("Origin", "http://www.example.com".to_string());
        req.set_header("Access-Control-Request-Method", "PUT".to_string());

        let response = cors.process(&req, |_req| unreachable!("preflight must not forward"));
        assert_eq!(response.status, 200);
        assert_eq!(response.get_header("server"), Some("corsgate-test"));
        assert_eq!(response.get_header("access-control-allow-origin"), Some("*"));
    }
}

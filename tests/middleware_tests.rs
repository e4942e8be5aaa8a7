use std::cell::Cell;
use std::sync::Arc;
use std::thread;

use corsgate::{Cors, CorsPolicy, Request, Response};
use http::Method;
use serde_json::json;
use url::Url;


// Helper to build a request against https://example.com/api
fn create_test_request(method: Method, headers: &[(&str, &str)]) -> Request {
    let mut req = Request::new(method, Url::parse("https://example.com/api").unwrap());
    for (name, value) in headers {
        req.set_header(name, value.to_string());
    }
    req
}

// Downstream handler that counts invocations
fn counting_next(calls: &Cell<usize>) -> impl FnOnce(&Request) -> Response + '_ {
    move |_req| {
        calls.set(calls.get() + 1);
        Response::json(200, json!({ "ok": true }))
    }
}

#[test]
fn test_non_cors_request_passes_through_untouched() {
    // Scenario A: GET /api, no Origin header, default config
    let _guard = tracing_util::init();
    let cors = Cors::with_policy(CorsPolicy::default());
    let req = create_test_request(Method::GET, &[]);

    let calls = Cell::new(0);
    let response = cors.process(&req, counting_next(&calls));

    assert_eq!(calls.get(), 1);
    assert_eq!(response.status, 200);
    assert_eq!(response.body, json!({ "ok": true }));
    // Exactly the downstream response: content-type only, zero CORS headers
    assert_eq!(response.headers.len(), 1);
    assert_eq!(response.get_header("access-control-allow-origin"), None);
}

#[test]
fn test_actual_request_headers_with_credentials() {
    // Scenario B: wildcard origin with credentials and exposed headers
    let _guard = tracing_util::init();
    let policy = CorsPolicy::builder()
        .any_origin()
        .credentials(true)
        .expose_headers(&["Authorization", "Etag"])
        .build()
        .unwrap();
    let cors = Cors::with_policy(policy);

    let req = create_test_request(Method::GET, &[("Origin", "http://www.example.com")]);
    let calls = Cell::new(0);
    let response = cors.process(&req, counting_next(&calls));

    assert_eq!(calls.get(), 1);
    assert_eq!(response.status, 200);
    assert_eq!(
        response.get_header("access-control-allow-origin"),
        Some("http://www.example.com")
    );
    assert_eq!(
        response.get_header("access-control-allow-credentials"),
        Some("true")
    );
    assert_eq!(response.get_header("vary"), Some("Origin"));
    assert_eq!(
        response.get_header("access-control-expose-headers"),
        Some("Authorization,Etag")
    );
}

#[test]
fn test_wrong_origin_is_rejected_with_401() {
    // Scenario C: configured origin does not match the request's
    let _guard = tracing_util::init();
    let policy = CorsPolicy::builder()
        .origins(&["http://www.example.com"])
        .build()
        .unwrap();
    let cors = Cors::with_policy(policy);

    let req = create_test_request(Method::GET, &[("Origin", "http://www.foo.com")]);
    let calls = Cell::new(0);
    let response = cors.process(&req, counting_next(&calls));

    assert_eq!(calls.get(), 0);
    assert_eq!(response.status, 401);
    assert_eq!(response.body, serde_json::Value::Null);
    assert_eq!(response.get_header("access-control-allow-origin"), None);
}

#[test]
fn test_preflight_with_disallowed_method_is_rejected() {
    // Scenario D: requested PUT, allowed methods exclude it
    let policy = CorsPolicy::builder()
        .methods(&[Method::GET, Method::POST, Method::DELETE])
        .allow_headers(&["Authorization"])
        .build()
        .unwrap();
    let cors = Cors::with_policy(policy);

    let req = create_test_request(
        Method::OPTIONS,
        &[
            ("Origin", "http://www.example.com"),
            ("Access-Control-Request-Method", "PUT"),
            ("Access-Control-Request-Headers", "Authorization"),
        ],
    );
    let calls = Cell::new(0);
    let response = cors.process(&req, counting_next(&calls));

    assert_eq!(calls.get(), 0);
    assert_eq!(response.status, 401);
}

#[test]
fn test_preflight_success_short_circuits() {
    // Scenario E: method and headers admitted
    let policy = CorsPolicy::builder()
        .methods(&[Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(&["Authorization", "If-Match"])
        .max_age(86400)
        .build()
        .unwrap();
    let cors = Cors::with_policy(policy);

    let req = create_test_request(
        Method::OPTIONS,
        &[
            ("Origin", "http://www.example.com"),
            ("Access-Control-Request-Method", "PUT"),
            ("Access-Control-Request-Headers", "Authorization"),
        ],
    );
    let calls = Cell::new(0);
    let response = cors.process(&req, counting_next(&calls));

    assert_eq!(calls.get(), 0);
    assert_eq!(response.status, 200);
    let methods = response
        .get_header("access-control-allow-methods")
        .unwrap_or("");
    assert!(methods.contains("PUT"), "allow-methods was '{methods}'");
    assert_eq!(response.get_header("access-control-max-age"), Some("86400"));
}

#[test]
fn test_error_handler_body_kept_status_forced() {
    // Scenario F: handler substitutes a body and a status; only the body survives
    let policy = CorsPolicy::builder()
        .allow_headers(&["Authorization"])
        .error_handler(|violation| {
            Some(Response::json(
                500,
                json!({ "error": violation.to_string() }),
            ))
        })
        .build()
        .unwrap();
    let cors = Cors::with_policy(policy);

    let req = create_test_request(
        Method::OPTIONS,
        &[
            ("Origin", "http://www.example.com"),
            ("Access-Control-Request-Method", "PUT"),
            ("Access-Control-Request-Headers", "X-Nosuch"),
        ],
    );
    let calls = Cell::new(0);
    let response = cors.process(&req, counting_next(&calls));

    assert_eq!(calls.get(), 0);
    assert_eq!(response.status, 401);
    assert_eq!(response.body, json!({ "error": "headers not supported" }));
}

#[test]
fn test_actual_request_preserves_downstream_response() {
    let cors = Cors::with_policy(CorsPolicy::default());
    let req = create_test_request(Method::GET, &[("Origin", "http://www.example.com")]);

    let response = cors.process(&req, |_req| {
        let mut resp = Response::json(404, json!({ "error": "not found" }));
        resp.set_header("x-request-id", "abc123".to_string());
        resp
    });

    // Downstream status and headers survive; CORS headers are merged in
    assert_eq!(response.status, 404);
    assert_eq!(response.get_header("x-request-id"), Some("abc123"));
    assert_eq!(response.get_header("content-type"), Some("application/json"));
    assert_eq!(response.get_header("access-control-allow-origin"), Some("*"));
}

#[test]
fn test_rejection_does_not_leak_cors_headers() {
    let policy = CorsPolicy::builder()
        .origins(&["http://www.example.com"])
        .credentials(true)
        .build()
        .unwrap();
    let cors = Cors::with_policy(policy);

    let req = create_test_request(Method::GET, &[("Origin", "http://evil.example.net")]);
    let response = cors.process(&req, |_req| Response::default());

    assert_eq!(response.status, 401);
    assert!(response.headers.is_empty());
}

#[test]
fn test_engine_is_shareable_across_threads() {
    let policy = CorsPolicy::builder()
        .any_origin()
        .credentials(true)
        .build()
        .unwrap();
    let cors = Arc::new(Cors::with_policy(policy));

    let mut handles = vec![];
    for i in 0..10 {
        let cors = Arc::clone(&cors);
        handles.push(thread::spawn(move || {
            let origin = format!("https://client{i}.example.com");
            let req = create_test_request(Method::GET, &[("Origin", &origin)]);
            let response = cors.process(&req, |_req| Response::default());
            assert_eq!(
                response.get_header("access-control-allow-origin"),
                Some(origin.as_str())
            );
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }
}

//! # corsgate
//!
//! **corsgate** is a CORS (Cross-Origin Resource Sharing) policy engine for Rust HTTP
//! services. It sits between an incoming request and the application's handler chain,
//! decides what kind of request it is looking at, and manipulates the outgoing
//! response accordingly.
//!
//! ## Overview
//!
//! For every request the engine produces one of four outcomes:
//!
//! - **Out of scope** — no `Origin` header, or same-origin: the request is forwarded
//!   untouched and the downstream response is returned with zero added headers.
//! - **Preflight** — a valid `OPTIONS` probe carrying `Access-Control-Request-Method`:
//!   answered immediately with the negotiated CORS headers; the downstream handler is
//!   never invoked.
//! - **Actual request** — a valid cross-origin request: forwarded to the downstream
//!   handler, whose response is then decorated with the CORS headers.
//! - **Violation** — disallowed origin, method, or requested headers: rejected with
//!   status 401, optionally through a caller-supplied error handler.
//!
//! ## Architecture
//!
//! The library is organized into four modules:
//!
//! - **[`message`]** - the request/response abstractions the engine operates on
//! - **[`policy`]** - validated CORS policy with a fluent builder
//! - **[`analyzer`]** - request classification and response-header computation
//! - **[`middleware`]** - the processing engine orchestrating classify → forward → decorate
//!
//! ## Quick Start
//!
//! ```
//! use corsgate::{Cors, CorsPolicy, Request, Response};
//! use http::Method;
//!
//! let policy = CorsPolicy::builder()
//!     .origins(&["https://app.example.com"])
//!     .methods(&[Method::GET, Method::POST])
//!     .allow_headers(&["Authorization"])
//!     .credentials(true)
//!     .max_age(3600)
//!     .build()
//!     .expect("valid CORS policy");
//!
//! let cors = Cors::with_policy(policy);
//!
//! let request = Request::new(
//!     Method::GET,
//!     url::Url::parse("https://api.example.com/items").unwrap(),
//! );
//! let response = cors.process(&request, |_req| Response::default());
//! ```
//!
//! ## Concurrency
//!
//! [`Cors::process`] is a pure function of the request and the policy plus one
//! call-out to the downstream handler. The engine holds no locks and mutates no
//! shared state, so a single instance can be shared across worker threads or
//! coroutines without synchronization. A dynamic method resolver, if configured,
//! must itself be side-effect free; it may be invoked concurrently, once per
//! in-flight request.

pub mod analyzer;
pub mod message;
pub mod middleware;
pub mod policy;

pub use analyzer::{analyze, CorsDecision, CorsViolation};
pub use message::{HeaderVec, Request, Response};
pub use middleware::Cors;
pub use policy::{CorsPolicy, CorsPolicyBuilder, MethodProvider, PolicyConfigError};

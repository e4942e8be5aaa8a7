//! # Middleware Module
//!
//! The processing engine that orchestrates classification.
//!
//! [`Cors`] wraps a [`crate::policy::CorsPolicy`] together with a default
//! response template and exposes a single entry point, [`Cors::process`],
//! with four terminal branches and no loops:
//!
//! ```text
//! analyze(request)
//!   Reject(kind)       -> reject(kind)                    (401, handler never invoked)
//!   Preflight(headers) -> template + headers, status 200  (handler never invoked)
//!   OutOfScope         -> next(request)                   (no header mutation)
//!   Actual(headers)    -> next(request) + headers
//! ```
//!
//! Violations are values, not panics: they are consumed entirely inside the
//! engine and never reach the downstream handler or the transport layer.

mod cors;

pub use cors::Cors;

//! # Message Module
//!
//! Request/response abstractions the policy engine operates on.
//!
//! corsgate does not parse raw HTTP wire bytes. The surrounding server owns
//! transport, routing and body handling; the engine only needs the method,
//! the absolute request URI, and header lookup on the way in, and a header
//! write on the way out. [`Request`] and [`Response`] are deliberately small
//! carriers of exactly that.
//!
//! Headers are stored in a [`HeaderVec`], a stack-allocated vector that
//! avoids heap allocation for the common case of a handful of headers.
//! Header names are matched case-insensitively on lookup per RFC 7230.

mod core;

pub use core::{HeaderVec, Request, Response, MAX_INLINE_HEADERS};

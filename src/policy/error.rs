use std::fmt;

/// CORS policy configuration error
///
/// Returned by `CorsPolicyBuilder::build()` when the configuration is
/// invalid. Violations detected at request time are not errors; see
/// `CorsViolation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyConfigError {
    /// Origin is not a canonical origin serialization
    ///
    /// Non-wildcard origins must be `scheme://host[:port]` with no path,
    /// query or fragment, and without a default port.
    InvalidOrigin {
        /// The invalid origin string
        origin: String,
    },
    /// Header name is empty or contains whitespace
    InvalidHeaderName {
        /// The invalid header name
        name: String,
    },
}

impl fmt::Display for PolicyConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyConfigError::InvalidOrigin { origin } => {
                write!(
                    f,
                    "CORS configuration error: invalid origin '{}'. \
                    Expected format: scheme://host[:port] (e.g., https://example.com)",
                    origin
                )
            }
            PolicyConfigError::InvalidHeaderName { name } => {
                write!(
                    f,
                    "CORS configuration error: invalid header name '{}'. \
                    Header names must be non-empty and free of whitespace",
                    name
                )
            }
        }
    }
}

impl std::error::Error for PolicyConfigError {}

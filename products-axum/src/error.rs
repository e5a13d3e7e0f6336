//! Errors raised while assembling the router.
//!
//! All of these are detected before the server accepts any traffic.

use axum::http::Method;
use thiserror::Error;

/// The configured allowed origin cannot be used as a header value.
#[derive(Debug, Error)]
#[error("invalid allowed origin {0:?}")]
pub struct InvalidOrigin(pub String);

/// A route definition is inconsistent with the rest of the route table.
#[derive(Debug, Error)]
pub enum RouteTableError {
    /// Two definitions share a method and path
    #[error("duplicate route {method} {path}")]
    Duplicate {
        /// The repeated method
        method: Method,
        /// The repeated path pattern
        path: &'static str,
    },

    /// The declared method is not the one the bound handler is served under
    #[error("route {method} {path} binds an operation served under {expected}")]
    MethodMismatch {
        /// The declared method
        method: Method,
        /// The path pattern of the definition
        path: &'static str,
        /// The method of the bound operation
        expected: Method,
    },

    /// A path validator names a parameter the pattern does not capture
    #[error("route {method} {path} validates unknown path parameter {field}")]
    UnknownPathParameter {
        /// The method of the definition
        method: Method,
        /// The path pattern of the definition
        path: &'static str,
        /// The missing parameter
        field: &'static str,
    },

    /// A definition has no documentation summary
    #[error("route {method} {path} has no summary")]
    MissingSummary {
        /// The method of the definition
        method: Method,
        /// The path pattern of the definition
        path: &'static str,
    },
}

/// Any failure while building the router.
#[derive(Debug, Error)]
pub enum RouterError {
    /// The route table failed its consistency checks
    #[error(transparent)]
    Routes(#[from] RouteTableError),

    /// The admission gate could not be configured
    #[error(transparent)]
    Origin(#[from] InvalidOrigin),

    /// The API documentation could not be generated
    #[error("failed to generate API documentation: {0}")]
    Documentation(String),
}

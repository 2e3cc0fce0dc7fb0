//! Routing errors.

use thiserror::Error;

use crate::routing::router::Method;

/// Errors raised while building the route table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("invalid route template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },

    #[error("route {method} {template} conflicts with {existing}")]
    Duplicate {
        method: Method,
        template: String,
        existing: String,
    },
}

/// Errors raised while dispatching a request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("no route matches {method} {path}")]
    RouteNotFound { method: String, path: String },
}

/// Returned when a method name is not one the router handles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported method: {0}")]
pub struct UnsupportedMethod(pub String);

//! Handler trait and the reply type handlers produce.

use serde_json::{json, Value};

use crate::routing::params::{PathParams, QueryParams, RequestBody};

/// Everything a handler may look at.
#[derive(Debug, Clone, Copy)]
pub struct RouteRequest<'a> {
    pub params: &'a PathParams,
    pub query: &'a QueryParams,
    pub body: &'a RequestBody,
}

/// A JSON value plus the status code to send it with.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub body: Value,
}

impl Reply {
    /// 200 with the given body.
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// The generic body sent when no route matches.
    pub fn not_found() -> Self {
        Self {
            status: 404,
            body: json!({ "error": "not found" }),
        }
    }
}

/// A route handler. Implemented for any matching closure or `fn`.
pub trait Handler: Send + Sync {
    fn call(&self, req: RouteRequest<'_>) -> Reply;
}

impl<F> Handler for F
where
    F: Fn(RouteRequest<'_>) -> Reply + Send + Sync,
{
    fn call(&self, req: RouteRequest<'_>) -> Reply {
        self(req)
    }
}

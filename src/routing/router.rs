//! Route table and dispatch.
//!
//! # Responsibilities
//! - Store routes in registration order
//! - Look up the first route matching (method, path)
//! - Invoke the handler and hand back its reply
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) linear scan; first match wins
//! - Duplicate (method, template shape) is rejected at registration
//! - Explicit RouteNotFound rather than silent default

use std::fmt;
use std::str::FromStr;

use crate::routing::error::{DispatchError, RouteError, UnsupportedMethod};
use crate::routing::handler::{Handler, Reply, RouteRequest};
use crate::routing::matcher::PathTemplate;
use crate::routing::params::{PathParams, QueryParams, RequestBody};

/// HTTP methods the router accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = UnsupportedMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            other => Err(UnsupportedMethod(other.to_string())),
        }
    }
}

impl TryFrom<&axum::http::Method> for Method {
    type Error = UnsupportedMethod;

    fn try_from(method: &axum::http::Method) -> Result<Self, Self::Error> {
        method.as_str().parse()
    }
}

/// A registered route.
pub struct Route {
    method: Method,
    template: PathTemplate,
    handler: Box<dyn Handler>,
}

impl Route {
    pub fn method(&self) -> Method {
        self.method
    }

    pub fn template(&self) -> &PathTemplate {
        &self.template
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("template", &self.template.as_str())
            .finish_non_exhaustive()
    }
}

/// A successful lookup: the route plus the parameters pulled from the path.
#[derive(Debug)]
pub struct RouteMatch<'r> {
    pub route: &'r Route,
    pub params: PathParams,
}

impl RouteMatch<'_> {
    /// Run the matched route's handler.
    pub fn invoke(&self, query: &QueryParams, body: &RequestBody) -> Reply {
        self.route.handler.call(RouteRequest {
            params: &self.params,
            query,
            body,
        })
    }
}

/// Ordered route table.
#[derive(Debug, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route at the end of the table.
    pub fn register<H>(
        &mut self,
        method: Method,
        template: &str,
        handler: H,
    ) -> Result<&mut Self, RouteError>
    where
        H: Handler + 'static,
    {
        let template = PathTemplate::parse(template)?;

        if let Some(existing) = self
            .routes
            .iter()
            .find(|r| r.method == method && r.template.same_shape(&template))
        {
            return Err(RouteError::Duplicate {
                method,
                template: template.as_str().to_string(),
                existing: existing.template.as_str().to_string(),
            });
        }

        tracing::debug!(method = %method, template = %template, "Route registered");
        self.routes.push(Route {
            method,
            template,
            handler: Box::new(handler),
        });
        Ok(self)
    }

    pub fn get<H: Handler + 'static>(&mut self, template: &str, handler: H) -> Result<&mut Self, RouteError> {
        self.register(Method::Get, template, handler)
    }

    pub fn post<H: Handler + 'static>(&mut self, template: &str, handler: H) -> Result<&mut Self, RouteError> {
        self.register(Method::Post, template, handler)
    }

    pub fn put<H: Handler + 'static>(&mut self, template: &str, handler: H) -> Result<&mut Self, RouteError> {
        self.register(Method::Put, template, handler)
    }

    pub fn delete<H: Handler + 'static>(&mut self, template: &str, handler: H) -> Result<&mut Self, RouteError> {
        self.register(Method::Delete, template, handler)
    }

    /// Find the first route matching `method` and `path`.
    pub fn resolve(&self, method: Method, path: &str) -> Result<RouteMatch<'_>, DispatchError> {
        self.routes
            .iter()
            .filter(|r| r.method == method)
            .find_map(|route| {
                route
                    .template
                    .match_path(path)
                    .map(|params| RouteMatch { route, params })
            })
            .ok_or_else(|| DispatchError::RouteNotFound {
                method: method.to_string(),
                path: path.to_string(),
            })
    }

    /// Resolve and invoke. Unmatched requests get [`Reply::not_found`].
    pub fn dispatch(
        &self,
        method: Method,
        path: &str,
        query: &QueryParams,
        body: &RequestBody,
    ) -> Reply {
        match self.resolve(method, path) {
            Ok(matched) => {
                tracing::debug!(
                    method = %method,
                    path = %path,
                    template = %matched.route.template,
                    "Route matched"
                );
                matched.invoke(query, body)
            }
            Err(e) => {
                tracing::debug!(error = %e, "No route matched");
                Reply::not_found()
            }
        }
    }

    /// Routes in registration order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (method, path, query, body)
//!     → router.rs (ordered scan of the route table)
//!     → matcher.rs (segment-wise template match + type conversion)
//!     → handler.rs (handler invoked with params, query, body)
//!     → Return: Reply { status, JSON body } or 404
//!
//! Route table construction (at startup):
//!     register(method, template, handler) in order
//!     → parse template, reject malformed / duplicate
//!     → freeze as immutable Router behind an Arc
//! ```
//!
//! # Design Decisions
//! - Routes registered at startup, immutable at runtime
//! - No regex in hot path
//! - Deterministic: same input always matches same route
//! - First match wins (registration order)

pub mod error;
pub mod handler;
pub mod matcher;
pub mod params;
pub mod router;

pub use error::{DispatchError, RouteError, UnsupportedMethod};
pub use handler::{Handler, Reply, RouteRequest};
pub use matcher::{ParamKind, PathTemplate, Segment};
pub use params::{ParamValue, PathParams, QueryParams, RequestBody};
pub use router::{Method, Route, RouteMatch, Router};

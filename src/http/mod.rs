//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID assigned, request span opened)
//!     → route table dispatch (crate::routing)
//!     → response.rs (Reply → JSON response)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, RequestIdExt, RequestSpan, X_REQUEST_ID};
pub use server::HttpServer;

//! Placeholder JSON API service with an ordered, typed path router.

pub mod api;
pub mod config;
pub mod export;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::Router;

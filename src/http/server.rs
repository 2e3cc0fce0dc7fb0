//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with a single fallback handler
//! - Wire up middleware (request ID, tracing, timeout)
//! - Enforce the body limit inside the handler so the 413 stays JSON
//! - Translate each request into a route-table dispatch
//! - Serve until the shutdown signal fires, then drain

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::request::{MakeRequestUuid, RequestIdExt, RequestSpan, X_REQUEST_ID};
use crate::http::response::payload_too_large;
use crate::observability::metrics;
use crate::routing::{Method, QueryParams, Reply, RequestBody, Router as RouteTable};

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub max_body_bytes: usize,
}

/// HTTP server fronting a route table.
pub struct HttpServer {
    app: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server serving `routes`.
    pub fn new(config: ServiceConfig, routes: RouteTable) -> Self {
        let state = AppState {
            routes: Arc::new(routes),
            max_body_bytes: config.limits.max_body_bytes,
        };
        let app = Self::build_router(&config, state);
        Self { app, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(config.timeouts.request_secs),
            ))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http().make_span_with(RequestSpan))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
    }

    /// The fully layered Axum app, for in-process use.
    pub fn app(&self) -> Router {
        self.app.clone()
    }

    /// Run the server until a shutdown signal arrives on `shutdown`.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

/// Turns every request into a route-table dispatch.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request.request_id().to_string();
    let (parts, body) = request.into_parts();
    let path = parts.uri.path();
    let method_str = parts.method.as_str();

    let matched = Method::try_from(&parts.method)
        .ok()
        .and_then(|method| state.routes.resolve(method, path).ok());

    let Some(matched) = matched else {
        tracing::debug!(request_id = %request_id, method = %method_str, path = %path, "No route matched");
        metrics::record_request(method_str, 404, "none", start_time);
        return Reply::not_found().into_response();
    };

    let template = matched.route.template().as_str();

    let bytes = match axum::body::to_bytes(body, state.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Request body rejected");
            metrics::record_request(method_str, 413, template, start_time);
            return payload_too_large().into_response();
        }
    };

    let content_type = parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    let body = RequestBody::from_bytes(content_type, &bytes);
    let query = QueryParams::parse(parts.uri.query().unwrap_or(""));

    let reply = matched.invoke(&query, &body);

    tracing::debug!(
        request_id = %request_id,
        method = %method_str,
        path = %path,
        template = %template,
        status = reply.status,
        "Request dispatched"
    );
    metrics::record_request(method_str, reply.status, template, start_time);

    reply.into_response()
}

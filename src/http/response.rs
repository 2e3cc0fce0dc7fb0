//! Response conversion.
//!
//! Every reply leaves as `application/json`, including the 404 and 413
//! bodies produced by the adapter itself.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::routing::Reply;

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.body)).into_response()
    }
}

/// Body for requests whose payload exceeds the configured limit.
pub fn payload_too_large() -> Reply {
    Reply::ok(json!({ "error": "payload too large" })).with_status(413)
}

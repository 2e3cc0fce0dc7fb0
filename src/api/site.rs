//! Root-level demo endpoints.
//!
//! Typed placeholders (`<int:user_id>`), no trailing slashes except on the
//! `/users/` collection.

use serde_json::json;

use crate::routing::{Reply, RouteError, RouteRequest, Router};

/// Register the site routes, in order, on `router`.
pub fn register(router: &mut Router) -> Result<(), RouteError> {
    router
        .get("/", index)?
        .get("/health", health)?
        .get("/search", search)?
        .post("/auth/login", login)?
        .get("/users/", list_users)?
        .post("/users/", create_user)?
        .get("/users/<int:user_id>", get_user)?
        .put("/users/<int:user_id>", update_user)?
        .delete("/users/<int:user_id>", delete_user)?
        .get("/users/<int:user_id>/posts", user_posts)?
        .get("/products/<name>", get_product)?
        .put("/settings/<int:user_id>", update_settings)?
        .delete("/sessions/<session_id>", delete_session)?;
    Ok(())
}

pub fn index(_req: RouteRequest<'_>) -> Reply {
    Reply::ok(json!({ "message": "Welcome to the API" }))
}

pub fn health(_req: RouteRequest<'_>) -> Reply {
    Reply::ok(json!({ "status": "ok" }))
}

pub fn search(req: RouteRequest<'_>) -> Reply {
    Reply::ok(json!({
        "query": req.query.get("q"),
        "page": req.query.get("page"),
    }))
}

// Credentials are read and ignored.
pub fn login(_req: RouteRequest<'_>) -> Reply {
    Reply::ok(json!({ "message": "Login successful" }))
}

pub fn list_users(_req: RouteRequest<'_>) -> Reply {
    Reply::ok(json!({ "users": [] }))
}

pub fn create_user(_req: RouteRequest<'_>) -> Reply {
    Reply::ok(json!({ "id": 1 }))
}

pub fn get_user(req: RouteRequest<'_>) -> Reply {
    Reply::ok(json!({ "id": req.params.int("user_id") }))
}

pub fn update_user(req: RouteRequest<'_>) -> Reply {
    Reply::ok(json!({ "id": req.params.int("user_id") }))
}

pub fn delete_user(_req: RouteRequest<'_>) -> Reply {
    Reply::ok(json!({ "message": "User deleted" }))
}

pub fn user_posts(_req: RouteRequest<'_>) -> Reply {
    Reply::ok(json!({ "posts": [] }))
}

pub fn get_product(req: RouteRequest<'_>) -> Reply {
    Reply::ok(json!({ "name": req.params.str("name") }))
}

pub fn update_settings(req: RouteRequest<'_>) -> Reply {
    Reply::ok(json!({
        "userId": req.params.int("user_id"),
        "theme": req.body.field("theme"),
    }))
}

pub fn delete_session(req: RouteRequest<'_>) -> Reply {
    Reply::ok(json!({
        "message": "Session deleted",
        "sessionId": req.params.str("session_id"),
    }))
}

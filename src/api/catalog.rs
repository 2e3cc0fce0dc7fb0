//! `/api/` demo endpoints.
//!
//! Every template ends in a trailing slash and every handler is GET-only.

use serde_json::json;

use crate::routing::{Reply, RouteError, RouteRequest, Router};

/// Register the catalog routes, in order, on `router`.
pub fn register(router: &mut Router) -> Result<(), RouteError> {
    router
        .get("/api/users/", list_users)?
        .get("/api/users/<int:user_id>/", get_user)?
        .get("/api/users/<int:user_id>/posts/", user_posts)?
        .get("/api/products/", list_products)?
        .get("/api/products/<int:product_id>/", get_product)?
        .get("/api/products/<int:product_id>/reviews/", product_reviews)?
        .get("/api/health/", health)?
        .get("/api/search/", search)?;
    Ok(())
}

// `page` and `limit` are accepted but unused.
pub fn list_users(_req: RouteRequest<'_>) -> Reply {
    Reply::ok(json!({ "users": [] }))
}

pub fn get_user(req: RouteRequest<'_>) -> Reply {
    Reply::ok(json!({ "id": req.params.int("user_id") }))
}

pub fn user_posts(_req: RouteRequest<'_>) -> Reply {
    Reply::ok(json!({ "posts": [] }))
}

pub fn list_products(_req: RouteRequest<'_>) -> Reply {
    Reply::ok(json!({ "products": [] }))
}

pub fn get_product(req: RouteRequest<'_>) -> Reply {
    Reply::ok(json!({ "id": req.params.int("product_id") }))
}

pub fn product_reviews(_req: RouteRequest<'_>) -> Reply {
    Reply::ok(json!({ "reviews": [] }))
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{Method, QueryParams, RequestBody};

    fn get(path: &str) -> Reply {
        let mut router = Router::new();
        register(&mut router).unwrap();
        router.dispatch(Method::Get, path, &QueryParams::default(), &RequestBody::Empty)
    }

    #[test]
    fn test_product_reviews() {
        assert_eq!(get("/api/products/9/reviews/").body, json!({ "reviews": [] }));
    }

    #[test]
    fn test_product_id_is_integer() {
        assert_eq!(get("/api/products/9/").body, json!({ "id": 9 }));
    }

    #[test]
    fn test_missing_trailing_slash_is_not_found() {
        assert_eq!(get("/api/health").status, 404);
        assert_eq!(get("/api/users/5").status, 404);
    }

    #[test]
    fn test_get_only() {
        let mut router = Router::new();
        register(&mut router).unwrap();
        let reply = router.dispatch(Method::Post, "/api/users/", &QueryParams::default(), &RequestBody::Empty);
        assert_eq!(reply.status, 404);
    }
}

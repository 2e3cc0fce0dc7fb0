//! Demo API surfaces.
//!
//! Two placeholder services share one route table:
//! - `site`: root-level paths (`/health`, `/users/<int:user_id>`, ...)
//! - `catalog`: everything under `/api/`, trailing slashes
//!
//! Handlers are pure and infallible; they only echo parameters or return
//! fixed payloads.

pub mod catalog;
pub mod site;

use crate::config::ApiConfig;
use crate::routing::{RouteError, Router};

/// Build the route table for the enabled surfaces. Site routes come first.
pub fn build_router(config: &ApiConfig) -> Result<Router, RouteError> {
    let mut router = Router::new();
    if config.site {
        site::register(&mut router)?;
    }
    if config.catalog {
        catalog::register(&mut router)?;
    }
    tracing::info!(
        routes = router.len(),
        site = config.site,
        catalog = config.catalog,
        "Route table built"
    );
    Ok(router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{Method, QueryParams, RequestBody};

    #[test]
    fn test_both_surfaces_coexist() {
        let router = build_router(&ApiConfig::default()).unwrap();
        assert_eq!(router.len(), 21);

        let reply = router.dispatch(Method::Get, "/api/health/", &QueryParams::default(), &RequestBody::Empty);
        assert_eq!(reply.status, 200);
        let reply = router.dispatch(Method::Get, "/health", &QueryParams::default(), &RequestBody::Empty);
        assert_eq!(reply.status, 200);
    }

    #[test]
    fn test_disabled_surface_is_absent() {
        let config = ApiConfig {
            site: false,
            catalog: true,
        };
        let router = build_router(&config).unwrap();
        let reply = router.dispatch(Method::Get, "/health", &QueryParams::default(), &RequestBody::Empty);
        assert_eq!(reply.status, 404);
    }

    #[test]
    fn test_every_route_answers_its_own_template() {
        let router = build_router(&ApiConfig::default()).unwrap();
        for route in router.routes() {
            let path: String = route
                .template()
                .as_str()
                .replace("<int:user_id>", "7")
                .replace("<int:product_id>", "8")
                .replace("<name>", "widget")
                .replace("<session_id>", "s1");
            let reply = router.dispatch(route.method(), &path, &QueryParams::default(), &RequestBody::Empty);
            assert_eq!(reply.status, 200, "{} {}", route.method(), path);
            assert!(reply.body.is_object(), "{} {}", route.method(), path);
        }
    }
}

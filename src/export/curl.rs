//! Bash script of curl commands.

use std::fmt::Write;

use crate::export::{example_path, grouped_by_method, sends_body, ExportTarget, SERVICE_NAME};
use crate::routing::{Method, Route, Router};

/// Render every route as a curl command against `$BASE_URL`.
pub fn script(router: &Router, target: &ExportTarget) -> String {
    let env_name = target.env.display_name();
    let mut out = String::new();
    out.push_str("#!/bin/bash\n");
    let _ = writeln!(out, "# curl commands for {SERVICE_NAME} - {env_name} environment");
    let _ = writeln!(out, "BASE_URL=\"{}\"\n", target.base_url());

    for (method, routes) in grouped_by_method(router) {
        let _ = writeln!(out, "# {method} Requests");
        let _ = writeln!(out, "# {}\n", "=".repeat(50));
        for route in routes {
            let _ = writeln!(out, "# {method} {}", route.template());
            out.push_str(&command(route, method, "${BASE_URL}"));
            out.push_str("\n\n");
        }
    }
    out
}

/// A single curl command for `route`.
pub fn command(route: &Route, method: Method, base_url: &str) -> String {
    let mut cmd = format!("curl -X {method} \\\n  -H \"Content-Type: application/json\"");
    if sends_body(method) {
        cmd.push_str(" \\\n  -d '{}'");
    }
    let _ = write!(cmd, " \\\n  \"{base_url}{}\"", example_path(route));
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::tests::sample;
    use crate::export::Environment;

    #[test]
    fn test_script_header() {
        let out = script(&sample(), &ExportTarget::new(Environment::Staging));
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("#!/bin/bash"));
        assert_eq!(
            lines.next(),
            Some("# curl commands for stub-api - Staging environment")
        );
        assert_eq!(lines.next(), Some("BASE_URL=\"https://staging-api.example.com\""));
    }

    #[test]
    fn test_commands_grouped_by_method() {
        let out = script(&sample(), &ExportTarget::new(Environment::Dev));
        let get = out.find("# GET Requests").unwrap();
        let post = out.find("# POST Requests").unwrap();
        let delete = out.find("# DELETE Requests").unwrap();
        assert!(get < post && post < delete);
        assert!(out.contains(&format!("# {}\n", "=".repeat(50))));
        assert!(out.contains("# GET /users/<int:user_id>\ncurl -X GET"));
    }

    #[test]
    fn test_get_command_substitutes_params() {
        let router = sample();
        let route = router.routes().nth(1).unwrap();
        assert_eq!(
            command(route, Method::Get, "${BASE_URL}"),
            "curl -X GET \\\n  -H \"Content-Type: application/json\" \\\n  \"${BASE_URL}/users/1\""
        );
    }

    #[test]
    fn test_post_command_sends_empty_json() {
        let router = sample();
        let route = router.routes().nth(2).unwrap();
        let cmd = command(route, Method::Post, "http://localhost:8080");
        assert!(cmd.contains("-d '{}'"));
        assert!(cmd.ends_with("\"http://localhost:8080/users/\""));
    }

    #[test]
    fn test_name_param_uses_example() {
        let router = sample();
        let cmd = command(router.routes().nth(3).unwrap(), Method::Get, "");
        assert!(cmd.ends_with("\"/products/example\""));
    }
}

//! Postman collection (format v2.1).

use serde_json::{json, Value};

use crate::export::{example_value, grouped_by_method, sends_body, ExportTarget, SERVICE_NAME};
use crate::routing::{Method, Route, Router, Segment};

const SCHEMA: &str = "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

/// Build the collection document.
pub fn collection(router: &Router, target: &ExportTarget) -> Value {
    let env_name = target.env.display_name();
    let base_url = target.base_url();

    let items: Vec<Value> = grouped_by_method(router)
        .into_iter()
        .flat_map(|(method, routes)| routes.into_iter().map(move |route| (method, route)))
        .map(|(method, route)| item(route, method, base_url))
        .collect();

    let mut doc = json!({
        "info": {
            "name": format!("{SERVICE_NAME} API ({env_name})"),
            "description": format!("Routes served by {SERVICE_NAME} - {env_name} environment"),
            "schema": SCHEMA,
        },
        "item": items,
    });

    // A `{{variable}}` base URL needs a collection-level default.
    if let Some(name) = variable_name(base_url) {
        doc["variable"] = json!([{ "key": name, "value": target.env.base_url() }]);
    }
    doc
}

/// Pretty-printed collection.
pub fn collection_json(router: &Router, target: &ExportTarget) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&collection(router, target))
}

fn item(route: &Route, method: Method, base_url: &str) -> Value {
    let mut path = Vec::new();
    let mut variables = Vec::new();
    for segment in route.template().segments() {
        match segment {
            Segment::Literal(lit) => path.push(lit.clone()),
            Segment::Param { name, .. } => {
                path.push(format!(":{name}"));
                variables.push(json!({ "key": name, "value": example_value(name) }));
            }
        }
    }

    let raw = format!("{base_url}/{}", path.join("/"));
    let mut url = json!({
        "raw": raw,
        "host": [host(base_url)],
        "path": path,
    });
    if let Some(protocol) = protocol(base_url) {
        url["protocol"] = json!(protocol);
    }
    if !variables.is_empty() {
        url["variable"] = json!(variables);
    }

    let mut request = json!({
        "method": method.as_str(),
        "header": [{ "key": "Content-Type", "value": "application/json" }],
        "url": url,
    });
    if sends_body(method) {
        request["body"] = json!({ "mode": "raw", "raw": "{}" });
    }

    json!({
        "name": format!("{method} {}", route.template()),
        "request": request,
        "response": [],
    })
}

fn variable_name(base_url: &str) -> Option<&str> {
    base_url.strip_prefix("{{")?.strip_suffix("}}")
}

fn protocol(base_url: &str) -> Option<&'static str> {
    if base_url.starts_with("https://") {
        Some("https")
    } else if base_url.starts_with("http://") {
        Some("http")
    } else {
        None
    }
}

fn host(base_url: &str) -> &str {
    base_url
        .strip_prefix("https://")
        .or_else(|| base_url.strip_prefix("http://"))
        .unwrap_or(base_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::tests::sample;
    use crate::export::Environment;

    #[test]
    fn test_collection_info() {
        let doc = collection(&sample(), &ExportTarget::new(Environment::Prod));
        assert_eq!(doc["info"]["name"], "stub-api API (Production)");
        assert_eq!(doc["info"]["schema"], SCHEMA);
        assert_eq!(doc["item"].as_array().unwrap().len(), 5);
        assert!(doc.get("variable").is_none());
    }

    #[test]
    fn test_param_item() {
        let doc = collection(&sample(), &ExportTarget::new(Environment::Dev));
        let item = &doc["item"][1];
        assert_eq!(item["name"], "GET /users/<int:user_id>");
        let url = &item["request"]["url"];
        assert_eq!(url["raw"], "http://localhost:8080/users/:user_id");
        assert_eq!(url["protocol"], "http");
        assert_eq!(url["host"], json!(["localhost:8080"]));
        assert_eq!(url["path"], json!(["users", ":user_id"]));
        assert_eq!(url["variable"], json!([{ "key": "user_id", "value": "1" }]));
        assert!(item["request"].get("body").is_none());
    }

    #[test]
    fn test_items_grouped_by_method() {
        let doc = collection(&sample(), &ExportTarget::new(Environment::Dev));
        let names: Vec<&str> = doc["item"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            [
                "GET /",
                "GET /users/<int:user_id>",
                "GET /products/<name>",
                "POST /users/",
                "DELETE /sessions/<session_id>",
            ]
        );
    }

    #[test]
    fn test_post_item_has_body_and_trailing_slash() {
        let doc = collection(&sample(), &ExportTarget::new(Environment::Dev));
        let item = &doc["item"][3];
        assert_eq!(item["request"]["method"], "POST");
        assert_eq!(item["request"]["body"], json!({ "mode": "raw", "raw": "{}" }));
        assert_eq!(item["request"]["url"]["path"], json!(["users", ""]));
        assert_eq!(item["request"]["url"]["raw"], "http://localhost:8080/users/");
    }

    #[test]
    fn test_placeholder_base_url_adds_variable() {
        let target = ExportTarget {
            env: Environment::Staging,
            base_url: Some("{{base_url}}".to_string()),
        };
        let doc = collection(&sample(), &target);
        assert_eq!(
            doc["variable"],
            json!([{ "key": "base_url", "value": "https://staging-api.example.com" }])
        );
        let url = &doc["item"][2]["request"]["url"];
        assert_eq!(url["raw"], "{{base_url}}/products/:name");
        assert_eq!(url["host"], json!(["{{base_url}}"]));
        assert!(url.get("protocol").is_none());
    }

    #[test]
    fn test_json_is_parseable() {
        let out = collection_json(&sample(), &ExportTarget::new(Environment::Dev)).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["item"][0]["request"]["url"]["raw"], "http://localhost:8080/");
    }
}

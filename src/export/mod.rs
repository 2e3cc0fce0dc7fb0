//! Route table exports.
//!
//! # Responsibilities
//! - Render the route table as a plain listing, a curl script, or a
//!   Postman v2.1 collection
//! - Pick the base URL for the target environment
//! - Fill parameter segments with example values
//!
//! # Design Decisions
//! - Exports read `Router::routes()` only; nothing is re-parsed
//! - Requests are grouped by method, in order of each method's first
//!   registration, and keep registration order inside a group

pub mod curl;
pub mod postman;

use clap::ValueEnum;

use crate::routing::{Method, Route, Router, Segment};

/// Name used for collection titles and script headers.
pub const SERVICE_NAME: &str = "stub-api";

/// Output format for `routes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// One `METHOD template` line per route, in match order
    Text,
    /// Bash script with one curl command per route
    Curl,
    /// Postman collection (v2.1 JSON)
    Postman,
}

/// Target environment for generated requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn display_name(self) -> &'static str {
        match self {
            Environment::Dev => "Development",
            Environment::Staging => "Staging",
            Environment::Prod => "Production",
        }
    }

    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Dev => "http://localhost:8080",
            Environment::Staging => "https://staging-api.example.com",
            Environment::Prod => "https://api.example.com",
        }
    }
}

/// Where exported requests point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTarget {
    pub env: Environment,
    /// Replaces the environment's base URL. May be a `{{variable}}`.
    pub base_url: Option<String>,
}

impl ExportTarget {
    pub fn new(env: Environment) -> Self {
        Self { env, base_url: None }
    }

    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .unwrap_or_else(|| self.env.base_url())
    }
}

/// Render `router` in the requested format.
pub fn render(
    router: &Router,
    format: ExportFormat,
    target: &ExportTarget,
) -> Result<String, serde_json::Error> {
    match format {
        ExportFormat::Text => Ok(text_listing(router)),
        ExportFormat::Curl => Ok(curl::script(router, target)),
        ExportFormat::Postman => postman::collection_json(router, target).map(|json| json + "\n"),
    }
}

fn text_listing(router: &Router) -> String {
    router
        .routes()
        .map(|route| format!("{:<7} {}\n", route.method(), route.template()))
        .collect()
}

/// Example value for a parameter, chosen from its name.
pub fn example_value(name: &str) -> &'static str {
    let name = name.to_ascii_lowercase();
    if name.contains("id") {
        "1"
    } else if name.contains("name") {
        "example"
    } else {
        "1"
    }
}

/// The template with every parameter replaced by its example value.
pub fn example_path(route: &Route) -> String {
    let pieces: Vec<&str> = route
        .template()
        .segments()
        .iter()
        .map(|segment| match segment {
            Segment::Literal(lit) => lit.as_str(),
            Segment::Param { name, .. } => example_value(name),
        })
        .collect();
    format!("/{}", pieces.join("/"))
}

/// Routes grouped by method, keeping first-seen method order.
fn grouped_by_method(router: &Router) -> Vec<(Method, Vec<&Route>)> {
    let mut groups: Vec<(Method, Vec<&Route>)> = Vec::new();
    for route in router.routes() {
        match groups.iter_mut().find(|(method, _)| *method == route.method()) {
            Some((_, routes)) => routes.push(route),
            None => groups.push((route.method(), vec![route])),
        }
    }
    groups
}

fn sends_body(method: Method) -> bool {
    matches!(method, Method::Post | Method::Put)
}

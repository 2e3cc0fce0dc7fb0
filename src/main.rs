//! Placeholder JSON API service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request        ┌──────────────────────────────────────────────┐
//!     ──────────────────────┼─▶ http::server ──▶ routing::Router          │
//!                           │   (axum, layers)     (ordered templates)     │
//!                           │                           │                  │
//!                           │                           ▼                  │
//!     Client Response       │                      api::{site, catalog}    │
//!     ◀─────────────────────┼── http::response ◀── handler Reply          │
//!                           │                                              │
//!                           │   config · observability · lifecycle         │
//!                           └──────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use stub_api::api::build_router;
use stub_api::config::{load_config, validate_config, ConfigError, ServiceConfig};
use stub_api::export::{self, Environment, ExportFormat, ExportTarget};
use stub_api::lifecycle::signals::spawn_signal_handler;
use stub_api::observability::{logging, metrics};
use stub_api::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "stub-api")]
#[command(about = "Placeholder JSON API service", long_about = None)]
struct Cli {
    /// TOML config file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the API (default)
    Serve,
    /// Print or export the route table in match order
    Routes {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Text)]
        format: ExportFormat,

        /// Environment whose base URL the exported requests use
        #[arg(short, long, value_enum, default_value_t = Environment::Dev)]
        env: Environment,

        /// Base URL override, e.g. `{{base_url}}` for a Postman variable
        #[arg(long)]
        base_url: Option<String>,
    },
}

fn resolve_config(cli: &Cli) -> Result<ServiceConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = &cli.bind {
        config.listener.bind_address = bind.clone();
        validate_config(&config).map_err(ConfigError::Validation)?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    if let Some(Commands::Routes {
        format,
        env,
        base_url,
    }) = cli.command
    {
        let routes = build_router(&config.api)?;
        let target = ExportTarget { env, base_url };
        print!("{}", export::render(&routes, format, &target)?);
        return Ok(());
    }

    logging::init_logging(&config.observability)?;

    tracing::info!("stub-api v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        max_body_bytes = config.limits.max_body_bytes,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Address already validated.
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let routes = build_router(&config.api)?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    spawn_signal_handler(shutdown.clone());

    let server = HttpServer::new(config, routes);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

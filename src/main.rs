//! JSON:API route registrar CLI.
//!
//! ```text
//!   routes.toml
//!       │
//!       ▼
//!  ┌──────────┐   ┌─────────────┐   ┌──────────────┐
//!  │  config  │──▶│  registrar  │──▶│  route table │──▶ list / match
//!  └──────────┘   └─────────────┘   └──────────────┘
//!                        │
//!                        ▼
//!                 ┌──────────────┐
//!                 │ axum registry│──▶ serve (echo controller)
//!                 └──────────────┘
//! ```

use std::path::PathBuf;

use axum::http::Method;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use jsonapi_routes::config::{load_config, RoutesConfig};
use jsonapi_routes::http::{serve, AllowAll, AxumRegistry, EchoController, HandlerRegistry};
use jsonapi_routes::observability::logging;
use jsonapi_routes::routing::registrar::default_controller;
use jsonapi_routes::routing::{MatchError, ResourceRegistrar, RouteTable};

#[derive(Parser)]
#[command(name = "jsonapi-routes")]
#[command(about = "Expand JSON:API resource declarations into routes", long_about = None)]
struct Cli {
    /// Path to the routes configuration file.
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every registered route
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Match a request against the route table
    Match {
        /// HTTP method, e.g. GET
        method: String,
        /// Request path, e.g. /posts/123/relationships/author
        path: String,
    },
    /// Serve the routes with a controller that echoes the matched action
    Serve {
        /// Override the configured bind address
        #[arg(short, long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    logging::init(&config.observability.log_level);
    tracing::debug!(
        path = %cli.config.display(),
        resources = config.resources.len(),
        "Configuration loaded"
    );

    match cli.command {
        Commands::List { json } => {
            let table = build_table(&config)?;
            print_routes(&table, json)?;
        }
        Commands::Match { method, path } => {
            let table = build_table(&config)?;
            let method = Method::from_bytes(method.to_uppercase().as_bytes())?;
            match table.match_route(&method, &path) {
                Ok(matched) => {
                    println!("{} {} -> {}", method, matched.route.path, matched.route.action);
                    for (name, value) in matched.parameters.iter() {
                        println!("  {name} = {value}");
                    }
                    if !matched.route.middleware.is_empty() {
                        println!("  middleware: {}", matched.route.middleware.join(", "));
                    }
                }
                Err(e) => {
                    eprintln!("{} {e}", e.status());
                    if let MatchError::MethodNotAllowed { allowed, .. } = &e {
                        let allowed: Vec<_> = allowed.iter().map(Method::as_str).collect();
                        eprintln!("  allowed: {}", allowed.join(", "));
                    }
                    std::process::exit(1);
                }
            }
        }
        Commands::Serve { bind } => {
            let handlers = echo_handlers(&config);
            let registry = AxumRegistry::new(handlers).with_body_limit(config.server.max_body_size);
            let mut registrar = ResourceRegistrar::new(registry).with_prefix(config.server.prefix.as_str());
            registrar.resources(config.declarations())?;

            let bind = bind.unwrap_or_else(|| config.server.bind_address.clone());
            let listener = TcpListener::bind(&bind).await?;
            serve(listener, registrar.into_inner().into_router()).await?;
        }
    }

    Ok(())
}

fn build_table(config: &RoutesConfig) -> Result<RouteTable, Box<dyn std::error::Error>> {
    let mut registrar =
        ResourceRegistrar::new(RouteTable::new()).with_prefix(config.server.prefix.as_str());
    registrar.resources(config.declarations())?;
    Ok(registrar.into_inner())
}

/// Echo controllers for every resource; named authorizers, validators and
/// middleware let every request through.
fn echo_handlers(config: &RoutesConfig) -> HandlerRegistry {
    let mut handlers = HandlerRegistry::new();
    for resource in &config.resources {
        let controller = resource
            .controller
            .clone()
            .unwrap_or_else(|| default_controller(&resource.resource_type));
        handlers = handlers.with_controller(controller, EchoController);

        if let Some(authorizer) = &resource.authorizer {
            tracing::warn!(authorizer = %authorizer, "No authorizer implementation, allowing all requests");
            handlers = handlers.with_authorizer(authorizer.as_str(), AllowAll);
        }
        if let Some(validators) = &resource.validators {
            tracing::warn!(validators = %validators, "No validator implementation, accepting all requests");
            handlers = handlers.with_validator(validators.as_str(), AllowAll);
        }
        for name in &resource.middleware {
            tracing::warn!(middleware = %name, "No middleware implementation, passing requests through");
            handlers = handlers.with_middleware(name.as_str(), AllowAll);
        }
    }
    handlers
}

fn print_routes(table: &RouteTable, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let routes: Vec<_> = table
            .routes()
            .map(|route| {
                serde_json::json!({
                    "method": route.method.as_str(),
                    "path": &route.path,
                    "action": route.action.to_string(),
                    "parameters": route
                        .parameters
                        .iter()
                        .collect::<std::collections::BTreeMap<_, _>>(),
                    "middleware": &route.middleware,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&routes)?);
        return Ok(());
    }

    for route in table.routes() {
        println!(
            "{:<7} {:<48} {}",
            route.method.as_str(),
            route.path,
            route.action
        );
    }
    Ok(())
}

//! CLI administration tool for blockbuster-gateway.
//!
//! Inspects the route table and runs raw gateway envelopes through the full
//! dispatch pipeline without starting the HTTP server.
//!
//! # Usage
//!
//! ```bash
//! # Load the route table and list it
//! cargo run --bin admin -- routes check --file routes.toml
//!
//! # Show which route a path resolves to
//! cargo run --bin admin -- routes resolve /movies/42
//!
//! # Dispatch an envelope against an in-memory store
//! cargo run --bin admin -- invoke event.json --seed movies.json
//! ```
//!
//! # Environment Variables
//!
//! - `ROUTES_FILE` (optional): default route file, `routes.toml` if unset
//! - `SEED_FILE` (optional): default seed for `invoke`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use blockbuster_gateway::api::gateway::handle_event;
use blockbuster_gateway::config::DEFAULT_ROUTES_FILE;
use blockbuster_gateway::server::{build_dispatcher, build_services};
use blockbuster_gateway::state::Services;
use clap::{Parser, Subcommand};
use colored::*;

/// CLI tool for inspecting and exercising the gateway.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Route table operations
    Routes {
        #[command(subcommand)]
        action: RoutesAction,
    },

    /// Dispatch a JSON envelope and print the response
    Invoke {
        /// Path to a JSON file holding the envelope
        envelope: PathBuf,

        /// Route file (defaults to ROUTES_FILE or routes.toml)
        #[arg(short, long)]
        routes: Option<PathBuf>,

        /// Movies to preload (defaults to SEED_FILE)
        #[arg(short, long)]
        seed: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum RoutesAction {
    /// Load the route table and list its entries
    Check {
        /// Route file (defaults to ROUTES_FILE or routes.toml)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Show the route a path resolves to
    Resolve {
        path: String,

        /// Route file (defaults to ROUTES_FILE or routes.toml)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Routes { action } => match action {
            RoutesAction::Check { file } => check_routes(&routes_file(file))?,
            RoutesAction::Resolve { path, file } => resolve_route(&routes_file(file), &path)?,
        },
        Commands::Invoke {
            envelope,
            routes,
            seed,
        } => {
            let seed = seed.or_else(|| std::env::var("SEED_FILE").ok().map(PathBuf::from));
            invoke(&envelope, &routes_file(routes), seed.as_deref()).await?
        }
    }

    Ok(())
}

fn routes_file(arg: Option<PathBuf>) -> PathBuf {
    arg.or_else(|| std::env::var("ROUTES_FILE").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ROUTES_FILE))
}

/// Loads the route table and prints it in match order.
///
/// # Output Format
///
/// ```text
/// Route table: routes.toml
///
///   #   Pattern                        Handler
///   ──────────────────────────────────────────────────
///   1   /movies(/.*)?                  movies.movie
/// ```
fn check_routes(file: &Path) -> Result<()> {
    let dispatcher = build_dispatcher(file, Services::in_memory())?;
    let table = dispatcher.routes();

    println!(
        "{} {}",
        "Route table:".bright_blue().bold(),
        file.display().to_string().cyan()
    );
    println!();
    println!(
        "  {:<3} {:<30} {}",
        "#".bright_white().bold(),
        "Pattern".bright_white().bold(),
        "Handler".bright_white().bold()
    );
    println!("  {}", "─".repeat(50).bright_black());

    for (i, route) in table.routes().iter().enumerate() {
        println!(
            "  {:<3} {:<30} {}",
            (i + 1).to_string().bright_black(),
            route.pattern().cyan(),
            route.handler_name()
        );
    }

    println!();
    println!(
        "{}",
        format!("✓ {} route(s) loaded", table.len()).green().bold()
    );

    Ok(())
}

fn resolve_route(file: &Path, path: &str) -> Result<()> {
    let dispatcher = build_dispatcher(file, Services::in_memory())?;

    match dispatcher.resolve(path) {
        Ok(route) => {
            println!("{} {}", "✓".green().bold(), path.bright_white());
            println!("  Pattern: {}", route.pattern().cyan());
            println!("  Handler: {}", route.handler_name().cyan());
        }
        Err(e) => {
            println!("{} {}", "✗".red().bold(), e.to_string().red());
        }
    }

    Ok(())
}

async fn invoke(envelope: &Path, routes: &Path, seed: Option<&Path>) -> Result<()> {
    let raw = tokio::fs::read_to_string(envelope)
        .await
        .with_context(|| format!("Failed to read envelope {}", envelope.display()))?;
    let event: serde_json::Value =
        serde_json::from_str(&raw).context("Envelope is not valid JSON")?;

    let services = build_services(seed).await?;
    let dispatcher = build_dispatcher(routes, services)?;

    let response = handle_event(&dispatcher, event).await;

    let status = response.status();
    let status_line = status.to_string();
    if status.is_success() {
        println!("{}", status_line.green().bold());
    } else {
        println!("{}", status_line.red().bold());
    }

    if let Some(body) = &response.body {
        let pretty = serde_json::from_str::<serde_json::Value>(body)
            .and_then(|v| serde_json::to_string_pretty(&v))
            .unwrap_or_else(|_| body.clone());
        println!("{pretty}");
    }

    Ok(())
}

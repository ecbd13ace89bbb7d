//! adboard CLI - classified-ads service entry point
//!
//! This is the main entry point for the adboard command-line tool:
//! - `serve`: run the HTTP server (ads, rubrics, tags, profiles)

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::{init_tracing, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "adboard",
    author,
    version,
    about = "Classified-ads bulletin board service",
    long_about = "Serve a classified-ads API: listings filed under rubrics, weighted tags, \
                  and per-user profiles, backed by PostgreSQL."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::serve::ServeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up DATABASE_URL and friends from a local .env, if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_tracing(&TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await,
    }
}

//! WLCG scope diagnostics CLI
//!
//! Command-line access to the scope recognizer, parser and claim processor,
//! for operators checking what a token's scopes would grant.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::{claim, scope};

#[derive(Parser)]
#[command(name = "wlcg")]
#[command(about = "WLCG token-profile scope diagnostics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path
    #[arg(short, long, global = true, default_value = "wlcg.toml")]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Report whether a single token is a recognised WLCG scope
    Check {
        /// Scope token, e.g. `storage.read:/data`
        token: String,
    },

    /// Parse a single token and print the resulting authorisation
    Parse {
        /// Scope token, e.g. `storage.read:/data`
        token: String,

        /// Authorization root; overrides the configured one
        #[arg(short, long)]
        root: Option<String>,
    },

    /// Process a whole space-separated scope claim
    Claim {
        /// Scope claim, e.g. "openid storage.read:/ compute.create"
        claim: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check { token } => scope::check(&token),
        Commands::Parse { token, root } => {
            let config = commands::load_config(&cli.config)?;
            scope::parse(&token, root.as_deref(), &config)
        }
        Commands::Claim { claim: raw } => {
            let config = commands::load_config(&cli.config)?;
            claim::run(&raw, config)
        }
    }
}

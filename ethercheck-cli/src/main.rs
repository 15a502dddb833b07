//! Ethercheck CLI - Ethereum wallet balance checker in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{balance, demo, session, setup, status};

/// ethercheck - check your wallet's ETH balance
#[derive(Parser)]
#[command(name = "ethc", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show configuration and session defaults
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Query the balance of an address directly
    Balance {
        /// Account address (0x-prefixed hex)
        address: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Configure the ledger endpoint
    Setup {
        /// Network name (mainnet, sepolia, holesky)
        network: String,
        /// Access key authorizing ledger requests
        #[arg(long)]
        access_key: String,
    },

    /// Run an interactive wallet session walk
    Session {
        /// Approve the connection prompt without asking
        #[arg(long)]
        auto_approve: bool,
        /// Output session snapshots as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Manage demo mode
    Demo {
        #[command(subcommand)]
        command: Option<demo::DemoCommands>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = run(cli).await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Status { json } => status::run(json),
        Commands::Balance { address, json } => balance::run(&address, json).await,
        Commands::Setup {
            network,
            access_key,
        } => setup::run(&network, &access_key),
        Commands::Session { auto_approve, json } => session::run(auto_approve, json).await,
        Commands::Demo { command } => demo::run(command),
    }
}

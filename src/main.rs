//! Bison CLI - fee settlement claims
//!
//! A command-line tool for inspecting accrued fee balances on the Bison
//! fee-settlement service and withdrawing them through the on-chain vault.

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

mod backend;
mod chain;
mod commands;
mod config;
mod crypto;
mod error;
mod format;
mod models;
mod prompt;

use backend::BackendClient;
use commands::{claim, claim_auth, fees, history, info};
use config::AppContext;
use prompt::TermPrompt;

/// Bison CLI - fee settlement claims
#[derive(Parser)]
#[command(name = "bison")]
#[command(author = "Bison Labs")]
#[command(version = "0.1.0")]
#[command(about = "Inspect and claim accrued fee balances", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Network to operate on (testnet, mainnet)
    #[arg(short, long, global = true)]
    network: Option<String>,

    /// Skip the interactive confirmation prompt
    #[arg(short, long, global = true)]
    yes: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show account configuration
    Info,

    /// Show the current fee balance snapshot
    Fees,

    /// Issue and print a claim authorization without submitting a transaction
    ClaimAuth,

    /// Claim unclaimed fees through the vault contract
    Claim {
        /// Payout address (defaults to the signer address)
        #[arg(long)]
        payout: Option<String>,
    },

    /// Show recent claims
    History {
        /// Number of records to show
        #[arg(long, default_value = "10")]
        limit: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    // Print banner
    print_banner();

    // Credentials and network are validated before any network call
    let ctx = AppContext::resolve(cli.network.clone())?;
    tracing::debug!(network = ctx.network.name(), "operating context resolved");

    let api = BackendClient::new(&ctx)?;
    let mut prompt = TermPrompt;

    match cli.command {
        Commands::Info => {
            info::execute(&api).await?;
        }

        Commands::Fees => {
            fees::execute(&api).await?;
        }

        Commands::ClaimAuth => {
            claim_auth::execute(&api, &mut prompt, cli.yes).await?;
        }

        Commands::Claim { payout } => {
            claim::execute(&api, &mut prompt, &ctx, payout, cli.yes).await?;
        }

        Commands::History { limit } => {
            history::execute(&api, limit).await?;
        }
    }

    Ok(())
}

fn print_banner() {
    let banner = r#"
    ____  _________ ____  _   __
   / __ )/  _/ ___// __ \/ | / /
  / __  |/ / \__ \/ / / /  |/ /
 / /_/ // / ___/ / /_/ / /|  /
/_____/___//____/\____/_/ |_/
                                "#;

    println!("{}", banner.cyan());
    println!("{}", "  Fee settlement claims".bright_black());
    println!("{}", "  https://bison.exchange".bright_black());
    println!();
}

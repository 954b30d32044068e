//! Claim-auth command - issue and print a claim authorization
//!
//! Same gating as the claim pipeline, minus the on-chain step. The credential
//! is single-use and time-boxed, so it is only issued after the operator
//! confirms they intend to consume it.

use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::backend::SettlementApi;
use crate::format;
use crate::prompt::ConfirmPrompt;

pub async fn execute(
    api: &impl SettlementApi,
    prompt: &mut dyn ConfirmPrompt,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Claim Authorization".cyan().bold());
    println!();

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message("Fetching balance...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let balance = api.fee_balance().await?;
    pb.finish_with_message(format!(
        "{} Unclaimed: {}",
        "✓".green(),
        format::usdc(balance.unclaimed_uusdc).green()
    ));

    if balance.unclaimed_uusdc == 0 {
        println!();
        println!("{}", "No funds available to claim".yellow());
        return Ok(());
    }

    if !skip_confirm {
        println!();
        let message = format!(
            "Issue a single-use authorization for {}?",
            format::usdc(balance.unclaimed_uusdc)
        );
        if !prompt.confirm(&message)? {
            println!("{}", "Aborted".yellow());
            return Ok(());
        }
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message("Requesting authorization...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let auth = api.claim_authorization().await?;
    pb.finish_with_message(format!("{} Authorization issued", "✓".green()));

    println!();
    println!("  {} {}", "ID:".bright_black(), auth.id.to_string().cyan());
    println!(
        "  {} {}",
        "Amount:".bright_black(),
        format::usdc(auth.amount_uusdc).green()
    );
    println!("  {} {}", "Chain:".bright_black(), auth.chain);
    println!("  {} {}", "Signer:".bright_black(), auth.signer_address);
    println!(
        "  {} {}",
        "Expires:".bright_black(),
        format::timestamp(auth.expires_at).yellow()
    );
    println!("  {} {}", "Signature:".bright_black(), auth.signature);
    println!();
    println!(
        "  {}",
        "Single use - consume it before it expires or it is wasted.".bright_black()
    );

    Ok(())
}

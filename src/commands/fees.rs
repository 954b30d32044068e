//! Fees command - show the current fee balance snapshot

use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::backend::SettlementApi;
use crate::format;

pub async fn execute(api: &impl SettlementApi) -> Result<()> {
    println!("{}", "Fee Balance".cyan().bold());
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
    pb.finish_with_message(format!("{} Balance fetched", "✓".green()));

    println!();
    println!(
        "  {} {} {}",
        "Account:".bright_black(),
        balance.account_name.green(),
        format!("({})", balance.payout_chain).bright_black()
    );
    println!(
        "  {} {}",
        "Signer:".bright_black(),
        format::short_address(&balance.signer_address)
    );
    println!();

    println!("  {}", "Balances".bright_black());
    println!("  {}", "━".repeat(40).bright_black());
    println!(
        "    {} {}",
        "Pending:".bright_black(),
        format::usdc(balance.pending_uusdc)
    );
    println!(
        "    {} {}",
        "Locked:".bright_black(),
        format::usdc(balance.locked_uusdc).yellow()
    );
    println!(
        "    {} {}",
        "Unclaimed:".bright_black(),
        format::usdc(balance.unclaimed_uusdc).green().bold()
    );

    if balance.unclaimed_uusdc > 0 {
        println!();
        println!(
            "  {}",
            format!(
                "Run 'bison claim' to withdraw {}",
                format::usdc(balance.unclaimed_uusdc)
            )
            .bright_black()
        );
    }

    Ok(())
}

//! Info command - show account configuration

use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::backend::SettlementApi;
use crate::format;

pub async fn execute(api: &impl SettlementApi) -> Result<()> {
    println!("{}", "Account Configuration".cyan().bold());
    println!();

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message("Fetching account info...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let account = api.account_info().await?;
    pb.finish_with_message(format!("{} Account fetched", "✓".green()));

    println!();
    println!("  {} {}", "Account:".bright_black(), account.name.green());
    println!("  {} {}", "ID:".bright_black(), account.id.cyan());
    println!("  {} {}", "Email:".bright_black(), account.email);
    println!();

    println!("  {}", "Fees".bright_black());
    println!("  {}", "━".repeat(40).bright_black());
    println!(
        "    {} {}",
        "Schedule:".bright_black(),
        format::bps(account.fee_bps).yellow()
    );
    println!();

    println!("  {}", "Payout".bright_black());
    println!("  {}", "━".repeat(40).bright_black());
    println!("    {} {}", "Chain:".bright_black(), account.payout_chain);
    println!(
        "    {} {}",
        "Signer:".bright_black(),
        account.signer_address
    );
    println!();

    println!(
        "  {} {}",
        "Created:".bright_black(),
        format::timestamp(account.created_at)
    );

    Ok(())
}

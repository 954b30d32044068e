//! History command - list past claims

use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::backend::SettlementApi;
use crate::format;

pub async fn execute(api: &impl SettlementApi, limit: u32) -> Result<()> {
    println!("{}", "Claim History".cyan().bold());
    println!();

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message("Fetching claim history...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let history = api.claim_history(limit).await?;
    pb.finish_with_message(format!("{} History fetched", "✓".green()));

    println!();

    if history.records.is_empty() {
        println!("  {}", "No claims yet".bright_black());
        return Ok(());
    }

    println!(
        "  {:<20} {:<12} {:<10} {}",
        "Date".bright_black(),
        "Amount".bright_black(),
        "Chain".bright_black(),
        "Payout".bright_black()
    );
    println!("  {}", "━".repeat(60).bright_black());

    for row in format::history_rows(&history.records, limit as usize, history.has_more) {
        println!("  {}", row);
    }

    Ok(())
}

//! Claim command - the withdrawal pipeline
//!
//! Five sequential stages: balance, destination + chain info, confirmation,
//! authorization, on-chain submission. The authorization is requested
//! strictly after confirmation - it is time-boxed and single-use, and must
//! not sit idle while the operator decides.

use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::backend::SettlementApi;
use crate::chain::{self, ChainSubmitter};
use crate::config::AppContext;
use crate::error::BisonError;
use crate::format;
use crate::models::{ChainInfo, ClaimAuthorization};
use crate::prompt::ConfirmPrompt;

/// Whether the payout goes to the signer's own address or a custom one.
/// Selects the confirmation wording only - the same address value flows to
/// the transaction either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PayoutTarget {
    Signer,
    Custom,
}

fn resolve_payout(flag: Option<&str>, signer_address: &str) -> (String, PayoutTarget) {
    match flag {
        Some(addr) if addr.eq_ignore_ascii_case(signer_address) => {
            (addr.to_string(), PayoutTarget::Signer)
        }
        Some(addr) => (addr.to_string(), PayoutTarget::Custom),
        None => (signer_address.to_string(), PayoutTarget::Signer),
    }
}

fn confirm_message(amount_uusdc: u64, payout: &str, target: PayoutTarget) -> String {
    let amount = format::usdc(amount_uusdc);
    let short = format::short_address(payout);
    match target {
        PayoutTarget::Signer => format!("Claim {} to your signer address {}?", amount, short),
        PayoutTarget::Custom => format!("Claim {} to custom payout address {}?", amount, short),
    }
}

/// Everything the on-chain stage needs, assembled by the off-chain stages
struct PreparedClaim {
    chain_info: ChainInfo,
    auth: ClaimAuthorization,
    payout_address: String,
}

/// Stages 1-4. Returns None on the two successful early exits: nothing to
/// claim, or the operator declined.
async fn prepare<A: SettlementApi>(
    api: &A,
    prompt: &mut dyn ConfirmPrompt,
    payout_flag: Option<&str>,
    skip_confirm: bool,
) -> Result<Option<PreparedClaim>> {
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
        return Ok(None);
    }

    let (payout_address, target) = resolve_payout(payout_flag, &balance.signer_address);
    // A malformed destination must not burn an authorization
    chain::parse_address(&payout_address)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message("Fetching chain info...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let chains = api.chain_metadata().await?;
    let chain_info = chains.get(&balance.payout_chain).cloned().ok_or_else(|| {
        BisonError::Backend(format!("no chain metadata for '{}'", balance.payout_chain))
    })?;
    pb.finish_with_message(format!(
        "{} Chain: {} (id {})",
        "✓".green(),
        balance.payout_chain,
        chain_info.chain_id
    ));

    println!();
    println!(
        "  {} {}",
        "Amount:".bright_black(),
        format::usdc(balance.unclaimed_uusdc).green()
    );
    println!("  {} {}", "To:".bright_black(), payout_address);
    println!(
        "  {} {}",
        "Vault:".bright_black(),
        format::short_address(&chain_info.vault_address)
    );
    println!();

    if !skip_confirm {
        let message = confirm_message(balance.unclaimed_uusdc, &payout_address, target);
        if !prompt.confirm(&message)? {
            println!("{}", "Aborted".yellow());
            return Ok(None);
        }
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message("Requesting claim authorization...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let auth = api.claim_authorization().await?;
    pb.finish_with_message(format!(
        "{} Authorization {} (expires {})",
        "✓".green(),
        auth.id,
        format::timestamp(auth.expires_at)
    ));

    Ok(Some(PreparedClaim {
        chain_info,
        auth,
        payout_address,
    }))
}

pub async fn execute(
    api: &impl SettlementApi,
    prompt: &mut dyn ConfirmPrompt,
    ctx: &AppContext,
    payout_flag: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Claim Fees".cyan().bold());
    println!();

    let Some(prep) = prepare(api, prompt, payout_flag.as_deref(), skip_confirm).await? else {
        return Ok(());
    };

    let payout = chain::parse_address(&prep.payout_address)?;
    let submitter = ChainSubmitter::connect(&prep.chain_info, &ctx.private_key)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message("Checking vault contract...");
    pb.enable_steady_tick(Duration::from_millis(100));

    submitter.ensure_vault_deployed().await?;
    pb.finish_with_message(format!("{} Vault contract verified", "✓".green()));

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message("Submitting withdrawal...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let call = submitter.withdraw_call(&prep.auth, payout)?;
    let pending = call
        .send()
        .await
        .map_err(|e| BisonError::ChainSubmission(e.to_string()))?;
    let tx_hash = *pending;
    pb.finish_with_message(format!("{} Submitted: {:?}", "✓".green(), tx_hash));

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message("Waiting for confirmation...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let receipt = pending
        .await
        .map_err(|e| BisonError::ChainSubmission(e.to_string()))?;
    let receipt = chain::confirm_receipt(receipt)?;
    pb.finish_with_message(format!("{} Transaction confirmed", "✓".green()));

    println!();
    println!("{}", "✅ Claim Complete".green().bold());
    println!();
    println!(
        "  {} {}",
        "Amount:".bright_black(),
        format::usdc(prep.auth.amount_uusdc).green()
    );
    println!("  {} {}", "To:".bright_black(), prep.payout_address);
    println!("  {} {:?}", "Tx:".bright_black(), tx_hash);
    if let Some(block) = receipt.block_number {
        println!("  {} {}", "Block:".bright_black(), block);
    }

    Ok(())
}

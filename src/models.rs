//! Data models for the Bison CLI
//!
//! All monetary amounts are integer micro-USDC counts (the settled
//! stablecoin's minor unit). Conversion to dollars happens only at render
//! time in `format::usdc` - no floating point anywhere in the money path.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// USDC decimals (6) - amounts are tracked in microunits
pub const USDC_DECIMALS: u32 = 6;

/// Account configuration as the backend sees it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Fee schedule in basis points
    pub fee_bps: u32,
    /// Chain the account's vault and funds live on
    pub payout_chain: String,
    /// Address the operator key controls
    pub signer_address: String,
    /// Unix seconds
    pub created_at: i64,
}

/// Current fee balance snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeBalance {
    pub account_id: String,
    pub account_name: String,
    pub payout_chain: String,
    pub signer_address: String,
    /// Accrued but not yet settled by the backend
    pub pending_uusdc: u64,
    /// Settled but still inside a settlement window
    pub locked_uusdc: u64,
    /// Withdrawable right now
    pub unclaimed_uusdc: u64,
}

/// Chain metadata needed to construct a chain client, keyed by chain name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainInfo {
    pub chain_id: u64,
    pub rpc_url: String,
    pub vault_address: String,
}

/// Time-boxed, single-use credential approving one withdrawal.
///
/// Must be consumed before `expires_at`; the vault rejects it afterwards.
/// Never reuse an authorization across invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimAuthorization {
    /// Idempotency token, doubles as the on-chain authorization id
    pub id: Uuid,
    pub amount_uusdc: u64,
    pub chain: String,
    /// Unix seconds
    pub expires_at: i64,
    pub signer_address: String,
    /// Backend signature the vault verifies
    pub signature: String,
}

/// Historical claim, immutable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimRecord {
    /// Unix seconds
    pub claimed_at: i64,
    pub amount_uusdc: u64,
    pub chain: String,
    pub payout_address: String,
}

/// One page of claim history, most-recent-first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimHistory {
    pub records: Vec<ClaimRecord>,
    pub has_more: bool,
}

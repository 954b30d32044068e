//! Request signing for backend authentication
//!
//! The backend authenticates callers by an EIP-191 personal-sign signature
//! over a canonical request string. The same operator key later signs the
//! on-chain withdrawal, so one credential covers both surfaces.

use anyhow::{Context, Result};
use ethers::signers::{LocalWallet, Signer};

/// Parse a hex private key (with or without 0x prefix) into a wallet
pub fn parse_wallet(private_key: &str) -> Result<LocalWallet> {
    private_key
        .trim_start_matches("0x")
        .parse()
        .context("Invalid private key format")
}

/// Canonical request string the backend expects to be signed
fn request_message(method: &str, path: &str, timestamp: i64, nonce: &str) -> String {
    format!("{} {}\n{}\n{}", method, path, timestamp, nonce)
}

/// EIP-191 personal-sign over the canonical request string
pub async fn sign_request(
    private_key: &str,
    method: &str,
    path: &str,
    timestamp: i64,
    nonce: &str,
) -> Result<String> {
    let wallet = parse_wallet(private_key)?;
    let message = request_message(method, path, timestamp, nonce);

    let signature = wallet
        .sign_message(message.as_bytes())
        .await
        .context("Failed to sign request")?;

    Ok(format!("0x{}", hex::encode(signature.to_vec())))
}

/// Generate a random hex nonce
pub fn random_hex(bytes: usize) -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..bytes).map(|_| rng.gen()).collect();
    hex::encode(random_bytes)
}

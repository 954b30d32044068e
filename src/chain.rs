//! Chain transaction submitter
//!
//! Wraps an ethers signer client scoped to one chain's RPC endpoint. The
//! vault's withdrawal entry point is the only contract surface this tool
//! touches; everything else (gas, nonces, broadcast, receipt polling) is the
//! wallet library's job.

use std::sync::Arc;

use ethers::contract::{abigen, ContractCall};
use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Middleware, Provider};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::{Address, Bytes, TransactionReceipt, U256};

use crate::crypto;
use crate::error::BisonError;
use crate::models::{ChainInfo, ClaimAuthorization};

abigen!(
    FeeVault,
    r#"[
        function withdraw(bytes16 authorizationId, uint256 amount, address payoutAddress, uint256 expiresAt, bytes signature) external
    ]"#
);

pub type VaultClient = SignerMiddleware<Provider<Http>, LocalWallet>;

pub struct ChainSubmitter<M> {
    client: Arc<M>,
    vault_address: Address,
}

impl ChainSubmitter<VaultClient> {
    /// Build a signer client from backend-supplied chain metadata
    pub fn connect(info: &ChainInfo, private_key: &str) -> Result<Self, BisonError> {
        let provider = Provider::<Http>::try_from(info.rpc_url.as_str())
            .map_err(|e| BisonError::ChainSubmission(format!("invalid RPC URL: {}", e)))?;

        let wallet = crypto::parse_wallet(private_key)
            .map_err(|e| BisonError::ChainSubmission(e.to_string()))?
            .with_chain_id(info.chain_id);

        Ok(Self {
            client: Arc::new(SignerMiddleware::new(provider, wallet)),
            vault_address: parse_address(&info.vault_address)?,
        })
    }
}

impl<M: Middleware + 'static> ChainSubmitter<M> {
    /// Refuse to submit against an address with no deployed code. Catches a
    /// misconfigured vault before a doomed transaction leaves the box.
    pub async fn ensure_vault_deployed(&self) -> Result<(), BisonError> {
        let code = self
            .client
            .get_code(self.vault_address, None)
            .await
            .map_err(|e| BisonError::ChainSubmission(e.to_string()))?;

        if code.as_ref().is_empty() {
            return Err(BisonError::NoContractAtAddress(format!(
                "{:?}",
                self.vault_address
            )));
        }

        Ok(())
    }

    /// Prepared withdrawal call. The caller drives send/await so the tx hash
    /// can be reported before the receipt wait.
    pub fn withdraw_call(
        &self,
        auth: &ClaimAuthorization,
        payout: Address,
    ) -> Result<ContractCall<M, ()>, BisonError> {
        let signature = decode_signature(&auth.signature)?;
        let vault = FeeVault::new(self.vault_address, Arc::clone(&self.client));

        Ok(vault.withdraw(
            auth.id.into_bytes(),
            U256::from(auth.amount_uusdc),
            payout,
            U256::from(auth.expires_at.max(0) as u64),
            signature,
        ))
    }
}

pub fn parse_address(addr: &str) -> Result<Address, BisonError> {
    addr.parse()
        .map_err(|e| BisonError::ChainSubmission(format!("invalid address {}: {}", addr, e)))
}

fn decode_signature(sig: &str) -> Result<Bytes, BisonError> {
    let raw = hex::decode(sig.trim_start_matches("0x"))
        .map_err(|e| BisonError::ChainSubmission(format!("invalid authorization signature: {}", e)))?;
    Ok(Bytes::from(raw))
}

/// A mined receipt with a zero status means the vault rejected the call
/// (an expired or replayed authorization lands here).
pub fn confirm_receipt(
    receipt: Option<TransactionReceipt>,
) -> Result<TransactionReceipt, BisonError> {
    let receipt = receipt
        .ok_or_else(|| BisonError::ChainSubmission("transaction dropped from mempool".into()))?;

    if receipt.status == Some(0.into()) {
        return Err(BisonError::ChainSubmission(format!(
            "transaction {:?} reverted",
            receipt.transaction_hash
        )));
    }

    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::providers::MockProvider;
    use uuid::Uuid;

    fn mocked_submitter() -> (ChainSubmitter<Provider<MockProvider>>, MockProvider) {
        let (provider, mock) = Provider::mocked();
        let submitter = ChainSubmitter {
            client: Arc::new(provider),
            vault_address: Address::zero(),
        };
        (submitter, mock)
    }

    #[tokio::test]
    async fn test_empty_code_is_rejected() {
        let (submitter, mock) = mocked_submitter();
        mock.push::<Bytes, _>(Bytes::new()).unwrap();

        let err = submitter.ensure_vault_deployed().await.unwrap_err();
        assert!(matches!(err, BisonError::NoContractAtAddress(_)));
    }

    #[tokio::test]
    async fn test_deployed_code_passes() {
        let (submitter, mock) = mocked_submitter();
        mock.push::<Bytes, _>(Bytes::from(vec![0x60, 0x80])).unwrap();

        assert!(submitter.ensure_vault_deployed().await.is_ok());
    }

    #[test]
    fn test_withdraw_call_encodes_authorization() {
        let (submitter, _mock) = mocked_submitter();
        let auth = ClaimAuthorization {
            id: Uuid::nil(),
            amount_uusdc: 12_500_000,
            chain: "base".to_string(),
            expires_at: 1_700_000_600,
            signer_address: "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf".to_string(),
            signature: "0xdeadbeef".to_string(),
        };

        let call = submitter
            .withdraw_call(&auth, Address::zero())
            .unwrap();
        assert!(call.tx.data().is_some());
    }

    #[test]
    fn test_bad_signature_hex_is_rejected() {
        let (submitter, _mock) = mocked_submitter();
        let auth = ClaimAuthorization {
            id: Uuid::nil(),
            amount_uusdc: 1,
            chain: "base".to_string(),
            expires_at: 0,
            signer_address: String::new(),
            signature: "0xnothex".to_string(),
        };

        assert!(submitter.withdraw_call(&auth, Address::zero()).is_err());
    }

    #[test]
    fn test_reverted_receipt_is_an_error() {
        let receipt = TransactionReceipt {
            status: Some(0.into()),
            ..Default::default()
        };
        assert!(confirm_receipt(Some(receipt)).is_err());
    }

    #[test]
    fn test_dropped_transaction_is_an_error() {
        assert!(confirm_receipt(None).is_err());
    }

    #[test]
    fn test_mined_receipt_passes() {
        let receipt = TransactionReceipt {
            status: Some(1.into()),
            ..Default::default()
        };
        assert!(confirm_receipt(Some(receipt)).is_ok());
    }
}

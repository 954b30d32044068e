//! Account service client
//!
//! Thin interface to the Bison fee-settlement backend. One HTTP round-trip
//! per operation, no retry logic - any failure surfaces as an opaque
//! `BisonError::Backend` and aborts the command.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::config::AppContext;
use crate::crypto;
use crate::error::BisonError;
use crate::models::{AccountInfo, ChainInfo, ClaimAuthorization, ClaimHistory, FeeBalance};

/// The five operations the backend exposes to this tool
#[async_trait]
pub trait SettlementApi {
    async fn account_info(&self) -> Result<AccountInfo, BisonError>;
    async fn fee_balance(&self) -> Result<FeeBalance, BisonError>;
    /// Most-recent-first; `limit` bounds the page size requested
    async fn claim_history(&self, limit: u32) -> Result<ClaimHistory, BisonError>;
    /// Only valid while an unclaimed balance exists; the returned credential
    /// is single-use and expires at `expires_at`
    async fn claim_authorization(&self) -> Result<ClaimAuthorization, BisonError>;
    async fn chain_metadata(&self) -> Result<HashMap<String, ChainInfo>, BisonError>;
}

/// HTTP client for the backend REST API
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    account_id: String,
    private_key: String,
}

impl BackendClient {
    pub fn new(ctx: &AppContext) -> Result<Self, BisonError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| BisonError::Backend(e.to_string()))?;

        Ok(Self {
            http,
            base_url: ctx.network.backend_url().to_string(),
            account_id: ctx.account_id.clone(),
            private_key: ctx.private_key.clone(),
        })
    }

    fn account_path(&self, suffix: &str) -> String {
        format!(
            "/v1/accounts/{}{}",
            urlencoding::encode(&self.account_id),
            suffix
        )
    }

    /// Signed request/response round-trip. The signature covers method, path
    /// (including query), timestamp, and a fresh nonce.
    async fn request<T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
    ) -> Result<T, BisonError> {
        let timestamp = chrono::Utc::now().timestamp();
        let nonce = crypto::random_hex(16);
        let signature =
            crypto::sign_request(&self.private_key, method.as_str(), path, timestamp, &nonce)
                .await
                .map_err(|e| BisonError::Backend(e.to_string()))?;

        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "backend request");

        let response = self
            .http
            .request(method, &url)
            .header("x-bison-account", &self.account_id)
            .header("x-bison-timestamp", timestamp.to_string())
            .header("x-bison-nonce", nonce)
            .header("x-bison-signature", signature)
            .send()
            .await
            .map_err(|e| BisonError::Backend(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BisonError::Backend(error_detail(status, &body)));
        }

        response
            .json()
            .await
            .map_err(|e| BisonError::Backend(e.to_string()))
    }
}

/// Prefer the backend's `{"error": "..."}` envelope, fall back to the raw
/// body, then to the status line
fn error_detail(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
            return message.to_string();
        }
    }

    if body.trim().is_empty() {
        status.to_string()
    } else {
        body.to_string()
    }
}

#[async_trait]
impl SettlementApi for BackendClient {
    async fn account_info(&self) -> Result<AccountInfo, BisonError> {
        self.request(reqwest::Method::GET, &self.account_path(""))
            .await
    }

    async fn fee_balance(&self) -> Result<FeeBalance, BisonError> {
        self.request(reqwest::Method::GET, &self.account_path("/fees"))
            .await
    }

    async fn claim_history(&self, limit: u32) -> Result<ClaimHistory, BisonError> {
        let path = self.account_path(&format!("/claims?limit={}", limit));
        self.request(reqwest::Method::GET, &path).await
    }

    async fn claim_authorization(&self) -> Result<ClaimAuthorization, BisonError> {
        let path = self.account_path("/claim-authorizations");
        self.request(reqwest::Method::POST, &path).await
    }

    async fn chain_metadata(&self) -> Result<HashMap<String, ChainInfo>, BisonError> {
        self.request(reqwest::Method::GET, "/v1/chains").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Network;

    fn client() -> BackendClient {
        let ctx = AppContext {
            network: Network::Testnet,
            private_key: "11".repeat(32),
            account_id: "acct/team 1".to_string(),
        };
        BackendClient::new(&ctx).unwrap()
    }

    #[test]
    fn test_account_path_encodes_id() {
        let path = client().account_path("/fees");
        assert_eq!(path, "/v1/accounts/acct%2Fteam%201/fees");
    }

    #[test]
    fn test_error_detail_unwraps_envelope() {
        let status = reqwest::StatusCode::FORBIDDEN;

        assert_eq!(
            error_detail(status, r#"{"error": "account suspended"}"#),
            "account suspended"
        );
        assert_eq!(error_detail(status, "plain text"), "plain text");
        assert_eq!(error_detail(status, ""), "403 Forbidden");
    }
}

//! Operating context for a single invocation
//!
//! Built once from environment variables and command flags, then passed by
//! reference into every command handler. Never persisted; credentials are
//! validated before any network call is attempted.

use crate::error::BisonError;

pub const ENV_PRIVATE_KEY: &str = "BISON_PRIVATE_KEY";
pub const ENV_ACCOUNT_ID: &str = "BISON_ACCOUNT_ID";
pub const ENV_NETWORK: &str = "BISON_NETWORK";
pub const ENV_LOCAL_ENV: &str = "BISON_LOCAL_ENV";

const TESTNET_API: &str = "https://api.testnet.bison.exchange";
const MAINNET_API: &str = "https://api.bison.exchange";

/// Known networks. `Local` only exists when `BISON_LOCAL_ENV` supplies a
/// backend URL for development.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Network {
    Testnet,
    Mainnet,
    Local(String),
}

impl Network {
    pub fn name(&self) -> &str {
        match self {
            Network::Testnet => "testnet",
            Network::Mainnet => "mainnet",
            Network::Local(_) => "local",
        }
    }

    /// Base URL of the fee-settlement backend for this network
    pub fn backend_url(&self) -> &str {
        match self {
            Network::Testnet => TESTNET_API,
            Network::Mainnet => MAINNET_API,
            Network::Local(url) => url,
        }
    }
}

/// Everything a command needs to operate, immutable after construction
#[derive(Debug, Clone)]
pub struct AppContext {
    pub network: Network,
    pub private_key: String,
    pub account_id: String,
}

impl AppContext {
    /// Resolve from process environment plus the parsed `--network` flag.
    /// Fails before any I/O if credentials or the network name are bad.
    pub fn resolve(network_flag: Option<String>) -> Result<Self, BisonError> {
        let env_network = env_nonempty(ENV_NETWORK);
        let local_env = env_nonempty(ENV_LOCAL_ENV);

        let network = resolve_network(
            network_flag.as_deref(),
            env_network.as_deref(),
            local_env.as_deref(),
        )?;

        let private_key =
            env_nonempty(ENV_PRIVATE_KEY).ok_or(BisonError::MissingCredential(ENV_PRIVATE_KEY))?;
        let account_id =
            env_nonempty(ENV_ACCOUNT_ID).ok_or(BisonError::MissingCredential(ENV_ACCOUNT_ID))?;

        Ok(Self {
            network,
            private_key,
            account_id,
        })
    }
}

fn env_nonempty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Network precedence: explicit flag > BISON_NETWORK > default testnet
pub fn resolve_network(
    flag: Option<&str>,
    env_network: Option<&str>,
    local_env: Option<&str>,
) -> Result<Network, BisonError> {
    let name = flag.or(env_network).unwrap_or("testnet");

    match (name.to_lowercase().as_str(), local_env) {
        ("testnet", _) => Ok(Network::Testnet),
        ("mainnet", _) => Ok(Network::Mainnet),
        ("local", Some(url)) => Ok(Network::Local(url.to_string())),
        (other, local) => Err(BisonError::InvalidNetwork(
            other.to_string(),
            known_networks(local.is_some()),
        )),
    }
}

fn known_networks(local_available: bool) -> String {
    if local_available {
        "testnet, mainnet, local".to_string()
    } else {
        "testnet, mainnet".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_testnet() {
        let network = resolve_network(None, None, None).unwrap();
        assert_eq!(network, Network::Testnet);
    }

    #[test]
    fn test_flag_beats_env() {
        let network = resolve_network(Some("mainnet"), Some("testnet"), None).unwrap();
        assert_eq!(network, Network::Mainnet);
    }

    #[test]
    fn test_env_used_without_flag() {
        let network = resolve_network(None, Some("mainnet"), None).unwrap();
        assert_eq!(network, Network::Mainnet);
    }

    #[test]
    fn test_name_is_case_insensitive() {
        let network = resolve_network(Some("MainNet"), None, None).unwrap();
        assert_eq!(network, Network::Mainnet);
    }

    #[test]
    fn test_unknown_network_rejected() {
        let err = resolve_network(Some("devnet"), None, None).unwrap_err();
        assert!(matches!(err, BisonError::InvalidNetwork(name, _) if name == "devnet"));
    }

    // Single test for the env-reading path so parallel tests never race on
    // process environment
    #[test]
    fn test_resolve_requires_both_credentials() {
        for var in [ENV_PRIVATE_KEY, ENV_ACCOUNT_ID, ENV_NETWORK, ENV_LOCAL_ENV] {
            std::env::remove_var(var);
        }

        let err = AppContext::resolve(None).unwrap_err();
        assert!(err.to_string().contains(ENV_PRIVATE_KEY));

        std::env::set_var(ENV_PRIVATE_KEY, "0xabc123");
        let err = AppContext::resolve(None).unwrap_err();
        assert!(err.to_string().contains(ENV_ACCOUNT_ID));

        std::env::set_var(ENV_ACCOUNT_ID, "a-1");
        let ctx = AppContext::resolve(None).unwrap();
        assert_eq!(ctx.network, Network::Testnet);
        assert_eq!(ctx.account_id, "a-1");

        std::env::remove_var(ENV_PRIVATE_KEY);
        std::env::remove_var(ENV_ACCOUNT_ID);
    }

    #[test]
    fn test_local_requires_injection() {
        assert!(resolve_network(Some("local"), None, None).is_err());

        let network =
            resolve_network(Some("local"), None, Some("http://localhost:9021")).unwrap();
        assert_eq!(network.backend_url(), "http://localhost:9021");
    }
}

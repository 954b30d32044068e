//! Error taxonomy for the Bison CLI
//!
//! Every variant is terminal for the current invocation: it is reported once
//! on stderr and the process exits non-zero. "No unclaimed funds" and a
//! declined confirmation are not errors and never pass through here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BisonError {
    /// A required environment variable is missing.
    #[error("missing credential: {0} is not set")]
    MissingCredential(&'static str),

    /// The resolved network name is not in the known set.
    #[error("invalid network '{0}' (expected: {1})")]
    InvalidNetwork(String, String),

    /// Opaque pass-through of an account-service failure.
    #[error("backend error: {0}")]
    Backend(String),

    /// The configured vault address has no deployed code.
    #[error("no contract code at vault address {0}")]
    NoContractAtAddress(String),

    /// Signing, broadcast, or confirmation failure from the chain client.
    #[error("chain submission failed: {0}")]
    ChainSubmission(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_names_the_variable() {
        let err = BisonError::MissingCredential("BISON_PRIVATE_KEY");
        assert_eq!(
            err.to_string(),
            "missing credential: BISON_PRIVATE_KEY is not set"
        );
    }
}

//! Error types for genesis generation

use shared_crypto::CryptoError;
use thiserror::Error;

/// Result type alias for genesis operations
pub type Result<T> = std::result::Result<T, GenesisError>;

/// Errors that can occur while generating the genesis block
///
/// Every variant aborts the run: nothing is persisted mid-pipeline, so there
/// is no partial result to roll back.
#[derive(Debug, Error)]
pub enum GenesisError {
    /// The entropy source could not produce randomness
    #[error("Entropy failure: {0}")]
    Entropy(String),

    /// The ECDSA signer rejected the digest/key pair
    #[error("Signing failure: {0}")]
    Signing(String),

    /// A numeric or structural invariant does not hold
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Any other key, address or mnemonic failure
    #[error("Crypto error: {0}")]
    Crypto(CryptoError),

    /// A generated artifact failed re-validation
    #[error("Verification failed: {0}")]
    Verification(String),
}

impl From<CryptoError> for GenesisError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::EntropyUnavailable(reason) => Self::Entropy(reason),
            CryptoError::SigningFailed(reason) => Self::Signing(reason),
            other => Self::Crypto(other),
        }
    }
}

impl GenesisError {
    /// Check if error stems from operator input rather than the environment
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidConfig(_) | Self::InvariantViolation(_))
    }
}

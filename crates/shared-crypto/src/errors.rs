//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Signature verification failed
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// Invalid public key
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Invalid private key
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Invalid signature
    #[error("Invalid signature")]
    InvalidSignature,

    /// The signer rejected the digest/key pair
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// Malformed or foreign address
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Mnemonic could not be built or parsed
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    /// The entropy source could not produce randomness
    #[error("Entropy unavailable: {0}")]
    EntropyUnavailable(String),
}

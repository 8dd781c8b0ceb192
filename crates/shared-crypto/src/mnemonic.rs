//! # BIP-39 Mnemonics
//!
//! Entropy is drawn from whatever `RngCore` the caller hands in, so production
//! code passes `OsRng` and test harnesses pass a seeded generator.

use bip39::Mnemonic;
use rand::RngCore;

use crate::CryptoError;

/// 128 bits of entropy, i.e. a 12-word English mnemonic.
pub const MNEMONIC_ENTROPY_BYTES: usize = 16;

/// Generate a fresh 12-word English mnemonic from `rng`.
pub fn generate_mnemonic<R: RngCore + ?Sized>(rng: &mut R) -> Result<String, CryptoError> {
    let mut entropy = [0u8; MNEMONIC_ENTROPY_BYTES];
    rng.try_fill_bytes(&mut entropy)
        .map_err(|e| CryptoError::EntropyUnavailable(e.to_string()))?;

    let mnemonic = Mnemonic::from_entropy(&entropy)
        .map_err(|e| CryptoError::InvalidMnemonic(e.to_string()))?;
    entropy.fill(0);

    Ok(mnemonic.to_string())
}

/// Check that `phrase` is a well-formed English BIP-39 mnemonic.
pub fn validate_mnemonic(phrase: &str) -> Result<(), CryptoError> {
    Mnemonic::parse(phrase)
        .map(|_| ())
        .map_err(|e| CryptoError::InvalidMnemonic(e.to_string()))
}

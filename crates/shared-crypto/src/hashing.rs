//! # Hashing
//!
//! SHA-256 for ids, payload hashes and signing digests. RIPEMD-160 over the
//! compressed public key forms the address body.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// SHA-256 hash output (256-bit).
pub type Hash = [u8; 32];

/// Compute SHA-256 hash of data.
#[inline]
pub fn sha256(data: &[u8]) -> Hash {
    Sha256::digest(data).into()
}

/// Compute double SHA-256 (base58check checksums).
#[inline]
pub fn sha256d(data: &[u8]) -> Hash {
    sha256(&sha256(data))
}

/// RIPEMD-160 of the input, used as the address body.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(data).into()
}

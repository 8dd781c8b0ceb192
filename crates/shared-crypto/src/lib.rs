//! # Shared Crypto - Identity & Signing Primitives
//!
//! **Status:** Genesis tooling
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-256, RIPEMD-160 | Ids, payload hashes, address hashing |
//! | `ecdsa` | secp256k1 | Transaction and block signing |
//! | `address` | base58check | Network-prefixed wallet addresses |
//! | `mnemonic` | BIP-39 | Founding identity passphrases |
//!
//! ## Security Properties
//!
//! - **secp256k1**: RFC 6979 deterministic nonces, low-S normalized output
//! - **Prehash signing**: callers hash once, the digest is what gets signed
//! - **Entropy**: mnemonic entropy comes from a caller-supplied `RngCore`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod address;
pub mod ecdsa;
pub mod errors;
pub mod hashing;
pub mod mnemonic;

// Re-exports
pub use address::{decode_address, encode_address, ADDRESS_PAYLOAD_LEN};
pub use ecdsa::{Secp256k1KeyPair, Secp256k1PublicKey, Secp256k1Signature};
pub use errors::CryptoError;
pub use hashing::{hash160, sha256, sha256d, Hash};
pub use mnemonic::{generate_mnemonic, validate_mnemonic, MNEMONIC_ENTROPY_BYTES};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

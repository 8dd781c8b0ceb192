//! # Addresses
//!
//! `base58check(version || ripemd160(compressed_pubkey))`, where the checksum is
//! the first four bytes of `sha256(sha256(payload))`. The version byte is the
//! network's `pub_key_hash`, so an address is only valid on one network.

use crate::ecdsa::Secp256k1PublicKey;
use crate::hashing::{hash160, sha256d};
use crate::CryptoError;

/// Decoded address payload length: version byte plus 20-byte hash.
pub const ADDRESS_PAYLOAD_LEN: usize = 21;

const CHECKSUM_LEN: usize = 4;

fn checksum4(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = sha256d(payload);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}

/// Encode the address of `public_key` for the network identified by `version`.
pub fn encode_address(version: u8, public_key: &Secp256k1PublicKey) -> String {
    let mut payload = Vec::with_capacity(ADDRESS_PAYLOAD_LEN + CHECKSUM_LEN);
    payload.push(version);
    payload.extend_from_slice(&hash160(public_key.as_bytes()));
    let checksum = checksum4(&payload);
    payload.extend_from_slice(&checksum);
    bs58::encode(payload).into_string()
}

/// Decode an address into its 21-byte payload, checking the checksum.
///
/// When `expected_version` is given the version byte must match it.
pub fn decode_address(
    address: &str,
    expected_version: Option<u8>,
) -> Result<[u8; ADDRESS_PAYLOAD_LEN], CryptoError> {
    let bytes = bs58::decode(address)
        .into_vec()
        .map_err(|e| CryptoError::InvalidAddress(e.to_string()))?;

    if bytes.len() != ADDRESS_PAYLOAD_LEN + CHECKSUM_LEN {
        return Err(CryptoError::InvalidAddress(format!(
            "expected {} bytes, got {}",
            ADDRESS_PAYLOAD_LEN + CHECKSUM_LEN,
            bytes.len()
        )));
    }

    let (payload, checksum) = bytes.split_at(ADDRESS_PAYLOAD_LEN);
    if checksum4(payload) != checksum {
        return Err(CryptoError::InvalidAddress("checksum mismatch".to_string()));
    }

    if let Some(version) = expected_version {
        if payload[0] != version {
            return Err(CryptoError::InvalidAddress(format!(
                "version byte {:#04x}, expected {:#04x}",
                payload[0], version
            )));
        }
    }

    let mut out = [0u8; ADDRESS_PAYLOAD_LEN];
    out.copy_from_slice(payload);
    Ok(out)
}

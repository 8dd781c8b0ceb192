//! Transaction drafts and byte serialization
//!
//! A [`TransactionDraft`] is an unsigned transaction as a wallet would build
//! it for the live network: provisional fee and timestamp, no signature, no
//! id. The formatter turns a draft into a signed genesis [`Transaction`].
//!
//! ## Byte Layout (little-endian)
//!
//! | field | bytes |
//! |-------|-------|
//! | type | 1 |
//! | timestamp | 4 |
//! | sender public key | 33 |
//! | recipient | 21, zero-filled when absent |
//! | vendor field | 64, zero-filled |
//! | amount | 8 |
//! | fee | 8 |
//! | asset | username bytes (registrations only) |
//! | signature | 64, signed form only |

use chrono::{DateTime, Utc};
use shared_crypto::{decode_address, sha256, ADDRESS_PAYLOAD_LEN};
use shared_types::{
    CompressedPublicKey, DelegateAsset, Transaction, TransactionAsset, TransactionType,
};

use super::identity::Identity;
use crate::config::NetworkConfig;
use crate::error::{GenesisError, Result};

/// Zero-filled vendor field width.
pub const VENDOR_FIELD_LEN: usize = 64;

/// Longest accepted delegate username, in bytes.
pub const MAX_USERNAME_LEN: usize = 20;

/// An unsigned transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    /// Transaction kind
    pub tx_type: TransactionType,
    /// Amount in minor units
    pub amount: u64,
    /// Provisional fee
    pub fee: u64,
    /// Provisional timestamp (seconds since epoch)
    pub timestamp: u32,
    /// Signer public key
    pub sender_public_key: CompressedPublicKey,
    /// Recipient, transfers only
    pub recipient_id: Option<String>,
    /// Type-specific payload
    pub asset: Option<TransactionAsset>,
}

impl TransactionDraft {
    /// Bytes the signature is computed over.
    pub fn unsigned_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(body_capacity(self.asset.as_ref()));
        write_body(
            &mut out,
            self.tx_type,
            self.timestamp,
            &self.sender_public_key,
            self.recipient_id.as_deref(),
            self.amount,
            self.fee,
            self.asset.as_ref(),
        )?;
        Ok(out)
    }
}

/// Builds drafts with the network's provisional fee and timestamp.
pub struct DraftBuilder<'a> {
    network: &'a NetworkConfig,
    now: DateTime<Utc>,
}

impl<'a> DraftBuilder<'a> {
    /// Builder stamping drafts with the current time.
    pub fn new(network: &'a NetworkConfig) -> Self {
        Self::at(network, Utc::now())
    }

    /// Builder stamping drafts with a fixed time.
    pub fn at(network: &'a NetworkConfig, now: DateTime<Utc>) -> Self {
        Self { network, now }
    }

    /// Transfer of `amount` from `sender` to `recipient_id`.
    pub fn transfer(
        &self,
        sender: &Identity,
        recipient_id: &str,
        amount: u64,
    ) -> Result<TransactionDraft> {
        decode_address(recipient_id, Some(self.network.pub_key_hash))?;

        self.priced(TransactionDraft {
            tx_type: TransactionType::Transfer,
            amount,
            fee: 0,
            timestamp: self.network.epoch_seconds(self.now),
            sender_public_key: *sender.public_key().as_bytes(),
            recipient_id: Some(recipient_id.to_string()),
            asset: None,
        })
    }

    /// Delegate registration of `sender` under its username.
    pub fn delegate_registration(&self, sender: &Identity) -> Result<TransactionDraft> {
        let username = sender.username().ok_or_else(|| {
            GenesisError::InvariantViolation(format!(
                "identity {} has no delegate username",
                sender.address()
            ))
        })?;

        if username.is_empty() || username.len() > MAX_USERNAME_LEN {
            return Err(GenesisError::InvariantViolation(format!(
                "delegate username '{username}' must be 1..={MAX_USERNAME_LEN} bytes"
            )));
        }

        self.priced(TransactionDraft {
            tx_type: TransactionType::DelegateRegistration,
            amount: 0,
            fee: 0,
            timestamp: self.network.epoch_seconds(self.now),
            sender_public_key: *sender.public_key().as_bytes(),
            recipient_id: None,
            asset: Some(TransactionAsset {
                delegate: DelegateAsset {
                    username: username.to_string(),
                },
            }),
        })
    }

    fn priced(&self, mut draft: TransactionDraft) -> Result<TransactionDraft> {
        let len = draft.unsigned_bytes()?.len();
        draft.fee = self.network.fees.fee_for(draft.tx_type, len);
        Ok(draft)
    }
}

/// Serialize a transaction, optionally with its signature appended.
pub fn transaction_bytes(tx: &Transaction, include_signature: bool) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(body_capacity(tx.asset.as_ref()) + tx.signature.len());
    write_body(
        &mut out,
        tx.tx_type,
        tx.timestamp,
        &tx.sender_public_key,
        tx.recipient_id.as_deref(),
        tx.amount,
        tx.fee,
        tx.asset.as_ref(),
    )?;
    if include_signature {
        out.extend_from_slice(&tx.signature);
    }
    Ok(out)
}

/// Transaction id: lowercase hex SHA-256 of the signed bytes.
pub fn transaction_id(signed_bytes: &[u8]) -> String {
    hex::encode(sha256(signed_bytes))
}

fn body_capacity(asset: Option<&TransactionAsset>) -> usize {
    let asset_len = asset.map_or(0, |a| a.delegate.username.len());
    1 + 4 + 33 + ADDRESS_PAYLOAD_LEN + VENDOR_FIELD_LEN + 8 + 8 + asset_len
}

#[allow(clippy::too_many_arguments)]
fn write_body(
    out: &mut Vec<u8>,
    tx_type: TransactionType,
    timestamp: u32,
    sender_public_key: &CompressedPublicKey,
    recipient_id: Option<&str>,
    amount: u64,
    fee: u64,
    asset: Option<&TransactionAsset>,
) -> Result<()> {
    out.push(tx_type.as_byte());
    out.extend_from_slice(&timestamp.to_le_bytes());
    out.extend_from_slice(sender_public_key);

    match recipient_id {
        Some(address) => out.extend_from_slice(&decode_address(address, None)?),
        None => out.extend_from_slice(&[0u8; ADDRESS_PAYLOAD_LEN]),
    }

    out.extend_from_slice(&[0u8; VENDOR_FIELD_LEN]);
    out.extend_from_slice(&amount.to_le_bytes());
    out.extend_from_slice(&fee.to_le_bytes());

    if let Some(asset) = asset {
        out.extend_from_slice(asset.delegate.username.as_bytes());
    }

    Ok(())
}

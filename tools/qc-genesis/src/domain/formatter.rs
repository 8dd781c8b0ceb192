//! Genesis transaction finalization
//!
//! Genesis transactions pay no fee and carry timestamp 0. Those overrides
//! change the signed bytes, so they are applied to the draft *before* the one
//! and only signature is computed.

use shared_crypto::sha256;
use shared_types::Transaction;

use super::identity::Identity;
use super::transaction::{transaction_bytes, transaction_id, TransactionDraft};
use crate::error::{GenesisError, Result};

/// Field values forced onto every genesis transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenesisOverrides {
    /// Always 0
    pub fee: u64,
    /// Always 0
    pub timestamp: u32,
    /// Address of the signing wallet
    pub sender_address: String,
}

impl GenesisOverrides {
    /// Overrides for transactions signed by `wallet`.
    pub fn for_sender(wallet: &Identity) -> Self {
        Self {
            fee: 0,
            timestamp: 0,
            sender_address: wallet.address().to_string(),
        }
    }
}

/// Apply `overrides` to `draft`, sign with `signer`, and derive the id.
pub fn finalize(
    draft: TransactionDraft,
    overrides: &GenesisOverrides,
    signer: &Identity,
) -> Result<Transaction> {
    if draft.sender_public_key != *signer.public_key().as_bytes() {
        return Err(GenesisError::InvariantViolation(format!(
            "draft sender key does not belong to {}",
            signer.address()
        )));
    }

    let mut tx = Transaction {
        tx_type: draft.tx_type,
        amount: draft.amount,
        fee: overrides.fee,
        timestamp: overrides.timestamp,
        sender_address: overrides.sender_address.clone(),
        sender_public_key: draft.sender_public_key,
        recipient_id: draft.recipient_id,
        asset: draft.asset,
        signature: Vec::new(),
        id: String::new(),
    };

    let digest = sha256(&transaction_bytes(&tx, false)?);
    tx.signature = signer.keypair().sign_digest(&digest)?.as_bytes().to_vec();
    tx.id = transaction_id(&transaction_bytes(&tx, true)?);

    Ok(tx)
}

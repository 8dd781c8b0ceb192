//! Re-validation of generated artifacts
//!
//! Mirrors what a node does when it loads the genesis document: recompute
//! every derived field from the raw data and check the signatures.

use shared_crypto::{sha256, Secp256k1PublicKey, Secp256k1Signature};
use shared_types::{Block, Transaction, GENESIS_HEIGHT, GENESIS_VERSION};

use super::assembler::summarize_payload;
use super::encoder::{derive_block_id, encode_block};
use super::transaction::{transaction_bytes, transaction_id};
use crate::error::{GenesisError, Result};

fn fail(reason: impl Into<String>) -> GenesisError {
    GenesisError::Verification(reason.into())
}

/// Check a transaction's signature and id.
pub fn verify_transaction(tx: &Transaction) -> Result<()> {
    let public_key = Secp256k1PublicKey::from_bytes(tx.sender_public_key)?;
    let signature = Secp256k1Signature::from_slice(&tx.signature)?;

    let digest = sha256(&transaction_bytes(tx, false)?);
    public_key
        .verify_digest(&digest, &signature)
        .map_err(|e| fail(format!("transaction {}: {e}", tx.id)))?;

    let expected = transaction_id(&transaction_bytes(tx, true)?);
    if expected != tx.id {
        return Err(fail(format!("transaction id {} should be {expected}", tx.id)));
    }

    Ok(())
}

/// Check a genesis block: header constants, canonical order, payload
/// aggregates, id, and generator signature.
pub fn verify_block(block: &Block) -> Result<()> {
    let header = &block.header;

    if header.version != GENESIS_VERSION
        || header.height != GENESIS_HEIGHT
        || header.previous_block.is_some()
    {
        return Err(fail("not a genesis header"));
    }
    if header.reward != 0 {
        return Err(fail(format!("genesis reward must be 0, got {}", header.reward)));
    }

    if let Some(pair) = block
        .transactions
        .windows(2)
        .find(|pair| (pair[0].tx_type, pair[0].amount) > (pair[1].tx_type, pair[1].amount))
    {
        return Err(fail(format!(
            "transaction {} is out of canonical order after {}",
            pair[1].id, pair[0].id
        )));
    }

    for tx in &block.transactions {
        verify_transaction(tx)?;
        if tx.fee != 0 || tx.timestamp != 0 {
            return Err(fail(format!("transaction {} is not genesis-formatted", tx.id)));
        }
    }

    let summary = summarize_payload(&block.transactions)?;
    if summary.number_of_transactions != header.number_of_transactions
        || summary.total_amount != header.total_amount
        || summary.total_fee != header.total_fee
        || summary.payload_length != header.payload_length
        || summary.payload_hash != header.payload_hash
    {
        return Err(fail("payload does not match header"));
    }

    let digest = sha256(&encode_block(header, None));
    let expected = derive_block_id(&digest);
    if expected != block.id {
        return Err(fail(format!("block id {} should be {expected}", block.id)));
    }

    let signature = block
        .block_signature
        .map(Secp256k1Signature::from_bytes)
        .ok_or_else(|| fail("block is unsigned"))?;
    Secp256k1PublicKey::from_bytes(header.generator_public_key)?
        .verify_digest(&digest, &signature)
        .map_err(|e| fail(format!("block signature: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetworkConfig;
    use crate::domain::assembler::assemble;
    use crate::domain::transaction_set::build_transactions;
    use crate::domain::{build_delegates, DraftBuilder, Identity, IdentityFactory};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use shared_types::TransactionType;

    fn genesis_block() -> (Block, Identity) {
        let network = NetworkConfig::devnet();
        let mut factory = IdentityFactory::new(network.pub_key_hash, StdRng::seed_from_u64(5));
        let genesis = factory.create_identity().unwrap();
        let premine = factory.create_identity().unwrap();
        let delegates = build_delegates(&mut factory, 2).unwrap();
        let txs = build_transactions(
            &DraftBuilder::new(&network),
            &delegates,
            &premine,
            &genesis,
            250,
        )
        .unwrap();
        (assemble(txs, &genesis, 0).unwrap(), genesis)
    }

    fn block() -> Block {
        genesis_block().0
    }

    /// Recompute the payload summary, id and signature so that only the
    /// deliberately altered field is wrong.
    fn reseal(block: &mut Block, generator: &Identity) {
        let summary = summarize_payload(&block.transactions).unwrap();
        block.header.number_of_transactions = summary.number_of_transactions;
        block.header.total_amount = summary.total_amount;
        block.header.total_fee = summary.total_fee;
        block.header.payload_length = summary.payload_length;
        block.header.payload_hash = summary.payload_hash;

        let digest = sha256(&encode_block(&block.header, None));
        block.id = derive_block_id(&digest);
        let signature = generator.keypair().sign_digest(&digest).unwrap();
        block.block_signature = Some(signature.into_bytes());
    }

    #[test]
    fn test_generated_block_verifies() {
        assert!(verify_block(&block()).is_ok());
    }

    #[test]
    fn test_resealed_block_still_verifies() {
        let (mut block, genesis) = genesis_block();
        reseal(&mut block, &genesis);
        assert!(verify_block(&block).is_ok());
    }

    #[test]
    fn test_build_order_rejected() {
        let (mut block, genesis) = genesis_block();
        // registrations first, as built, instead of the canonical order
        block.transactions.rotate_left(1);
        reseal(&mut block, &genesis);

        assert_eq!(block.transactions[0].tx_type, TransactionType::DelegateRegistration);
        assert!(matches!(
            verify_block(&block),
            Err(GenesisError::Verification(_))
        ));
    }

    #[test]
    fn test_wrong_version_rejected() {
        let (mut block, genesis) = genesis_block();
        block.header.version = 1;
        reseal(&mut block, &genesis);

        assert!(matches!(
            verify_block(&block),
            Err(GenesisError::Verification(_))
        ));
    }

    #[test]
    fn test_nonzero_reward_rejected() {
        let (mut block, genesis) = genesis_block();
        block.header.reward = 5;
        reseal(&mut block, &genesis);

        assert!(matches!(
            verify_block(&block),
            Err(GenesisError::Verification(_))
        ));
    }

    #[test]
    fn test_tampered_amount_rejected() {
        let mut block = block();
        block.transactions[0].amount += 1;
        assert!(matches!(
            verify_block(&block),
            Err(GenesisError::Verification(_))
        ));
    }

    #[test]
    fn test_tampered_header_rejected() {
        let mut block = block();
        block.header.timestamp = 1;
        assert!(verify_block(&block).is_err());
    }

    #[test]
    fn test_unsigned_block_rejected() {
        let mut block = block();
        block.block_signature = None;
        assert!(verify_block(&block).is_err());
    }

    #[test]
    fn test_tampered_transaction_id_rejected() {
        let mut block = block();
        block.transactions[1].id = "00".repeat(32);
        assert!(verify_transaction(&block.transactions[1]).is_err());
    }
}

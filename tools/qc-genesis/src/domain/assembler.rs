//! Genesis block assembly
//!
//! ## Steps
//!
//! 1. Canonical sort: `(type, amount)` ascending, stable on ties
//! 2. Totals, payload length and payload hash over the sorted bytes
//! 3. Header: version 0, height 1, no predecessor, reward 0
//! 4. Id from the unsigned header encoding
//! 5. Generator signature over the same unsigned digest
//!
//! The block leaves this module signed; there is no unsigned public state.

use sha2::{Digest, Sha256};
use shared_types::{Block, BlockHeader, Transaction, GENESIS_HEIGHT, GENESIS_VERSION};
use tracing::info;

use super::encoder::{derive_block_id, encode_block};
use super::identity::Identity;
use super::transaction::transaction_bytes;
use crate::error::{GenesisError, Result};

/// Sort into canonical block order: type first, then amount.
///
/// `sort_by_key` is stable, so equal keys keep their relative order and
/// repeated runs over the same input agree.
pub fn sort_canonical(transactions: &mut [Transaction]) {
    transactions.sort_by_key(|tx| (tx.tx_type, tx.amount));
}

/// Aggregates over a sorted payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadSummary {
    /// Number of transactions
    pub number_of_transactions: u32,
    /// Sum of amounts
    pub total_amount: u64,
    /// Sum of fees
    pub total_fee: u64,
    /// Sum of signed byte lengths
    pub payload_length: u32,
    /// SHA-256 of the concatenated signed bytes
    pub payload_hash: [u8; 32],
}

/// Summarize `transactions` in the order given.
pub fn summarize_payload(transactions: &[Transaction]) -> Result<PayloadSummary> {
    let mut hasher = Sha256::new();
    let mut total_amount: u64 = 0;
    let mut total_fee: u64 = 0;
    let mut payload_length: usize = 0;

    for tx in transactions {
        let bytes = transaction_bytes(tx, true)?;
        hasher.update(&bytes);
        payload_length += bytes.len();

        total_amount = total_amount.checked_add(tx.amount).ok_or_else(|| {
            GenesisError::InvariantViolation("total amount overflows u64".to_string())
        })?;
        total_fee = total_fee.checked_add(tx.fee).ok_or_else(|| {
            GenesisError::InvariantViolation("total fee overflows u64".to_string())
        })?;
    }

    Ok(PayloadSummary {
        number_of_transactions: to_u32(transactions.len(), "transaction count")?,
        total_amount,
        total_fee,
        payload_length: to_u32(payload_length, "payload length")?,
        payload_hash: hasher.finalize().into(),
    })
}

/// Assemble and sign the genesis block.
pub fn assemble(
    mut transactions: Vec<Transaction>,
    generator: &Identity,
    timestamp: u32,
) -> Result<Block> {
    sort_canonical(&mut transactions);
    let summary = summarize_payload(&transactions)?;

    let header = BlockHeader {
        version: GENESIS_VERSION,
        timestamp,
        height: GENESIS_HEIGHT,
        previous_block: None,
        number_of_transactions: summary.number_of_transactions,
        total_amount: summary.total_amount,
        total_fee: summary.total_fee,
        reward: 0,
        payload_length: summary.payload_length,
        payload_hash: summary.payload_hash,
        generator_public_key: *generator.public_key().as_bytes(),
    };

    let digest = shared_crypto::sha256(&encode_block(&header, None));
    let id = derive_block_id(&digest);
    let signature = generator.keypair().sign_digest(&digest)?;

    info!(
        %id,
        transactions = header.number_of_transactions,
        total_amount = header.total_amount,
        payload_length = header.payload_length,
        "Assembled genesis block"
    );

    Ok(Block {
        header,
        transactions,
        id,
        block_signature: Some(signature.into_bytes()),
    })
}

fn to_u32(value: usize, what: &str) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| GenesisError::InvariantViolation(format!("{what} {value} exceeds u32")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetworkConfig;
    use crate::domain::encoder::encode;
    use crate::domain::transaction_set::build_transactions;
    use crate::domain::{delegates::build_delegates, identity::IdentityFactory, DraftBuilder};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use shared_crypto::{sha256, Secp256k1Signature};
    use shared_types::TransactionType;

    struct Fixture {
        genesis: Identity,
        transactions: Vec<Transaction>,
    }

    fn fixture(forgers: u32, premine: u64) -> Fixture {
        let network = NetworkConfig::devnet();
        let mut factory = IdentityFactory::new(network.pub_key_hash, StdRng::seed_from_u64(21));
        let genesis = factory.create_identity().unwrap();
        let premine_wallet = factory.create_identity().unwrap();
        let delegates = build_delegates(&mut factory, forgers).unwrap();
        let transactions = build_transactions(
            &DraftBuilder::new(&network),
            &delegates,
            &premine_wallet,
            &genesis,
            premine,
        )
        .unwrap();
        Fixture {
            genesis,
            transactions,
        }
    }

    fn stub(tx_type: TransactionType, amount: u64, id: &str) -> Transaction {
        Transaction {
            tx_type,
            amount,
            fee: 0,
            timestamp: 0,
            sender_address: String::new(),
            sender_public_key: [0x02; 33],
            recipient_id: None,
            asset: None,
            signature: vec![],
            id: id.to_string(),
        }
    }

    #[test]
    fn test_canonical_order() {
        let mut txs = vec![
            stub(TransactionType::DelegateRegistration, 0, "a"),
            stub(TransactionType::Transfer, 50, "b"),
            stub(TransactionType::Transfer, 5, "c"),
            stub(TransactionType::DelegateRegistration, 0, "d"),
        ];
        sort_canonical(&mut txs);

        let ids: Vec<_> = txs.iter().map(|tx| tx.id.as_str()).collect();
        assert_eq!(ids, ["c", "b", "a", "d"]);
    }

    #[test]
    fn test_block_header_fields() {
        let f = fixture(2, 1_000);
        let block = assemble(f.transactions, &f.genesis, 0).unwrap();

        assert_eq!(block.header.version, 0);
        assert_eq!(block.header.height, 1);
        assert_eq!(block.header.previous_block, None);
        assert_eq!(block.header.reward, 0);
        assert_eq!(block.header.number_of_transactions, 3);
        assert_eq!(block.header.total_amount, 1_000);
        assert_eq!(block.header.total_fee, 0);
        assert_eq!(
            block.header.generator_public_key,
            *f.genesis.public_key().as_bytes()
        );
        assert_eq!(block.transactions[0].tx_type, TransactionType::Transfer);
        assert!(block.is_signed());
    }

    #[test]
    fn test_payload_matches_sorted_bytes() {
        let f = fixture(3, 77);
        let block = assemble(f.transactions, &f.genesis, 0).unwrap();

        let mut concat = Vec::new();
        for tx in &block.transactions {
            concat.extend(transaction_bytes(tx, true).unwrap());
        }
        assert_eq!(block.header.payload_length as usize, concat.len());
        assert_eq!(block.header.payload_hash, sha256(&concat));
    }

    #[test]
    fn test_payload_hash_is_reproducible() {
        let f = fixture(4, 10);
        let mut sorted = f.transactions.clone();
        sort_canonical(&mut sorted);

        let first = summarize_payload(&sorted).unwrap();
        let second = summarize_payload(&sorted).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_id_ignores_signature() {
        let f = fixture(1, 1);
        let block = assemble(f.transactions, &f.genesis, 0).unwrap();

        let unsigned = encode_block(&block.header, None);
        assert_eq!(unsigned.len(), 117);
        assert_eq!(encode(&block).len(), 181);
        assert_eq!(block.id, derive_block_id(&sha256(&unsigned)));
        assert!(block.id.to_string().chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_signature_verifies_against_generator() {
        let f = fixture(1, 1);
        let block = assemble(f.transactions, &f.genesis, 0).unwrap();

        let digest = sha256(&encode_block(&block.header, None));
        let signature = Secp256k1Signature::from_bytes(block.block_signature.unwrap());
        assert!(f.genesis.public_key().verify_digest(&digest, &signature).is_ok());
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let f = fixture(3, 500);
        let mut reversed = f.transactions.clone();
        reversed.reverse();

        let a = assemble(f.transactions, &f.genesis, 0).unwrap();
        let b = assemble(reversed, &f.genesis, 0).unwrap();

        // registrations tie on (type, amount) so only the totals are order-free
        assert_eq!(a.header.total_amount, b.header.total_amount);
        assert_eq!(a.header.payload_length, b.header.payload_length);
        assert_eq!(a.transactions[0], b.transactions[0]);
    }

    #[test]
    fn test_amount_overflow_rejected() {
        let txs = vec![
            stub(TransactionType::Transfer, u64::MAX, "a"),
            stub(TransactionType::Transfer, 1, "b"),
        ];
        assert!(matches!(
            summarize_payload(&txs),
            Err(GenesisError::InvariantViolation(_))
        ));
    }

    fn arb_type() -> impl Strategy<Value = TransactionType> {
        prop_oneof![
            Just(TransactionType::Transfer),
            Just(TransactionType::DelegateRegistration)
        ]
    }

    proptest! {
        #[test]
        fn prop_sort_is_idempotent(
            entries in prop::collection::vec((arb_type(), 0u64..1_000), 0..40)
        ) {
            let mut txs: Vec<_> = entries
                .iter()
                .enumerate()
                .map(|(i, (t, a))| stub(*t, *a, &i.to_string()))
                .collect();
            sort_canonical(&mut txs);
            let once = txs.clone();
            sort_canonical(&mut txs);

            prop_assert_eq!(&once, &txs);
            for pair in txs.windows(2) {
                prop_assert!(
                    (pair[0].tx_type, pair[0].amount) <= (pair[1].tx_type, pair[1].amount)
                );
            }
        }
    }
}

//! Genesis transaction set
//!
//! One delegate registration per founding delegate, then a single premine
//! transfer into the genesis wallet. The block assembler re-sorts, but this
//! order is kept stable so fixtures stay reproducible.

use shared_types::Transaction;
use tracing::debug;

use super::formatter::{finalize, GenesisOverrides};
use super::identity::Identity;
use super::transaction::DraftBuilder;
use crate::error::Result;

/// Build registrations for `delegates`, then the premine transfer.
pub fn build_transactions(
    drafts: &DraftBuilder<'_>,
    delegates: &[Identity],
    premine: &Identity,
    genesis: &Identity,
    premine_amount: u64,
) -> Result<Vec<Transaction>> {
    let mut transactions = Vec::with_capacity(delegates.len() + 1);

    for delegate in delegates {
        let draft = drafts.delegate_registration(delegate)?;
        let tx = finalize(draft, &GenesisOverrides::for_sender(delegate), delegate)?;
        debug!(id = %tx.id, username = ?tx.username(), "Delegate registration");
        transactions.push(tx);
    }

    let draft = drafts.transfer(premine, genesis.address(), premine_amount)?;
    let transfer = finalize(draft, &GenesisOverrides::for_sender(premine), premine)?;
    debug!(id = %transfer.id, amount = transfer.amount, "Premine transfer");
    transactions.push(transfer);

    Ok(transactions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetworkConfig;
    use crate::domain::delegates::build_delegates;
    use crate::domain::identity::IdentityFactory;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use shared_types::TransactionType;

    #[test]
    fn test_registrations_then_transfer() {
        let network = NetworkConfig::devnet();
        let mut factory = IdentityFactory::new(network.pub_key_hash, StdRng::seed_from_u64(11));
        let genesis = factory.create_identity().unwrap();
        let premine = factory.create_identity().unwrap();
        let delegates = build_delegates(&mut factory, 3).unwrap();

        let txs = build_transactions(
            &DraftBuilder::new(&network),
            &delegates,
            &premine,
            &genesis,
            1_000,
        )
        .unwrap();

        assert_eq!(txs.len(), 4);
        for (tx, delegate) in txs.iter().zip(&delegates) {
            assert_eq!(tx.tx_type, TransactionType::DelegateRegistration);
            assert_eq!(tx.amount, 0);
            assert_eq!(tx.sender_address, delegate.address());
            assert_eq!(tx.username(), delegate.username());
        }

        let transfer = &txs[3];
        assert_eq!(transfer.tx_type, TransactionType::Transfer);
        assert_eq!(transfer.amount, 1_000);
        assert_eq!(transfer.sender_address, premine.address());
        assert_eq!(transfer.recipient_id.as_deref(), Some(genesis.address()));
        assert!(txs.iter().all(|tx| tx.fee == 0 && tx.timestamp == 0));
    }

    #[test]
    fn test_no_delegates_still_transfers() {
        let network = NetworkConfig::devnet();
        let mut factory = IdentityFactory::new(network.pub_key_hash, StdRng::seed_from_u64(12));
        let genesis = factory.create_identity().unwrap();
        let premine = factory.create_identity().unwrap();

        let txs =
            build_transactions(&DraftBuilder::new(&network), &[], &premine, &genesis, 5).unwrap();

        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].tx_type, TransactionType::Transfer);
    }
}

//! Genesis generator service
//!
//! Runs the whole pipeline as one unit of work: either a complete, signed
//! [`GenesisOutput`] comes back or an error does. Nothing partial escapes.

use rand::rngs::OsRng;
use rand::RngCore;
use serde::Serialize;
use shared_types::Block;
use tracing::info;

use crate::config::{GenesisParams, NetworkConfig};
use crate::domain::{
    assemble, build_delegates, build_transactions, DraftBuilder, Identity, IdentityFactory,
};
use crate::error::{GenesisError, Result};

/// Result of a genesis run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenesisOutput {
    /// Wallet that receives the premine and generates the block
    pub genesis_identity: Identity,
    /// The signed height-1 block
    pub genesis_block: Block,
    /// Founding delegate passphrases, in `genesis_1..` order
    pub delegate_mnemonics: Vec<String>,
}

/// Builds the genesis block for one network.
pub struct GenesisGenerator<R: RngCore = OsRng> {
    network: NetworkConfig,
    params: GenesisParams,
    identities: IdentityFactory<R>,
}

impl GenesisGenerator<OsRng> {
    /// Generator drawing identities from the operating system entropy source.
    pub fn with_os_entropy(network: NetworkConfig, params: GenesisParams) -> Self {
        let identities = IdentityFactory::from_os_entropy(network.pub_key_hash);
        Self::new(network, params, identities)
    }
}

impl<R: RngCore> GenesisGenerator<R> {
    /// Generator using `identities` for every founding wallet.
    pub fn new(
        network: NetworkConfig,
        params: GenesisParams,
        identities: IdentityFactory<R>,
    ) -> Self {
        Self {
            network,
            params,
            identities,
        }
    }

    /// Run the pipeline.
    ///
    /// Parameters are validated before any entropy is drawn.
    pub fn generate(mut self) -> Result<GenesisOutput> {
        self.params.validate()?;
        if self.identities.pub_key_hash() != self.network.pub_key_hash {
            return Err(GenesisError::InvalidConfig(format!(
                "identity factory encodes for {:#04x}, network '{}' uses {:#04x}",
                self.identities.pub_key_hash(),
                self.network.name,
                self.network.pub_key_hash
            )));
        }
        let premine_amount = self.params.premine_amount()?;

        info!(
            network = %self.network.name,
            forgers = self.params.forgers,
            premine = premine_amount,
            "Generating genesis block"
        );

        let genesis = self.identities.create_identity()?;
        let premine = self.identities.create_identity()?;
        let delegates = build_delegates(&mut self.identities, self.params.forgers)?;

        let transactions = build_transactions(
            &DraftBuilder::new(&self.network),
            &delegates,
            &premine,
            &genesis,
            premine_amount,
        )?;
        let block = assemble(transactions, &genesis, self.params.timestamp)?;

        info!(id = %block.id, address = %genesis.address(), "Genesis block ready");

        Ok(GenesisOutput {
            genesis_identity: genesis,
            genesis_block: block,
            delegate_mnemonics: delegates.into_iter().map(Identity::into_mnemonic).collect(),
        })
    }
}

//! # Core Domain Entities
//!
//! Defines the genesis-time chain entities.
//!
//! ## Clusters
//!
//! - **Transactions**: `TransactionType`, `Transaction`, `TransactionAsset`
//! - **Blocks**: `BlockHeader`, `Block`, `BlockId`
//!
//! All entities serialize to camelCase JSON with byte fields as lowercase hex,
//! which is the layout nodes read their genesis document from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as, DisplayFromStr};

use crate::errors::EntityError;

/// A 32-byte SHA-256 digest.
pub type Hash = [u8; 32];

/// A 33-byte compressed secp256k1 public key.
pub type CompressedPublicKey = [u8; 33];

/// A 64-byte compact (r || s) ECDSA signature.
pub type BlockSignature = [u8; 64];

/// Size of the block header encoding without a signature.
pub const BLOCK_HEADER_LEN: usize = 117;

/// Size of the trailing block signature when present.
pub const BLOCK_SIGNATURE_LEN: usize = 64;

/// Block version written into the genesis header.
pub const GENESIS_VERSION: u32 = 0;

/// Height of the genesis block.
pub const GENESIS_HEIGHT: u32 = 1;

// =============================================================================
// CLUSTER A: TRANSACTIONS
// =============================================================================

/// Transaction kinds that appear in a genesis block.
///
/// The discriminant is the wire byte and the primary canonical sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum TransactionType {
    /// Value transfer between two addresses.
    Transfer = 0,
    /// Registers the sender as a forging delegate under a username.
    DelegateRegistration = 2,
}

impl TransactionType {
    /// Wire byte of this type.
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

impl From<TransactionType> for u8 {
    fn from(value: TransactionType) -> Self {
        value.as_byte()
    }
}

impl TryFrom<u8> for TransactionType {
    type Error = EntityError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Transfer),
            2 => Ok(Self::DelegateRegistration),
            other => Err(EntityError::UnknownTransactionType(other)),
        }
    }
}

/// Delegate registration payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegateAsset {
    /// Forging username, e.g. `genesis_1`.
    pub username: String,
}

/// Type-specific transaction payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionAsset {
    /// Present on delegate registrations.
    pub delegate: DelegateAsset,
}

/// A signed genesis transaction.
///
/// `id` is derived from the signed bytes, so it is only meaningful once every
/// other field is final.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Transaction kind.
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    /// Amount in minor units.
    pub amount: u64,
    /// Fee in minor units (always 0 at genesis).
    pub fee: u64,
    /// Seconds since the network epoch (always 0 at genesis).
    pub timestamp: u32,
    /// Address of the signer.
    pub sender_address: String,
    /// Compressed public key of the signer.
    #[serde_as(as = "Hex")]
    pub sender_public_key: CompressedPublicKey,
    /// Recipient address, transfers only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_id: Option<String>,
    /// Type-specific payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<TransactionAsset>,
    /// ECDSA signature over the unsigned bytes.
    #[serde_as(as = "Hex")]
    pub signature: Vec<u8>,
    /// Hex SHA-256 of the signed bytes.
    pub id: String,
}

impl Transaction {
    /// Delegate username carried by a registration.
    pub fn username(&self) -> Option<&str> {
        self.asset.as_ref().map(|a| a.delegate.username.as_str())
    }
}

// =============================================================================
// CLUSTER B: BLOCKS
// =============================================================================

/// Block identifier: the first 8 bytes of the header digest, reversed and read
/// as an unsigned integer. Rendered in decimal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockId(pub u64);

impl BlockId {
    /// Big-endian bytes, as written into a successor's header.
    pub fn to_be_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BlockId {
    type Err = EntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(BlockId)
            .map_err(|_| EntityError::InvalidBlockId(s.to_string()))
    }
}

/// The encoded part of a block: everything that goes into the id and the
/// signature digest.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockHeader {
    /// Protocol version.
    pub version: u32,
    /// Seconds since the network epoch.
    pub timestamp: u32,
    /// Block height (1 for genesis).
    pub height: u32,
    /// Predecessor id, absent for genesis.
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub previous_block: Option<BlockId>,
    /// Number of transactions in the payload.
    pub number_of_transactions: u32,
    /// Sum of transaction amounts.
    pub total_amount: u64,
    /// Sum of transaction fees.
    pub total_fee: u64,
    /// Forging reward.
    pub reward: u64,
    /// Total serialized size of the payload.
    pub payload_length: u32,
    /// SHA-256 of the concatenated transaction bytes.
    #[serde_as(as = "Hex")]
    pub payload_hash: Hash,
    /// Compressed public key of the block generator.
    #[serde_as(as = "Hex")]
    pub generator_public_key: CompressedPublicKey,
}

/// A fully assembled block.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Encoded header fields.
    #[serde(flatten)]
    pub header: BlockHeader,
    /// Payload in canonical order.
    pub transactions: Vec<Transaction>,
    /// Id derived from the unsigned header encoding.
    #[serde_as(as = "DisplayFromStr")]
    pub id: BlockId,
    /// Generator signature over the unsigned header digest.
    #[serde_as(as = "Option<Hex>")]
    pub block_signature: Option<BlockSignature>,
}

impl Block {
    /// Whether the generator signature has been attached.
    pub fn is_signed(&self) -> bool {
        self.block_signature.is_some()
    }
}

//! Block header encoding and id derivation
//!
//! Consensus-critical: every node re-derives the genesis id and signature
//! digest from these exact bytes.
//!
//! ## Layout (little-endian)
//!
//! | field | bytes |
//! |-------|-------|
//! | version | 4 |
//! | timestamp | 4 |
//! | height | 4 |
//! | previous block id | 8, big-endian, zero-filled when absent |
//! | number of transactions | 4 |
//! | total amount | 8 |
//! | total fee | 8 |
//! | reward | 8 |
//! | payload length | 4 |
//! | payload hash | 32 |
//! | generator public key | 33 |
//! | block signature | 64, only when present |

use shared_crypto::Hash;
use shared_types::{
    Block, BlockHeader, BlockId, BlockSignature, BLOCK_HEADER_LEN, BLOCK_SIGNATURE_LEN,
};

/// Encode `header`, appending `signature` when one is given.
pub fn encode_block(header: &BlockHeader, signature: Option<&BlockSignature>) -> Vec<u8> {
    let mut out = Vec::with_capacity(BLOCK_HEADER_LEN + BLOCK_SIGNATURE_LEN);

    out.extend_from_slice(&header.version.to_le_bytes());
    out.extend_from_slice(&header.timestamp.to_le_bytes());
    out.extend_from_slice(&header.height.to_le_bytes());
    match header.previous_block {
        Some(id) => out.extend_from_slice(&id.to_be_bytes()),
        None => out.extend_from_slice(&[0u8; 8]),
    }
    out.extend_from_slice(&header.number_of_transactions.to_le_bytes());
    out.extend_from_slice(&header.total_amount.to_le_bytes());
    out.extend_from_slice(&header.total_fee.to_le_bytes());
    out.extend_from_slice(&header.reward.to_le_bytes());
    out.extend_from_slice(&header.payload_length.to_le_bytes());
    out.extend_from_slice(&header.payload_hash);
    out.extend_from_slice(&header.generator_public_key);

    debug_assert_eq!(out.len(), BLOCK_HEADER_LEN);

    if let Some(signature) = signature {
        out.extend_from_slice(signature);
    }

    out
}

/// Encode a block as it currently stands (signature included iff set).
pub fn encode(block: &Block) -> Vec<u8> {
    encode_block(&block.header, block.block_signature.as_ref())
}

/// Block id from a header digest.
///
/// Takes the first 8 digest bytes, reverses them, and reads the result as a
/// big-endian unsigned integer. Skipping the reversal yields a well-formed
/// but wrong id.
pub fn derive_block_id(digest: &Hash) -> BlockId {
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    head.reverse();
    BlockId(u64::from_be_bytes(head))
}

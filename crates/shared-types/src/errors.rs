//! # Error Types
//!
//! Errors raised while converting raw values into domain entities.

use thiserror::Error;

/// Errors raised by entity conversions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    /// Wire byte does not name a known transaction type.
    #[error("Unknown transaction type: {0}")]
    UnknownTransactionType(u8),

    /// Block id is not a decimal u64.
    #[error("Invalid block id: {0}")]
    InvalidBlockId(String),
}

//! # Shared Types Crate
//!
//! Genesis-time domain entities: transactions, block headers, blocks and
//! block ids.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: the encoder, the assembler and any verifier
//!   read the same structs.
//! - **Wire-stable JSON**: field names and hex encodings match the genesis
//!   document nodes load at startup.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;

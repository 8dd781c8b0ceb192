//! # Quantum Chain - Genesis Generator
//!
//! Produces the founding state of a delegated proof-of-stake network: a
//! genesis wallet, a premine wallet, `N` founding delegates, and the signed
//! height-1 block that registers those delegates and moves the premine.
//!
//! ## Pipeline
//!
//! ```text
//! GenesisParams ─→ validate ─→ identities ─→ transactions ─→ block
//!                              (genesis,      (registrations  (sort, summary,
//!                               premine,       + premine       id, signature)
//!                               delegates)     transfer)
//! ```
//!
//! ## Critical Invariants
//!
//! 1. **Genesis formatting**: every transaction has fee 0, timestamp 0, and
//!    its signer's address as `senderAddress`, with its signature and id
//!    computed over those final values
//! 2. **Canonical order**: transactions sorted by `(type, amount)`
//! 3. **Header integrity**: totals, payload length and payload hash match the
//!    sorted transaction bytes
//! 4. **Id before signature**: the block id hashes the unsigned header
//!
//! ## Module Structure
//!
//! - [`config`]: network presets, fee rules, genesis parameters
//! - [`domain`]: pure construction logic
//! - [`service`]: [`GenesisGenerator`] orchestration

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Network, fee and genesis configuration
pub mod config;
/// Domain models and construction logic
pub mod domain;
/// Pipeline orchestration
pub mod service;

mod error;

pub use config::{FeeConfig, GenesisParams, GenesisToolConfig, NetworkConfig, MAX_FORGERS};
pub use error::{GenesisError, Result};
pub use service::{GenesisGenerator, GenesisOutput};

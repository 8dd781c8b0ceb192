//! Domain layer - Pure genesis construction logic
//!
//! Everything here is synchronous and free of I/O apart from the entropy
//! source handed to [`IdentityFactory`].
//!
//! ## Pipeline
//!
//! ```text
//! IdentityFactory ─→ build_delegates ─→ build_transactions ─→ assemble
//!                                        (DraftBuilder +        │
//!                                         finalize)             ↓
//!                                                      encode_block / derive_block_id
//! ```
//!
//! ## Modules
//!
//! - [`identity`]: founding wallets and the entropy-backed factory
//! - [`delegates`]: `genesis_<n>` delegate set
//! - [`transaction`]: unsigned drafts and the transaction byte layout
//! - [`formatter`]: genesis overrides and the single signing pass
//! - [`transaction_set`]: registrations plus the premine transfer
//! - [`encoder`]: 117-byte header encoding and block id derivation
//! - [`assembler`]: canonical sort, payload summary, signing
//! - [`verify`]: re-validation of a generated block

pub mod assembler;
pub mod delegates;
pub mod encoder;
pub mod formatter;
pub mod identity;
pub mod transaction;
pub mod transaction_set;
pub mod verify;

pub use assembler::{assemble, sort_canonical, summarize_payload, PayloadSummary};
pub use delegates::{build_delegates, delegate_username};
pub use encoder::{derive_block_id, encode, encode_block};
pub use formatter::{finalize, GenesisOverrides};
pub use identity::{Identity, IdentityFactory};
pub use transaction::{transaction_bytes, transaction_id, DraftBuilder, TransactionDraft};
pub use transaction_set::build_transactions;
pub use verify::{verify_block, verify_transaction};

//! mintforge - Token-2022 mint composition engine
//!
//! Configures and assembles multi-extension mint-creation transactions for
//! the TLV-extensible token account model, then wraps the mechanical
//! post-creation operations.
//!
//! ## Architecture
//!
//! - **extension**: the pure composition primitives: kind enum, per-kind
//!   configs, the mutual-exclusion rule table, the byte-layout calculator,
//!   and the initialization order resolver
//! - **composer**: the fluent builder orchestrating the validation and
//!   emission pipeline, with `plan` and `execute` terminal modes
//! - **metadata**: sizing codec for on-account descriptive metadata
//! - **ledger**: the async collaborator boundary (funding query, atomic
//!   submission, account read) with RPC and mock implementations
//! - **features**: post-creation wrappers (fee harvest, delegated transfer,
//!   metadata field updates) over one capability-checked mint handle
//! - **config**: TOML-backed RPC settings

pub mod composer;
pub mod config;
pub mod extension;
pub mod features;
pub mod ledger;
pub mod metadata;

// Re-export commonly used types
pub use composer::{ComposeError, MintComposer, MintPlan, MintReceipt};
pub use extension::{ExtensionKind, MintLayout, StepKind};
pub use ledger::{LedgerClient, LedgerError, RpcLedgerClient};
pub use metadata::MetadataSpec;
pub use solana_sdk::{pubkey::Pubkey, signature::Signature};

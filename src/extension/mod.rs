//! Extension composition primitives
//!
//! The pieces the composer orchestrates, all pure and offline:
//! - **kind**: the closed extension-kind enum and its canonical ordering
//! - **config**: per-kind parameter payloads
//! - **rules**: the mutual-exclusion deny-list and compatibility checker
//! - **layout**: TLV byte-layout and funding-size computation
//! - **order**: the single legal initialization step sequence

pub mod config;
pub mod kind;
pub mod layout;
pub mod order;
pub mod rules;

pub use config::{
    ExtensionConfig, InterestBearingParams, MetadataPointerParams, TransferFeeParams,
    TransferHookParams, MAX_FEE_BASIS_POINTS,
};
pub use kind::ExtensionKind;
pub use layout::{LayoutError, MintLayout};
pub use order::{resolve, sanity_check_step_order, StepKind};
pub use rules::{check, CompatibilityRule, RuleViolation, RULE_TABLE};

//! Composition builder
//!
//! The orchestrating layer: a fluent [`MintComposer`] accumulates feature
//! configs, then one unified pipeline (compatibility check, layout, order
//! resolution, instruction emission) produces a [`MintPlan`] for inspection
//! or atomic submission.
//!
//! Module split:
//! - **errors**: the compose/plan/execute error taxonomy
//! - **builder**: the fluent accumulator and pipeline
//! - **instructions**: abstract-step-to-instruction materialization
//! - **plan**: the resolved, not-yet-submitted output

pub mod errors;

mod builder;
mod instructions;
mod plan;

pub use builder::MintComposer;
pub use errors::ComposeError;
pub use plan::{InitStep, MintPlan, MintReceipt};

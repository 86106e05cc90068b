//! Initialization order resolver
//!
//! The underlying program enforces a strict allocate, declare-extensions,
//! finalize-base, populate-content ordering: several extensions reference
//! the account's own address, so every extension must be declared before the
//! base mint fields are finalized, and metadata content can only be written
//! once the base exists. The resolver has exactly one correct output per
//! input set; any deviation is an implementation bug, not a configurable
//! choice.

use std::collections::BTreeSet;

use super::kind::ExtensionKind;

/// Abstract step in a mint-creation bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Reserve the account's bytes and transfer its funding. Always first.
    Allocate,
    /// Declare one extension in the account's TLV region.
    Declare(ExtensionKind),
    /// Finalize decimals and authorities. Always directly after declarations.
    InitializeBase,
    /// Write name, symbol, and uri into the metadata TLV entry.
    InitializeMetadata,
    /// Write one additional (key, value) pair, identified by attachment index.
    UpdateMetadataField(usize),
}

/// Resolve the canonical step sequence for a requested kind set.
///
/// `metadata_fields` is `Some(n)` when descriptive metadata with `n`
/// additional key/value pairs is requested. There is no separate
/// metadata/non-metadata path; the same resolver covers both.
pub fn resolve(
    requested: &BTreeSet<ExtensionKind>,
    metadata_fields: Option<usize>,
) -> Vec<StepKind> {
    let mut steps = Vec::with_capacity(
        2 + requested.len() + metadata_fields.map(|n| n + 1).unwrap_or(0),
    );

    steps.push(StepKind::Allocate);

    // Declarations in canonical order; metadata pointer lands last among
    // extensions so it can reference the final metadata location.
    let mut declared: Vec<ExtensionKind> = requested.iter().copied().collect();
    declared.sort_by_key(|k| k.init_priority());
    steps.extend(declared.into_iter().map(StepKind::Declare));

    steps.push(StepKind::InitializeBase);

    if let Some(fields) = metadata_fields {
        steps.push(StepKind::InitializeMetadata);
        steps.extend((0..fields).map(StepKind::UpdateMetadataField));
    }

    steps
}

/// Validate a resolved sequence against the phase invariants (debug/test
/// builds only; release builds compile this away).
#[cfg(debug_assertions)]
pub fn sanity_check_step_order(steps: &[StepKind]) -> Result<(), String> {
    if steps.first() != Some(&StepKind::Allocate) {
        return Err("allocation must be the first step".to_string());
    }
    let base_index = steps
        .iter()
        .position(|s| *s == StepKind::InitializeBase)
        .ok_or_else(|| "missing base-initialization step".to_string())?;
    for (idx, step) in steps.iter().enumerate() {
        match step {
            StepKind::Allocate if idx != 0 => {
                return Err(format!("duplicate allocation step at {idx}"));
            }
            StepKind::Declare(kind) if idx > base_index => {
                return Err(format!("{kind} declared after base initialization"));
            }
            StepKind::InitializeMetadata | StepKind::UpdateMetadataField(_)
                if idx < base_index =>
            {
                return Err(format!("metadata content step at {idx} precedes base"));
            }
            _ => {}
        }
    }
    Ok(())
}

#[cfg(not(debug_assertions))]
#[inline]
pub fn sanity_check_step_order(_steps: &[StepKind]) -> Result<(), String> {
    Ok(())
}

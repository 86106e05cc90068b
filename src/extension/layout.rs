//! Account layout calculator
//!
//! Computes the exact byte footprint of a mint for a requested extension set,
//! following the on-chain TLV format: a base record, padded out to the
//! token-account length plus one account-type byte whenever any extension is
//! present, followed by one 4-byte type+length header per extension and its
//! fixed payload. Descriptive metadata adds a variable-length TLV entry sized
//! by the metadata codec.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;
use tracing::debug;

use super::kind::ExtensionKind;
use crate::metadata::MetadataSpec;

/// Packed length of a bare (extension-free) mint record.
pub const BASE_MINT_LEN: usize = 82;

/// Base footprint of any mint that carries at least one extension: the mint
/// record padded to the token-account length, plus one account-type byte.
pub const EXTENDED_MINT_BASE_LEN: usize = 166;

/// Two bytes of type plus two bytes of length per TLV entry.
pub const TLV_HEADER_LEN: usize = 4;

/// Packed length of a multisig account. A mint whose total collides with this
/// would be mistaken for a multisig by length-based dispatch, so the total is
/// bumped past it.
const MULTISIG_LEN: usize = 355;

/// Ledger ceiling on account data length (10 MiB).
pub const MAX_ACCOUNT_DATA_LEN: usize = 10 * 1024 * 1024;

/// Layout computation failures. Raised before any network call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("computed account size {total} exceeds the ledger ceiling of {max} bytes")]
    ExceedsMaxAccountSize { total: usize, max: usize },
}

/// Derived byte layout and funding requirement for one composed mint.
///
/// Values are computed once per plan and never mutated afterwards, except for
/// `required_funding`, which the composer fills in from the ledger client's
/// minimum-funding query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintLayout {
    /// Base record size (82 bare, 166 once any extension is present)
    pub base_size: usize,
    /// Header-plus-payload contribution of each requested extension
    pub extension_sizes: BTreeMap<ExtensionKind, usize>,
    /// TLV footprint of descriptive metadata, zero when none is requested
    pub metadata_size: usize,
    /// Full funded size: base + extensions + metadata (+ multisig bump)
    pub total_size: usize,
    /// Minimum balance keeping `total_size` bytes alive indefinitely
    pub required_funding: u64,
}

impl MintLayout {
    /// Compute the layout for a requested kind set and optional metadata.
    ///
    /// `required_funding` starts at zero; the composer fills it in after the
    /// ledger query.
    pub fn compute(
        requested: &BTreeSet<ExtensionKind>,
        metadata: Option<&MetadataSpec>,
    ) -> Result<Self, LayoutError> {
        let extended = !requested.is_empty() || metadata.is_some();
        let base_size = if extended {
            EXTENDED_MINT_BASE_LEN
        } else {
            BASE_MINT_LEN
        };

        let mut extension_sizes = BTreeMap::new();
        let mut total = base_size;
        for &kind in requested {
            let size = TLV_HEADER_LEN + kind.payload_size();
            extension_sizes.insert(kind, size);
            total += size;
        }

        // Length-based account dispatch must never confuse a mint with a
        // multisig; bump past the collision like the on-chain allocator does.
        if total == MULTISIG_LEN {
            total += 2;
        }

        let metadata_size = metadata.map(|m| m.tlv_len()).unwrap_or(0);
        total += metadata_size;

        if total > MAX_ACCOUNT_DATA_LEN {
            return Err(LayoutError::ExceedsMaxAccountSize {
                total,
                max: MAX_ACCOUNT_DATA_LEN,
            });
        }

        debug!(
            extensions = requested.len(),
            metadata_size, total, "computed mint layout"
        );

        Ok(Self {
            base_size,
            extension_sizes,
            metadata_size,
            total_size: total,
            required_funding: 0,
        })
    }

    /// Bytes reserved by the allocation step.
    ///
    /// Metadata bytes are funded up front but written through an on-chain
    /// realloc when the content steps run, so they are excluded here; the
    /// base-initialization instruction rejects accounts whose length does not
    /// exactly match the declared extension set.
    pub fn allocated_size(&self) -> usize {
        self.total_size - self.metadata_size
    }
}

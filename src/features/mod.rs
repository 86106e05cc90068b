//! Post-creation feature wrappers
//!
//! One concrete [`Mint`] handle, loaded from raw account bytes through the
//! authoritative TLV parser, plus independent per-feature modules operating
//! on it through the capability query. A mint freely gains wrappers after the
//! fact; there is no per-feature handle hierarchy.

pub mod delegate;
pub mod fees;
pub mod metadata_fields;

use solana_sdk::pubkey::Pubkey;
use spl_token_2022::{
    extension::{BaseStateWithExtensions, StateWithExtensions},
    state::Mint as MintState,
};
use thiserror::Error;
use tracing::debug;

use crate::extension::ExtensionKind;
use crate::ledger::{LedgerClient, LedgerError};

/// Failures in the post-creation wrappers.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// The mint does not carry the extension this wrapper needs
    #[error("mint {mint} does not carry the {required} extension")]
    MissingExtension {
        mint: Pubkey,
        required: ExtensionKind,
    },

    /// Account bytes did not parse as a mint
    #[error("failed to decode mint {mint}: {reason}")]
    Decode { mint: Pubkey, reason: String },

    /// Instruction encoding failed
    #[error("instruction encoding failed for mint {mint}: {reason}")]
    Encode { mint: Pubkey, reason: String },

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Handle on an existing mint: its address, decimals, and decoded extension
/// set.
#[derive(Debug, Clone)]
pub struct Mint {
    address: Pubkey,
    decimals: u8,
    extensions: Vec<ExtensionKind>,
}

impl Mint {
    /// Load and decode the mint at `address`.
    ///
    /// Extension kinds come straight from the on-chain TLV type enum;
    /// account-side or unrecognized entries are skipped.
    pub async fn load(ledger: &dyn LedgerClient, address: Pubkey) -> Result<Self, FeatureError> {
        let data = ledger.read_account(&address).await?;
        Self::from_account_data(address, &data)
    }

    /// Decode a mint from raw account bytes (already fetched).
    pub fn from_account_data(address: Pubkey, data: &[u8]) -> Result<Self, FeatureError> {
        let state = StateWithExtensions::<MintState>::unpack(data).map_err(|e| {
            FeatureError::Decode {
                mint: address,
                reason: e.to_string(),
            }
        })?;
        let extensions = state
            .get_extension_types()
            .map_err(|e| FeatureError::Decode {
                mint: address,
                reason: e.to_string(),
            })?
            .into_iter()
            .filter_map(ExtensionKind::from_extension_type)
            .collect::<Vec<_>>();
        debug!(%address, ?extensions, "loaded mint handle");
        Ok(Self {
            address,
            decimals: state.base.decimals,
            extensions,
        })
    }

    pub fn address(&self) -> Pubkey {
        self.address
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Does this mint carry the given extension?
    pub fn supports(&self, kind: ExtensionKind) -> bool {
        self.extensions.contains(&kind)
    }

    pub fn extensions(&self) -> &[ExtensionKind] {
        &self.extensions
    }

    /// Capability gate used by the wrappers.
    pub(crate) fn require(&self, kind: ExtensionKind) -> Result<(), FeatureError> {
        if self.supports(kind) {
            Ok(())
        } else {
            Err(FeatureError::MissingExtension {
                mint: self.address,
                required: kind,
            })
        }
    }
}

#[cfg(test)]
pub(crate) mod test_data {
    //! Hand-packed mint account bytes for wrapper tests.

    const MINT_LEN: usize = 82;
    const ACCOUNT_LEN: usize = 165;

    /// Raw bytes of an initialized mint carrying the given TLV entries, each
    /// given as (extension type, payload).
    pub fn mint_account(decimals: u8, extensions: &[(u16, Vec<u8>)]) -> Vec<u8> {
        let mut data = vec![0u8; MINT_LEN];
        // COption tag for mint authority: Some
        data[0] = 1;
        data[4..36].copy_from_slice(&[7u8; 32]);
        data[44] = decimals;
        data[45] = 1; // is_initialized
        if extensions.is_empty() {
            return data;
        }
        data.resize(ACCOUNT_LEN, 0);
        data.push(1); // AccountType::Mint
        for (ext_type, payload) in extensions {
            data.extend_from_slice(&ext_type.to_le_bytes());
            data.extend_from_slice(&(payload.len() as u16).to_le_bytes());
            data.extend_from_slice(payload);
        }
        data
    }
}

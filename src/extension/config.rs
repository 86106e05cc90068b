//! Per-extension parameter payloads
//!
//! Each extension kind carries its own typed parameter struct. Parameters are
//! validated at attachment time by the composer, never deferred to build time,
//! so the validation helpers here are pure and synchronous.

use solana_sdk::pubkey::Pubkey;
use spl_token_2022::state::AccountState;

use super::kind::ExtensionKind;

/// Fee rates are basis points out of 10_000.
pub const MAX_FEE_BASIS_POINTS: u16 = 10_000;

/// Fee-on-transfer parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferFeeParams {
    /// Fee rate in basis points (1/100th of a percent), at most 10_000
    pub fee_basis_points: u16,
    /// Hard cap on the fee charged for a single transfer, in base units
    pub maximum_fee: u64,
    /// Key allowed to adjust the fee schedule, if any
    pub fee_authority: Option<Pubkey>,
    /// Key allowed to withdraw withheld fees, if any
    pub withdraw_authority: Option<Pubkey>,
}

impl TransferFeeParams {
    /// Fee charged for transferring `amount`: `floor(amount * bps / 10_000)`,
    /// capped at `maximum_fee`.
    pub fn fee_for(&self, amount: u64) -> u64 {
        let raw = (amount as u128)
            .saturating_mul(self.fee_basis_points as u128)
            / MAX_FEE_BASIS_POINTS as u128;
        std::cmp::min(raw as u64, self.maximum_fee)
    }
}

/// Transfer-hook parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferHookParams {
    /// Program invoked on every transfer
    pub program_id: Pubkey,
    /// Key allowed to swap the hook program later, if any
    pub authority: Option<Pubkey>,
}

/// Interest-accrual parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterestBearingParams {
    /// Current annualized rate in basis points; may be negative
    pub rate_basis_points: i16,
    /// Key allowed to update the rate, if any
    pub rate_authority: Option<Pubkey>,
}

/// Metadata-pointer parameters. The pointer usually targets the mint itself
/// (self-hosted metadata) but may reference an external account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataPointerParams {
    /// Account holding the descriptive metadata
    pub metadata_address: Pubkey,
    /// Key allowed to move the pointer later, if any
    pub authority: Option<Pubkey>,
}

/// Parameter payload for one requested extension.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtensionConfig {
    TransferFee(TransferFeeParams),
    PermanentDelegate { delegate: Pubkey },
    InterestBearing(InterestBearingParams),
    TransferHook(TransferHookParams),
    NonTransferable,
    DefaultAccountState { state: AccountState },
    MintCloseAuthority { close_authority: Pubkey },
    MetadataPointer(MetadataPointerParams),
}

impl ExtensionConfig {
    /// The kind this payload configures.
    pub fn kind(&self) -> ExtensionKind {
        match self {
            ExtensionConfig::TransferFee(_) => ExtensionKind::TransferFee,
            ExtensionConfig::PermanentDelegate { .. } => ExtensionKind::PermanentDelegate,
            ExtensionConfig::InterestBearing(_) => ExtensionKind::InterestBearing,
            ExtensionConfig::TransferHook(_) => ExtensionKind::TransferHook,
            ExtensionConfig::NonTransferable => ExtensionKind::NonTransferable,
            ExtensionConfig::DefaultAccountState { .. } => ExtensionKind::DefaultAccountState,
            ExtensionConfig::MintCloseAuthority { .. } => ExtensionKind::MintCloseAuthority,
            ExtensionConfig::MetadataPointer(_) => ExtensionKind::MetadataPointer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fee(bps: u16, max: u64) -> TransferFeeParams {
        TransferFeeParams {
            fee_basis_points: bps,
            maximum_fee: max,
            fee_authority: None,
            withdraw_authority: None,
        }
    }

    #[test]
    fn fee_is_floor_of_bps_share() {
        let params = fee(100, 1_000_000_000);
        assert_eq!(params.fee_for(10_000_000_000), 100_000_000);
        // rounds down
        assert_eq!(fee(1, u64::MAX).fee_for(9_999), 0);
    }

    #[test]
    fn fee_caps_at_maximum() {
        let params = fee(100, 1_000_000_000);
        assert_eq!(params.fee_for(1_000_000_000_000), 1_000_000_000);
    }

    #[test]
    fn fee_survives_u64_scale_amounts() {
        // amount * bps overflows u64; the computation must widen
        let params = fee(10_000, u64::MAX);
        assert_eq!(params.fee_for(u64::MAX), u64::MAX);
    }

    #[test]
    fn config_reports_its_kind() {
        let cfg = ExtensionConfig::PermanentDelegate {
            delegate: Pubkey::new_unique(),
        };
        assert_eq!(cfg.kind(), ExtensionKind::PermanentDelegate);
    }
}

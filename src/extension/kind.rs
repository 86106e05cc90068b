//! Extension kind identifiers and their canonical ordering

use spl_token_2022::extension::ExtensionType;

/// Closed set of mint extensions this crate can compose.
///
/// Each variant corresponds 1:1 to an entry in the on-chain TLV extension
/// enum; [`ExtensionKind::extension_type`] is the single source of truth for
/// that mapping, so no numeric discriminants are duplicated anywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExtensionKind {
    /// Fee-on-transfer, expressed in basis points with a hard cap
    TransferFee,
    /// An authority permanently allowed to move any holder's tokens
    PermanentDelegate,
    /// Continuous interest accrual on displayed amounts
    InterestBearing,
    /// External program invoked on every transfer
    TransferHook,
    /// Tokens minted to an account can never leave it
    NonTransferable,
    /// Encrypted balances and transfer amounts
    ConfidentialBalances,
    /// New token accounts start in a configured (usually frozen) state
    DefaultAccountState,
    /// Authority allowed to close the mint account itself
    MintCloseAuthority,
    /// Pointer from the mint to the account holding its metadata
    MetadataPointer,
}

impl ExtensionKind {
    /// All supported kinds, in canonical initialization order.
    ///
    /// The order is load-bearing: extension declarations must be appended to
    /// the creation bundle in exactly this sequence, with the metadata
    /// pointer last among extensions so it can reference the final metadata
    /// location. `ConfidentialBalances` appears for rule evaluation only and
    /// never reaches declaration (see `MintComposer::with_confidential_balances`).
    pub const CANONICAL_ORDER: [ExtensionKind; 9] = [
        ExtensionKind::TransferFee,
        ExtensionKind::PermanentDelegate,
        ExtensionKind::InterestBearing,
        ExtensionKind::TransferHook,
        ExtensionKind::NonTransferable,
        ExtensionKind::ConfidentialBalances,
        ExtensionKind::DefaultAccountState,
        ExtensionKind::MintCloseAuthority,
        ExtensionKind::MetadataPointer,
    ];

    /// Position of this kind in the canonical initialization order.
    pub fn init_priority(self) -> usize {
        Self::CANONICAL_ORDER
            .iter()
            .position(|k| *k == self)
            .unwrap_or(usize::MAX)
    }

    /// Authoritative on-chain extension type for this kind.
    ///
    /// Note: `NonTransferable` is discriminant 9 in the on-chain enum.
    pub fn extension_type(self) -> ExtensionType {
        match self {
            ExtensionKind::TransferFee => ExtensionType::TransferFeeConfig,
            ExtensionKind::PermanentDelegate => ExtensionType::PermanentDelegate,
            ExtensionKind::InterestBearing => ExtensionType::InterestBearingConfig,
            ExtensionKind::TransferHook => ExtensionType::TransferHook,
            ExtensionKind::NonTransferable => ExtensionType::NonTransferable,
            ExtensionKind::ConfidentialBalances => ExtensionType::ConfidentialTransferMint,
            ExtensionKind::DefaultAccountState => ExtensionType::DefaultAccountState,
            ExtensionKind::MintCloseAuthority => ExtensionType::MintCloseAuthority,
            ExtensionKind::MetadataPointer => ExtensionType::MetadataPointer,
        }
    }

    /// Map an on-chain extension type back to a composable kind.
    ///
    /// Returns `None` for account-side or unsupported extension types; callers
    /// scanning raw mint data skip those.
    pub fn from_extension_type(ext: ExtensionType) -> Option<Self> {
        match ext {
            ExtensionType::TransferFeeConfig => Some(ExtensionKind::TransferFee),
            ExtensionType::PermanentDelegate => Some(ExtensionKind::PermanentDelegate),
            ExtensionType::InterestBearingConfig => Some(ExtensionKind::InterestBearing),
            ExtensionType::TransferHook => Some(ExtensionKind::TransferHook),
            ExtensionType::NonTransferable => Some(ExtensionKind::NonTransferable),
            ExtensionType::ConfidentialTransferMint => Some(ExtensionKind::ConfidentialBalances),
            ExtensionType::DefaultAccountState => Some(ExtensionKind::DefaultAccountState),
            ExtensionType::MintCloseAuthority => Some(ExtensionKind::MintCloseAuthority),
            ExtensionType::MetadataPointer => Some(ExtensionKind::MetadataPointer),
            _ => None,
        }
    }

    /// Fixed TLV payload size of this extension on a mint, in bytes.
    ///
    /// These are the packed sizes of the on-chain extension structs; the
    /// 4-byte type+length header is accounted for separately by the layout
    /// calculator.
    pub fn payload_size(self) -> usize {
        match self {
            // 2 authorities + withheld amount + older/newer fee schedule
            ExtensionKind::TransferFee => 108,
            ExtensionKind::PermanentDelegate => 32,
            // rate authority + 2 timestamps + 2 rates
            ExtensionKind::InterestBearing => 52,
            // hook authority + hook program id
            ExtensionKind::TransferHook => 64,
            // marker extension, zero-length payload
            ExtensionKind::NonTransferable => 0,
            // authority + auto-approve flag + auditor key
            ExtensionKind::ConfidentialBalances => 65,
            ExtensionKind::DefaultAccountState => 1,
            ExtensionKind::MintCloseAuthority => 32,
            // pointer authority + metadata address
            ExtensionKind::MetadataPointer => 64,
        }
    }

    /// Human-readable kind name used in error reasons.
    pub fn name(self) -> &'static str {
        match self {
            ExtensionKind::TransferFee => "transfer-fee",
            ExtensionKind::PermanentDelegate => "permanent-delegate",
            ExtensionKind::InterestBearing => "interest-bearing",
            ExtensionKind::TransferHook => "transfer-hook",
            ExtensionKind::NonTransferable => "non-transferable",
            ExtensionKind::ConfidentialBalances => "confidential-balances",
            ExtensionKind::DefaultAccountState => "default-account-state",
            ExtensionKind::MintCloseAuthority => "mint-close-authority",
            ExtensionKind::MetadataPointer => "metadata-pointer",
        }
    }
}

impl std::fmt::Display for ExtensionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

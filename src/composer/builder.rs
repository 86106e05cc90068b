//! Mint composition builder
//!
//! [`MintComposer`] accumulates requested extensions and their parameters
//! through fluent attachment calls, then runs one unified pipeline
//! (compatibility check, layout, order resolution, instruction emission)
//! regardless of whether metadata is requested. The two terminal operations
//! consume the composer, so a composition state can never be built twice.
//!
//! Attachment calls validate their own parameters immediately and fail fast;
//! cross-feature validation happens at plan entry, before the single
//! read-only funding query, so invalid configurations never incur network
//! cost.

use std::collections::{BTreeMap, BTreeSet};

use solana_sdk::{pubkey::Pubkey, signature::{Keypair, Signer}};
use spl_token_2022::state::AccountState;
use tracing::{debug, info};

use crate::composer::errors::ComposeError;
use crate::composer::instructions::{materialize, EmitContext};
use crate::composer::plan::{InitStep, MintPlan, MintReceipt};
use crate::extension::{
    self, ExtensionConfig, ExtensionKind, InterestBearingParams, MetadataPointerParams,
    MintLayout, TransferFeeParams, TransferHookParams, MAX_FEE_BASIS_POINTS,
};
use crate::ledger::LedgerClient;
use crate::metadata::{MetadataSpec, MAX_NAME_LEN, MAX_SYMBOL_LEN, MAX_URI_LEN};

/// Fluent accumulator for one mint-creation request.
///
/// ```no_run
/// use mintforge::composer::MintComposer;
/// use mintforge::extension::TransferFeeParams;
/// use mintforge::ledger::RpcLedgerClient;
/// use solana_sdk::signature::{Keypair, Signer};
///
/// # async fn example() -> Result<(), mintforge::composer::ComposeError> {
/// let payer = Keypair::new();
/// let ledger = RpcLedgerClient::new("http://localhost:8899");
///
/// let plan = MintComposer::new(9, payer.pubkey())
///     .with_transfer_fee(TransferFeeParams {
///         fee_basis_points: 100,
///         maximum_fee: 1_000_000_000,
///         fee_authority: Some(payer.pubkey()),
///         withdraw_authority: Some(payer.pubkey()),
///     })?
///     .with_permanent_delegate(payer.pubkey())?
///     .plan(&ledger, &payer.pubkey())
///     .await?;
///
/// let receipt = plan.submit(&ledger, &payer, &[]).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct MintComposer {
    decimals: u8,
    mint_authority: Pubkey,
    freeze_authority: Option<Pubkey>,
    configs: BTreeMap<ExtensionKind, ExtensionConfig>,
    metadata: Option<MetadataSpec>,
}

impl MintComposer {
    /// Start a composition with the base mint parameters.
    pub fn new(decimals: u8, mint_authority: Pubkey) -> Self {
        Self {
            decimals,
            mint_authority,
            freeze_authority: None,
            configs: BTreeMap::new(),
            metadata: None,
        }
    }

    /// Set the freeze authority on the base mint.
    pub fn freeze_authority(mut self, authority: Pubkey) -> Self {
        self.freeze_authority = Some(authority);
        self
    }

    /// Attach fee-on-transfer. Fails fast on a rate above 10_000 bps.
    pub fn with_transfer_fee(self, params: TransferFeeParams) -> Result<Self, ComposeError> {
        if params.fee_basis_points > MAX_FEE_BASIS_POINTS {
            return Err(ComposeError::configuration(
                "fee_basis_points",
                format!(
                    "{} exceeds the maximum of {MAX_FEE_BASIS_POINTS}",
                    params.fee_basis_points
                ),
            ));
        }
        self.attach(ExtensionConfig::TransferFee(params))
    }

    /// Attach a permanent delegate allowed to move any holder's tokens.
    pub fn with_permanent_delegate(self, delegate: Pubkey) -> Result<Self, ComposeError> {
        self.attach(ExtensionConfig::PermanentDelegate { delegate })
    }

    /// Attach interest accrual at the given rate (basis points, may be
    /// negative).
    pub fn with_interest_rate(self, params: InterestBearingParams) -> Result<Self, ComposeError> {
        self.attach(ExtensionConfig::InterestBearing(params))
    }

    /// Attach a transfer hook program invoked on every transfer.
    pub fn with_transfer_hook(self, params: TransferHookParams) -> Result<Self, ComposeError> {
        self.attach(ExtensionConfig::TransferHook(params))
    }

    /// Make the token non-transferable.
    pub fn with_non_transferable(self) -> Result<Self, ComposeError> {
        self.attach(ExtensionConfig::NonTransferable)
    }

    /// Have new token accounts start frozen (requires a freeze authority at
    /// plan time) or explicitly initialized.
    pub fn with_default_account_state(self, frozen: bool) -> Result<Self, ComposeError> {
        let state = if frozen {
            AccountState::Frozen
        } else {
            AccountState::Initialized
        };
        self.attach(ExtensionConfig::DefaultAccountState { state })
    }

    /// Attach an authority allowed to close the mint account.
    pub fn with_mint_close_authority(self, close_authority: Pubkey) -> Result<Self, ComposeError> {
        self.attach(ExtensionConfig::MintCloseAuthority { close_authority })
    }

    /// Point the mint at an **external** metadata account, without writing
    /// any content. Mutually exclusive with [`Self::with_metadata`].
    pub fn with_metadata_pointer(
        self,
        params: MetadataPointerParams,
    ) -> Result<Self, ComposeError> {
        if self.metadata.is_some() {
            return Err(ComposeError::configuration(
                "metadata_pointer",
                "self-hosted metadata already attached; the pointer targets the mint",
            ));
        }
        self.attach(ExtensionConfig::MetadataPointer(params))
    }

    /// Attach self-hosted descriptive metadata: a pointer from the mint to
    /// itself plus the content-population steps. Field byte budgets are
    /// enforced here, not at build time.
    pub fn with_metadata(mut self, spec: MetadataSpec) -> Result<Self, ComposeError> {
        if self.configs.contains_key(&ExtensionKind::MetadataPointer) {
            return Err(ComposeError::configuration(
                "metadata",
                "a metadata pointer is already attached",
            ));
        }
        if self.metadata.is_some() {
            return Err(ComposeError::configuration(
                "metadata",
                "metadata already attached",
            ));
        }
        check_budget("name", spec.name.len(), MAX_NAME_LEN)?;
        check_budget("symbol", spec.symbol.len(), MAX_SYMBOL_LEN)?;
        check_budget("uri", spec.uri.len(), MAX_URI_LEN)?;
        for (key, _) in &spec.additional {
            if key.is_empty() {
                return Err(ComposeError::configuration(
                    "additional",
                    "metadata field keys must be non-empty",
                ));
            }
        }
        self.metadata = Some(spec);
        Ok(self)
    }

    /// Confidential balances require zero-knowledge transfer proofs, which
    /// this crate does not implement. The kind still participates in rule
    /// evaluation, but attachment is refused outright rather than fabricating
    /// placeholder proof bytes.
    pub fn with_confidential_balances(self) -> Result<Self, ComposeError> {
        Err(ComposeError::Unsupported {
            feature: ExtensionKind::ConfidentialBalances,
            reason: "zero-knowledge transfer proofs are not implemented",
        })
    }

    /// Kinds attached so far, including the implied metadata pointer.
    pub fn requested_kinds(&self) -> BTreeSet<ExtensionKind> {
        let mut kinds: BTreeSet<ExtensionKind> = self.configs.keys().copied().collect();
        if self.metadata.is_some() {
            kinds.insert(ExtensionKind::MetadataPointer);
        }
        kinds
    }

    /// Resolve the plan: validate, size, order, and emit, without
    /// submitting anything. The only ledger contact is the read-only
    /// minimum-funding query, made after all validation has passed.
    ///
    /// `payer` is the account the allocation step draws funding from; it must
    /// match the keypair later handed to [`MintPlan::submit`].
    pub async fn plan(
        mut self,
        ledger: &dyn LedgerClient,
        payer: &Pubkey,
    ) -> Result<MintPlan, ComposeError> {
        // Cross-field validation that no single attachment call can see.
        if let Some(ExtensionConfig::DefaultAccountState {
            state: AccountState::Frozen,
        }) = self.configs.get(&ExtensionKind::DefaultAccountState)
        {
            if self.freeze_authority.is_none() {
                return Err(ComposeError::configuration(
                    "freeze_authority",
                    "default-frozen accounts need a freeze authority to ever thaw them",
                ));
            }
        }

        let kinds = self.requested_kinds();
        extension::check(&kinds).map_err(ComposeError::Compatibility)?;

        let mut layout = MintLayout::compute(&kinds, self.metadata.as_ref())?;
        debug!(
            kinds = kinds.len(),
            total_size = layout.total_size,
            "composition validated"
        );

        // First and only collaborator call during planning.
        layout.required_funding = ledger.minimum_funding(layout.total_size).await?;

        // Fresh identity, scoped to exactly this build.
        let mint = Keypair::new();

        // Self-hosted metadata implies a pointer at the mint itself; the
        // address only exists now that the identity is generated.
        if self.metadata.is_some() {
            self.configs.insert(
                ExtensionKind::MetadataPointer,
                ExtensionConfig::MetadataPointer(MetadataPointerParams {
                    metadata_address: mint.pubkey(),
                    authority: Some(self.mint_authority),
                }),
            );
        }

        let step_kinds = extension::resolve(
            &kinds,
            self.metadata.as_ref().map(|m| m.additional.len()),
        );
        extension::sanity_check_step_order(&step_kinds).map_err(ComposeError::Internal)?;

        let ctx = EmitContext {
            payer: *payer,
            mint: mint.pubkey(),
            decimals: self.decimals,
            mint_authority: self.mint_authority,
            freeze_authority: self.freeze_authority,
            configs: &self.configs,
            metadata: self.metadata.as_ref(),
            layout: &layout,
        };
        let steps = step_kinds
            .into_iter()
            .map(|kind| {
                materialize(kind, &ctx).map(|instruction| InitStep { kind, instruction })
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            mint = %mint.pubkey(),
            steps = steps.len(),
            funding = layout.required_funding,
            "mint plan resolved"
        );
        Ok(MintPlan::new(mint, *payer, layout, steps))
    }

    /// Plan and submit in one call: the resulting bundle is signed by the fee
    /// payer, the generated mint keypair, and any feature-specific authority
    /// signers, then submitted atomically.
    pub async fn execute(
        self,
        ledger: &dyn LedgerClient,
        payer: &Keypair,
        authority_signers: &[&Keypair],
    ) -> Result<MintReceipt, ComposeError> {
        let plan = self.plan(ledger, &payer.pubkey()).await?;
        plan.submit(ledger, payer, authority_signers).await
    }

    fn attach(mut self, config: ExtensionConfig) -> Result<Self, ComposeError> {
        let kind = config.kind();
        if self.configs.contains_key(&kind) {
            return Err(ComposeError::configuration(
                "extension",
                format!("{kind} is already attached"),
            ));
        }
        self.configs.insert(kind, config);
        Ok(self)
    }
}

fn check_budget(field: &'static str, len: usize, max: usize) -> Result<(), ComposeError> {
    if len > max {
        return Err(ComposeError::configuration(
            field,
            format!("{len} bytes exceeds the {max}-byte budget"),
        ));
    }
    Ok(())
}

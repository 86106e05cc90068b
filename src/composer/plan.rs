//! Plan output
//!
//! A [`MintPlan`] is the side-effect-free result of planning: the generated
//! mint identity, the derived layout, and the tagged step sequence ready for
//! atomic submission. Callers either hand it to [`MintPlan::submit`] or pull
//! the instructions out and wrap submission themselves.

use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};
use tracing::{info, warn};

use crate::composer::errors::ComposeError;
use crate::extension::{MintLayout, StepKind};
use crate::ledger::LedgerClient;

/// One materialized step: the abstract tag plus its concrete instruction.
#[derive(Debug, Clone)]
pub struct InitStep {
    pub kind: StepKind,
    pub instruction: Instruction,
}

/// Successful execution result.
#[derive(Debug)]
pub struct MintReceipt {
    /// Address of the newly created mint
    pub mint: Pubkey,
    /// Confirmation handle for the atomic bundle
    pub signature: Signature,
}

/// A fully resolved, not-yet-submitted mint creation.
///
/// The mint keypair is generated fresh per plan and scoped to exactly this
/// build; a failed submission abandons it, never retries it.
#[derive(Debug)]
pub struct MintPlan {
    mint: Keypair,
    payer: Pubkey,
    layout: MintLayout,
    steps: Vec<InitStep>,
}

impl MintPlan {
    pub(super) fn new(
        mint: Keypair,
        payer: Pubkey,
        layout: MintLayout,
        steps: Vec<InitStep>,
    ) -> Self {
        Self {
            mint,
            payer,
            layout,
            steps,
        }
    }

    /// Address of the mint this plan will create.
    pub fn mint_address(&self) -> Pubkey {
        self.mint.pubkey()
    }

    /// Fee payer the allocation step draws funding from.
    pub fn payer(&self) -> Pubkey {
        self.payer
    }

    /// Derived byte layout and funding requirement.
    pub fn layout(&self) -> &MintLayout {
        &self.layout
    }

    /// The tagged step sequence.
    pub fn steps(&self) -> &[InitStep] {
        &self.steps
    }

    /// Step tags only, for order assertions and logging.
    pub fn step_kinds(&self) -> Vec<StepKind> {
        self.steps.iter().map(|s| s.kind).collect()
    }

    /// Instructions in submission order, for callers wrapping their own
    /// submission logic.
    pub fn instructions(&self) -> Vec<Instruction> {
        self.steps.iter().map(|s| s.instruction.clone()).collect()
    }

    /// Submit the plan as one atomic bundle and await confirmation.
    ///
    /// Signed by the fee payer, the mint keypair, and any feature-specific
    /// authority signers the caller supplies. A rejection is terminal for
    /// this plan's mint identity.
    pub async fn submit(
        self,
        ledger: &dyn LedgerClient,
        payer: &Keypair,
        authority_signers: &[&Keypair],
    ) -> Result<MintReceipt, ComposeError> {
        if payer.pubkey() != self.payer {
            return Err(ComposeError::configuration(
                "payer",
                format!(
                    "plan was built for payer {}, got {}",
                    self.payer,
                    payer.pubkey()
                ),
            ));
        }

        let mut signers: Vec<&Keypair> = Vec::with_capacity(2 + authority_signers.len());
        signers.push(payer);
        signers.push(&self.mint);
        signers.extend_from_slice(authority_signers);

        let mint = self.mint.pubkey();
        let result = ledger
            .submit_atomic(self.instructions(), &self.payer, &signers)
            .await;
        match result {
            Ok(signature) => {
                info!(%mint, %signature, steps = self.steps.len(), "mint creation confirmed");
                Ok(MintReceipt { mint, signature })
            }
            Err(err) => {
                // The identity is burned either way; the bundle is
                // all-or-nothing so there is no partial state to recover.
                warn!(%mint, error = %err, "mint creation rejected, identity abandoned");
                Err(ComposeError::Submission(err))
            }
        }
    }
}

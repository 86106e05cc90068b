//! Step materialization
//!
//! Turns each abstract step from the order resolver into its concrete
//! on-chain instruction. All account math and funding amounts come from the
//! already-computed layout; this module adds no decisions of its own.

use std::collections::BTreeMap;

use solana_sdk::{instruction::Instruction, pubkey::Pubkey, system_instruction};
use spl_token_2022::{
    extension::{default_account_state, interest_bearing_mint, metadata_pointer, transfer_fee, transfer_hook},
    instruction as token_instruction,
};
use spl_token_metadata_interface::state::Field;

use crate::composer::errors::ComposeError;
use crate::extension::{ExtensionConfig, ExtensionKind, MintLayout, StepKind};
use crate::metadata::MetadataSpec;

/// Everything a step needs to become an instruction.
pub(super) struct EmitContext<'a> {
    pub payer: Pubkey,
    pub mint: Pubkey,
    pub decimals: u8,
    pub mint_authority: Pubkey,
    pub freeze_authority: Option<Pubkey>,
    pub configs: &'a BTreeMap<ExtensionKind, ExtensionConfig>,
    pub metadata: Option<&'a MetadataSpec>,
    pub layout: &'a MintLayout,
}

pub(super) fn materialize(
    step: StepKind,
    ctx: &EmitContext<'_>,
) -> Result<Instruction, ComposeError> {
    let token_program = spl_token_2022::id();
    match step {
        StepKind::Allocate => Ok(system_instruction::create_account(
            &ctx.payer,
            &ctx.mint,
            ctx.layout.required_funding,
            ctx.layout.allocated_size() as u64,
            &token_program,
        )),

        StepKind::Declare(kind) => {
            let config = ctx.configs.get(&kind).ok_or_else(|| {
                ComposeError::Internal(format!("no config attached for declared {kind}"))
            })?;
            declare(config, &ctx.mint).map_err(|e| {
                ComposeError::Internal(format!("encoding {kind} declaration: {e}"))
            })
        }

        StepKind::InitializeBase => token_instruction::initialize_mint2(
            &token_program,
            &ctx.mint,
            &ctx.mint_authority,
            ctx.freeze_authority.as_ref(),
            ctx.decimals,
        )
        .map_err(|e| ComposeError::Internal(format!("encoding base initialization: {e}"))),

        StepKind::InitializeMetadata => {
            let meta = metadata_or_bug(ctx)?;
            Ok(spl_token_metadata_interface::instruction::initialize(
                &token_program,
                &ctx.mint,
                &ctx.mint_authority,
                &ctx.mint,
                &ctx.mint_authority,
                meta.name.clone(),
                meta.symbol.clone(),
                meta.uri.clone(),
            ))
        }

        StepKind::UpdateMetadataField(index) => {
            let meta = metadata_or_bug(ctx)?;
            let (key, value) = meta.additional.get(index).ok_or_else(|| {
                ComposeError::Internal(format!("metadata field index {index} out of range"))
            })?;
            Ok(spl_token_metadata_interface::instruction::update_field(
                &token_program,
                &ctx.mint,
                &ctx.mint_authority,
                Field::Key(key.clone()),
                value.clone(),
            ))
        }
    }
}

fn metadata_or_bug<'a>(ctx: &'a EmitContext<'_>) -> Result<&'a MetadataSpec, ComposeError> {
    ctx.metadata.ok_or_else(|| {
        ComposeError::Internal("metadata step resolved without metadata attached".to_string())
    })
}

fn declare(
    config: &ExtensionConfig,
    mint: &Pubkey,
) -> Result<Instruction, solana_sdk::program_error::ProgramError> {
    let token_program = spl_token_2022::id();
    match config {
        ExtensionConfig::TransferFee(params) => {
            transfer_fee::instruction::initialize_transfer_fee_config(
                &token_program,
                mint,
                params.fee_authority.as_ref(),
                params.withdraw_authority.as_ref(),
                params.fee_basis_points,
                params.maximum_fee,
            )
        }
        ExtensionConfig::PermanentDelegate { delegate } => {
            token_instruction::initialize_permanent_delegate(&token_program, mint, delegate)
        }
        ExtensionConfig::InterestBearing(params) => interest_bearing_mint::instruction::initialize(
            &token_program,
            mint,
            params.rate_authority,
            params.rate_basis_points,
        ),
        ExtensionConfig::TransferHook(params) => transfer_hook::instruction::initialize(
            &token_program,
            mint,
            params.authority,
            Some(params.program_id),
        ),
        ExtensionConfig::NonTransferable => {
            token_instruction::initialize_non_transferable_mint(&token_program, mint)
        }
        ExtensionConfig::DefaultAccountState { state } => {
            default_account_state::instruction::initialize_default_account_state(
                &token_program,
                mint,
                state,
            )
        }
        ExtensionConfig::MintCloseAuthority { close_authority } => {
            token_instruction::initialize_mint_close_authority(
                &token_program,
                mint,
                Some(close_authority),
            )
        }
        ExtensionConfig::MetadataPointer(params) => metadata_pointer::instruction::initialize(
            &token_program,
            mint,
            params.authority,
            Some(params.metadata_address),
        ),
    }
}

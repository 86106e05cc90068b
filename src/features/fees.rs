//! Withheld-fee collection for fee-on-transfer mints

use solana_sdk::{instruction::Instruction, pubkey::Pubkey};
use spl_token_2022::extension::transfer_fee;

use super::{FeatureError, Mint};
use crate::extension::ExtensionKind;

/// Move fees withheld on `sources` back onto the mint, permissionlessly.
pub fn harvest_to_mint(mint: &Mint, sources: &[Pubkey]) -> Result<Vec<Instruction>, FeatureError> {
    mint.require(ExtensionKind::TransferFee)?;
    let mint_address = mint.address();
    let source_refs: Vec<&Pubkey> = sources.iter().collect();
    let ix = transfer_fee::instruction::harvest_withheld_tokens_to_mint(
        &spl_token_2022::id(),
        &mint_address,
        &source_refs,
    )
    .map_err(|e| FeatureError::Encode {
        mint: mint_address,
        reason: e.to_string(),
    })?;
    Ok(vec![ix])
}

/// Withdraw fees withheld on `sources` into `destination`, authorized by the
/// withdraw-withheld authority.
pub fn withdraw_withheld(
    mint: &Mint,
    destination: &Pubkey,
    withdraw_authority: &Pubkey,
    sources: &[Pubkey],
) -> Result<Vec<Instruction>, FeatureError> {
    mint.require(ExtensionKind::TransferFee)?;
    let mint_address = mint.address();
    let source_refs: Vec<&Pubkey> = sources.iter().collect();
    let ix = transfer_fee::instruction::withdraw_withheld_tokens_from_accounts(
        &spl_token_2022::id(),
        &mint_address,
        destination,
        withdraw_authority,
        &[],
        &source_refs,
    )
    .map_err(|e| FeatureError::Encode {
        mint: mint_address,
        reason: e.to_string(),
    })?;
    Ok(vec![ix])
}

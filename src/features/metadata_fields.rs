//! Metadata field updates for metadata-bearing mints

use solana_sdk::{instruction::Instruction, pubkey::Pubkey};
use spl_token_metadata_interface::state::Field;

use super::{FeatureError, Mint};
use crate::extension::ExtensionKind;

/// Map a field key onto the interface's field enum; the three reserved keys
/// address the base fields, everything else is an additional pair.
fn field_for(key: &str) -> Field {
    match key {
        "name" => Field::Name,
        "symbol" => Field::Symbol,
        "uri" => Field::Uri,
        other => Field::Key(other.to_string()),
    }
}

/// Set one metadata field (base or additional) on a self-hosted metadata
/// mint, authorized by the metadata update authority.
pub fn update_field(
    mint: &Mint,
    update_authority: &Pubkey,
    key: &str,
    value: &str,
) -> Result<Vec<Instruction>, FeatureError> {
    mint.require(ExtensionKind::MetadataPointer)?;
    Ok(vec![spl_token_metadata_interface::instruction::update_field(
        &spl_token_2022::id(),
        &mint.address(),
        update_authority,
        field_for(key),
        value.to_string(),
    )])
}

/// Remove one additional metadata pair by key.
pub fn remove_field(
    mint: &Mint,
    update_authority: &Pubkey,
    key: &str,
    idempotent: bool,
) -> Result<Vec<Instruction>, FeatureError> {
    mint.require(ExtensionKind::MetadataPointer)?;
    Ok(vec![spl_token_metadata_interface::instruction::remove_key(
        &spl_token_2022::id(),
        &mint.address(),
        update_authority,
        key.to_string(),
        idempotent,
    )])
}

//! Delegated transfers for permanent-delegate mints

use solana_sdk::{instruction::Instruction, pubkey::Pubkey};
use spl_associated_token_account::get_associated_token_address_with_program_id;
use spl_token_2022::instruction as token_instruction;

use super::{FeatureError, Mint};
use crate::extension::ExtensionKind;

/// Associated token account holding `owner`'s balance of this mint.
pub fn holding_address(mint: &Mint, owner: &Pubkey) -> Pubkey {
    get_associated_token_address_with_program_id(owner, &mint.address(), &spl_token_2022::id())
}

/// Move `amount` base units from `source` to `destination` under the
/// permanent delegate's authority, regardless of holder consent.
pub fn delegated_transfer(
    mint: &Mint,
    source: &Pubkey,
    destination: &Pubkey,
    delegate: &Pubkey,
    amount: u64,
) -> Result<Vec<Instruction>, FeatureError> {
    mint.require(ExtensionKind::PermanentDelegate)?;
    let mint_address = mint.address();
    let ix = token_instruction::transfer_checked(
        &spl_token_2022::id(),
        source,
        &mint_address,
        destination,
        delegate,
        &[],
        amount,
        mint.decimals(),
    )
    .map_err(|e| FeatureError::Encode {
        mint: mint_address,
        reason: e.to_string(),
    })?;
    Ok(vec![ix])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::test_data::mint_account;

    #[test]
    fn transfer_requires_the_delegate_extension() {
        let plain = Mint::from_account_data(Pubkey::new_unique(), &mint_account(9, &[])).unwrap();
        let err = delegated_transfer(
            &plain,
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            1,
        )
        .unwrap_err();
        assert!(matches!(err, FeatureError::MissingExtension { .. }));
    }

    #[test]
    fn transfer_uses_the_mints_decimals() {
        // permanent delegate is type 12
        let mint = Mint::from_account_data(
            Pubkey::new_unique(),
            &mint_account(4, &[(12, vec![0u8; 32])]),
        )
        .unwrap();
        let ixs = delegated_transfer(
            &mint,
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            10,
        )
        .unwrap();
        // transfer_checked encodes decimals as the trailing data byte
        assert_eq!(*ixs[0].data.last().unwrap(), 4);
    }

    #[test]
    fn holding_address_is_deterministic() {
        let mint = Mint::from_account_data(Pubkey::new_unique(), &mint_account(9, &[])).unwrap();
        let owner = Pubkey::new_unique();
        assert_eq!(holding_address(&mint, &owner), holding_address(&mint, &owner));
    }
}

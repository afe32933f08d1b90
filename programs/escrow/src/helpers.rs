use anchor_lang::prelude::*;
use anchor_lang::error::ErrorCode;
use anchor_spl::token::{
    close_account, transfer_checked, CloseAccount, Mint, Token, TokenAccount, TransferChecked,
};

use crate::{constants::ESCROW_SEED, state::Escrow};

/// Move the whole vault balance to `destination`, then close the vault and
/// return its rent to `maker`. Returns the amount released.
pub fn release_vault<'info>(
    escrow: &Account<'info, Escrow>,
    vault: &Account<'info, TokenAccount>,
    mint_a: &Account<'info, Mint>,
    destination: AccountInfo<'info>,
    maker: AccountInfo<'info>,
    token_program: &Program<'info, Token>,
) -> Result<u64> {
    // The stored bump must still sign for the record it lives in
    require_keys_eq!(escrow.address()?, escrow.key(), ErrorCode::ConstraintSeeds);

    let seed_bytes = escrow.seed.to_le_bytes();
    let signer_seeds: &[&[&[u8]]] = &[&[
        ESCROW_SEED,
        escrow.maker.as_ref(),
        &seed_bytes,
        &[escrow.bump],
    ]];
    let amount = vault.amount;

    let cpi_accounts = TransferChecked {
        from: vault.to_account_info(),
        mint: mint_a.to_account_info(),
        to: destination,
        authority: escrow.to_account_info(),
    };
    let cpi_ctx =
        CpiContext::new_with_signer(token_program.to_account_info(), cpi_accounts, signer_seeds);
    transfer_checked(cpi_ctx, amount, mint_a.decimals)?;

    let cpi_accounts = CloseAccount {
        account: vault.to_account_info(),
        destination: maker,
        authority: escrow.to_account_info(),
    };
    let cpi_ctx =
        CpiContext::new_with_signer(token_program.to_account_info(), cpi_accounts, signer_seeds);
    close_account(cpi_ctx)?;

    msg!("Released {} from vault {}", amount, vault.key());
    Ok(amount)
}

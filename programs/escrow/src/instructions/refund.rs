use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::{
    constants::ESCROW_SEED, errors::EscrowError, events::EscrowRefunded, helpers::release_vault,
    state::Escrow,
};

#[derive(Accounts)]
pub struct Refund<'info> {
    /// Must be the maker stored in the escrow
    #[account(mut)]
    pub maker: Signer<'info>,

    #[account(
        mut,
        close = maker,
        has_one = maker @ EscrowError::Unauthorized,
        has_one = mint_a @ EscrowError::TypeMismatch,
        seeds = [ESCROW_SEED, escrow.maker.as_ref(), escrow.seed.to_le_bytes().as_ref()],
        bump = escrow.bump,
    )]
    pub escrow: Account<'info, Escrow>,

    pub mint_a: Account<'info, Mint>,

    #[account(
        mut,
        associated_token::mint = mint_a,
        associated_token::authority = escrow,
    )]
    pub vault: Account<'info, TokenAccount>,

    /// Maker's Token A account, receives the refund
    #[account(
        init_if_needed,
        payer = maker,
        associated_token::mint = mint_a,
        associated_token::authority = maker,
    )]
    pub maker_ata_a: Account<'info, TokenAccount>,

    pub associated_token_program: Program<'info, AssociatedToken>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

impl<'info> Refund<'info> {
    /// Withdraw all Token A from vault back to maker and close the vault
    pub fn refund_and_close_vault(&mut self) -> Result<u64> {
        release_vault(
            &self.escrow,
            &self.vault,
            &self.mint_a,
            self.maker_ata_a.to_account_info(),
            self.maker.to_account_info(),
            &self.token_program,
        )
    }
}

pub fn refund(ctx: Context<Refund>) -> Result<()> {
    let amount = ctx.accounts.refund_and_close_vault()?;

    emit!(EscrowRefunded {
        escrow: ctx.accounts.escrow.key(),
        maker: ctx.accounts.maker.key(),
        amount,
    });
    Ok(())
}

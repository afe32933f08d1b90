use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{transfer_checked, Mint, Token, TokenAccount, TransferChecked},
};

use crate::{
    constants::ESCROW_SEED,
    errors::EscrowError,
    events::EscrowTaken,
    helpers::release_vault,
    state::{check_funds, Escrow},
};

#[derive(Accounts)]
pub struct Take<'info> {
    /// Any party willing to pay the requested Token B
    #[account(mut)]
    pub taker: Signer<'info>,

    /// The original maker, receives Token B and both rent deposits
    #[account(mut)]
    pub maker: SystemAccount<'info>,

    /// Escrow record, closed to the maker once both legs settle
    #[account(
        mut,
        close = maker,
        has_one = maker @ EscrowError::InvalidMaker,
        has_one = mint_a @ EscrowError::TypeMismatch,
        has_one = mint_b @ EscrowError::TypeMismatch,
        seeds = [ESCROW_SEED, escrow.maker.as_ref(), escrow.seed.to_le_bytes().as_ref()],
        bump = escrow.bump,
    )]
    pub escrow: Box<Account<'info, Escrow>>,

    pub mint_a: Box<Account<'info, Mint>>,

    pub mint_b: Box<Account<'info, Mint>>,

    #[account(
        mut,
        associated_token::mint = mint_a,
        associated_token::authority = escrow,
    )]
    pub vault: Box<Account<'info, TokenAccount>>,

    /// Taker's Token A account, receives the vault
    #[account(
        init_if_needed,
        payer = taker,
        associated_token::mint = mint_a,
        associated_token::authority = taker,
    )]
    pub taker_ata_a: Box<Account<'info, TokenAccount>>,

    /// Taker's Token B account, pays the maker
    #[account(
        mut,
        associated_token::mint = mint_b,
        associated_token::authority = taker,
    )]
    pub taker_ata_b: Box<Account<'info, TokenAccount>>,

    /// Maker's Token B account, created on demand at the taker's expense
    #[account(
        init_if_needed,
        payer = taker,
        associated_token::mint = mint_b,
        associated_token::authority = maker,
    )]
    pub maker_ata_b: Box<Account<'info, TokenAccount>>,

    pub associated_token_program: Program<'info, AssociatedToken>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

impl<'info> Take<'info> {
    /// Transfer Token B from taker to maker
    pub fn transfer_to_maker(&mut self) -> Result<()> {
        let cpi_accounts = TransferChecked {
            from: self.taker_ata_b.to_account_info(),
            mint: self.mint_b.to_account_info(),
            to: self.maker_ata_b.to_account_info(),
            authority: self.taker.to_account_info(),
        };
        let cpi_ctx = CpiContext::new(self.token_program.to_account_info(), cpi_accounts);

        transfer_checked(cpi_ctx, self.escrow.receive, self.mint_b.decimals)
    }

    /// Withdraw Token A from vault to taker, then close the vault
    pub fn withdraw_and_close_vault(&mut self) -> Result<u64> {
        release_vault(
            &self.escrow,
            &self.vault,
            &self.mint_a,
            self.taker_ata_a.to_account_info(),
            self.maker.to_account_info(),
            &self.token_program,
        )
    }
}

pub fn take(ctx: Context<Take>) -> Result<()> {
    // Validate the taker's leg before either leg moves
    check_funds(ctx.accounts.taker_ata_b.amount, ctx.accounts.escrow.receive)?;

    ctx.accounts.transfer_to_maker()?;
    let deposit = ctx.accounts.withdraw_and_close_vault()?;

    let accounts = &ctx.accounts;
    emit!(EscrowTaken {
        escrow: accounts.escrow.key(),
        maker: accounts.maker.key(),
        taker: accounts.taker.key(),
        deposit,
        receive: accounts.escrow.receive,
    });
    Ok(())
}

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{transfer_checked, Mint, Token, TokenAccount, TransferChecked},
};

use crate::{
    constants::ESCROW_SEED,
    events::EscrowMade,
    state::{check_funds, check_terms, Escrow},
};

#[derive(Accounts)]
#[instruction(seed: u64)]
pub struct Make<'info> {
    /// The maker who sets exchange terms and deposits Token A
    #[account(mut)]
    pub maker: Signer<'info>,

    /// Escrow account that stores the exchange terms; `init` rejects a seed
    /// that is still in use
    #[account(
        init,
        payer = maker,
        space = Escrow::SPACE,
        seeds = [ESCROW_SEED, maker.key().as_ref(), seed.to_le_bytes().as_ref()],
        bump,
    )]
    pub escrow: Account<'info, Escrow>,

    /// Token A mint (the token the maker deposits)
    pub mint_a: Account<'info, Mint>,

    /// Token B mint (the token the maker wants to receive)
    pub mint_b: Account<'info, Mint>,

    /// Maker's associated token account for Token A (source of deposit)
    #[account(
        mut,
        associated_token::mint = mint_a,
        associated_token::authority = maker,
    )]
    pub maker_ata_a: Account<'info, TokenAccount>,

    /// Vault owned by the escrow PDA, holds the deposit until take or refund
    #[account(
        init,
        payer = maker,
        associated_token::mint = mint_a,
        associated_token::authority = escrow,
    )]
    pub vault: Account<'info, TokenAccount>,

    pub associated_token_program: Program<'info, AssociatedToken>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

impl<'info> Make<'info> {
    pub fn init_escrow(&mut self, seed: u64, receive: u64, bumps: &MakeBumps) -> Result<()> {
        self.escrow.set_inner(Escrow {
            maker: self.maker.key(),
            seed,
            mint_a: self.mint_a.key(),
            mint_b: self.mint_b.key(),
            receive,
            bump: bumps.escrow,
        });
        Ok(())
    }

    /// Transfer Token A from maker to vault
    pub fn deposit(&mut self, amount: u64) -> Result<()> {
        let cpi_accounts = TransferChecked {
            from: self.maker_ata_a.to_account_info(),
            mint: self.mint_a.to_account_info(),
            to: self.vault.to_account_info(),
            authority: self.maker.to_account_info(),
        };
        let cpi_ctx = CpiContext::new(self.token_program.to_account_info(), cpi_accounts);

        transfer_checked(cpi_ctx, amount, self.mint_a.decimals)?;

        msg!("Deposited {} into vault {}", amount, self.vault.key());
        Ok(())
    }
}

pub fn make(ctx: Context<Make>, seed: u64, deposit: u64, receive: u64) -> Result<()> {
    check_terms(deposit, receive)?;
    check_funds(ctx.accounts.maker_ata_a.amount, deposit)?;

    ctx.accounts.init_escrow(seed, receive, &ctx.bumps)?;
    ctx.accounts.deposit(deposit)?;

    let accounts = &ctx.accounts;
    emit!(EscrowMade {
        escrow: accounts.escrow.key(),
        maker: accounts.maker.key(),
        seed,
        mint_a: accounts.mint_a.key(),
        mint_b: accounts.mint_b.key(),
        deposit,
        receive,
    });
    Ok(())
}

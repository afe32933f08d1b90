use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod helpers;
pub mod instructions;
pub mod state;

use instructions::*;

declare_id!("GeU7HnjpetDf4NazA71uNaCkyt8QdbrggHPupFx3gNP6");

#[program]
pub mod escrow {
    use super::*;

    /// Open an escrow: maker deposits `deposit` of Token A and asks for
    /// `receive` of Token B in return
    #[instruction(discriminator = 0)]
    pub fn make(ctx: Context<Make>, seed: u64, deposit: u64, receive: u64) -> Result<()> {
        instructions::make::make(ctx, seed, deposit, receive)
    }

    /// Settle the escrow: taker pays Token B, receives the vaulted Token A
    #[instruction(discriminator = 1)]
    pub fn take(ctx: Context<Take>) -> Result<()> {
        instructions::take::take(ctx)
    }

    /// Cancel the escrow: maker reclaims the vaulted Token A
    #[instruction(discriminator = 2)]
    pub fn refund(ctx: Context<Refund>) -> Result<()> {
        instructions::refund::refund(ctx)
    }
}

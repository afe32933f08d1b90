use anchor_lang::prelude::*;
use anchor_lang::error::ErrorCode;
use anchor_spl::associated_token::get_associated_token_address;

use crate::{constants::ESCROW_SEED, errors::EscrowError};

/// Escrow account that stores all the exchange terms
#[account(discriminator = 1)]
#[derive(InitSpace, Debug, PartialEq)]
pub struct Escrow {
    /// The maker's wallet address (creator of the escrow, sole refund authority)
    pub maker: Pubkey,
    /// Maker-chosen seed, lets one maker keep several escrows open
    pub seed: u64,
    /// Token A mint address (the token maker deposits)
    pub mint_a: Pubkey,
    /// Token B mint address (the token maker wants to receive)
    pub mint_b: Pubkey,
    /// Amount of Token B the maker wants to receive
    pub receive: u64,
    /// Canonical bump of the escrow PDA
    pub bump: u8,
}

impl Escrow {
    /// Account size including the discriminator
    pub const SPACE: usize = Escrow::DISCRIMINATOR.len() + Escrow::INIT_SPACE;

    /// Derive the escrow PDA for `(maker, seed)`
    pub fn find_address(maker: &Pubkey, seed: u64) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[ESCROW_SEED, maker.as_ref(), &seed.to_le_bytes()],
            &crate::ID,
        )
    }

    /// Derive the vault: the escrow's associated token account for `mint_a`
    pub fn vault_address(escrow: &Pubkey, mint_a: &Pubkey) -> Pubkey {
        get_associated_token_address(escrow, mint_a)
    }

    /// Re-derive this record's address from its stored maker, seed and bump
    pub fn address(&self) -> Result<Pubkey> {
        Pubkey::create_program_address(
            &[
                ESCROW_SEED,
                self.maker.as_ref(),
                &self.seed.to_le_bytes(),
                &[self.bump],
            ],
            &crate::ID,
        )
        .map_err(|_| error!(ErrorCode::ConstraintSeeds))
    }
}

/// Both sides of the trade must be non-zero
pub fn check_terms(deposit: u64, receive: u64) -> Result<()> {
    require_gt!(deposit, 0, EscrowError::InvalidTerms);
    require_gt!(receive, 0, EscrowError::InvalidTerms);
    Ok(())
}

/// `balance` must cover `amount` before any leg moves
pub fn check_funds(balance: u64, amount: u64) -> Result<()> {
    require_gte!(balance, amount, EscrowError::InsufficientFunds);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;
    use anchor_spl::{associated_token::AssociatedToken, token::Token};

    fn code(err: Error) -> u32 {
        match err {
            Error::AnchorError(e) => e.error_code_number,
            Error::ProgramError(e) => panic!("unexpected program error: {e:?}"),
        }
    }

    fn sample(maker: Pubkey, seed: u64) -> Escrow {
        let (_, bump) = Escrow::find_address(&maker, seed);
        Escrow {
            maker,
            seed,
            mint_a: Pubkey::new_unique(),
            mint_b: Pubkey::new_unique(),
            receive: 2_000_000,
            bump,
        }
    }

    #[test]
    fn escrow_address_is_deterministic() {
        let maker = Pubkey::new_unique();
        assert_eq!(Escrow::find_address(&maker, 1), Escrow::find_address(&maker, 1));
    }

    #[test]
    fn escrow_address_depends_on_maker_and_seed() {
        let maker = Pubkey::new_unique();
        let other = Pubkey::new_unique();
        let (a, _) = Escrow::find_address(&maker, 1);
        let (b, _) = Escrow::find_address(&maker, 2);
        let (c, _) = Escrow::find_address(&other, 1);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
    }

    #[test]
    fn escrow_address_uses_little_endian_seed() {
        let maker = Pubkey::new_unique();
        let (expected, _) = Pubkey::find_program_address(
            &[b"escrow", maker.as_ref(), &[1, 0, 0, 0, 0, 0, 0, 0]],
            &crate::ID,
        );
        assert_eq!(Escrow::find_address(&maker, 1).0, expected);
    }

    #[test]
    fn stored_bump_reproduces_address() {
        let maker = Pubkey::new_unique();
        let escrow = sample(maker, 42);
        let (expected, _) = Escrow::find_address(&maker, 42);
        assert_eq!(escrow.address().unwrap(), expected);
    }

    #[test]
    fn tampered_record_does_not_reproduce_address() {
        let maker = Pubkey::new_unique();
        let (expected, _) = Escrow::find_address(&maker, 42);
        let mut escrow = sample(maker, 42);
        escrow.seed = 43;
        assert_ne!(escrow.address().ok(), Some(expected));
    }

    #[test]
    fn vault_address_is_deterministic_per_mint() {
        let (escrow, _) = Escrow::find_address(&Pubkey::new_unique(), 7);
        let mint_a = Pubkey::new_unique();
        let mint_b = Pubkey::new_unique();
        assert_eq!(
            Escrow::vault_address(&escrow, &mint_a),
            Escrow::vault_address(&escrow, &mint_a)
        );
        assert_ne!(
            Escrow::vault_address(&escrow, &mint_a),
            Escrow::vault_address(&escrow, &mint_b)
        );
    }

    #[test]
    fn vault_address_is_the_escrow_token_ata() {
        let (escrow, _) = Escrow::find_address(&Pubkey::new_unique(), 7);
        let mint_a = Pubkey::new_unique();
        let (expected, _) = Pubkey::find_program_address(
            &[escrow.as_ref(), Token::id().as_ref(), mint_a.as_ref()],
            &AssociatedToken::id(),
        );
        assert_eq!(Escrow::vault_address(&escrow, &mint_a), expected);
    }

    #[test]
    fn account_layout() {
        assert_eq!(Escrow::INIT_SPACE, 32 + 8 + 32 + 32 + 8 + 1);
        assert_eq!(Escrow::SPACE, 114);

        let escrow = sample(Pubkey::new_unique(), 0x0102);
        let mut data = Vec::new();
        escrow.try_serialize(&mut data).unwrap();

        assert_eq!(data.len(), Escrow::SPACE);
        assert_eq!(&data[..1], &[1]);
        assert_eq!(&data[1..33], escrow.maker.as_ref());
        assert_eq!(&data[33..41], &0x0102u64.to_le_bytes());
        assert_eq!(&data[41..73], escrow.mint_a.as_ref());
        assert_eq!(&data[73..105], escrow.mint_b.as_ref());
        assert_eq!(&data[105..113], &2_000_000u64.to_le_bytes());
        assert_eq!(data[113], escrow.bump);

        let decoded = Escrow::try_deserialize(&mut data.as_slice()).unwrap();
        assert_eq!(decoded, escrow);
    }

    #[test]
    fn zero_amounts_are_invalid_terms() {
        assert!(check_terms(5, 2).is_ok());
        assert_eq!(code(check_terms(0, 2).unwrap_err()), 6000);
        assert_eq!(code(check_terms(5, 0).unwrap_err()), 6000);
    }

    #[test]
    fn short_balance_is_insufficient_funds() {
        assert!(check_funds(5, 5).is_ok());
        assert!(check_funds(6, 5).is_ok());
        assert_eq!(
            code(check_funds(4, 5).unwrap_err()),
            u32::from(EscrowError::InsufficientFunds)
        );
    }
}

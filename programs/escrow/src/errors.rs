use anchor_lang::prelude::*;

/// Program-specific failures.
///
/// A reused seed on `make` is rejected by the system program ("already in
/// use") and a closed escrow on `take`/`refund` fails deserialization with
/// `AccountNotInitialized`; neither needs a custom code.
#[error_code]
pub enum EscrowError {
    #[msg("Invalid terms: deposit and receive amounts must be greater than zero")]
    InvalidTerms,
    #[msg("Invalid maker: maker does not match escrow maker")]
    InvalidMaker,
    #[msg("Unauthorized: only the escrow maker may refund")]
    Unauthorized,
    #[msg("Type mismatch: mint does not match the escrow terms")]
    TypeMismatch,
    #[msg("Insufficient funds in source token account")]
    InsufficientFunds,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(u32::from(EscrowError::InvalidTerms), 6000);
        assert_eq!(u32::from(EscrowError::InvalidMaker), 6001);
        assert_eq!(u32::from(EscrowError::Unauthorized), 6002);
        assert_eq!(u32::from(EscrowError::TypeMismatch), 6003);
        assert_eq!(u32::from(EscrowError::InsufficientFunds), 6004);
    }
}

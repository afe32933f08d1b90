/// Domain tag of the escrow record PDA
pub const ESCROW_SEED: &[u8] = b"escrow";

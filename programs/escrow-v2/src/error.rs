use anchor_lang::prelude::*;

#[error_code]
pub enum EscrowError {
    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Signer is not the authority of this escrow")]
    Unauthorized,

    #[msg("Token account balance is too low for the transfer")]
    InsufficientFunds,

    #[msg("Escrow buffer ended before the record was complete")]
    Truncated,
}

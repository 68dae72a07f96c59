use anchor_lang::prelude::*;

declare_id!("fqj2TjuPyPpW8a3biqpgfCJn2bWqmGGrDws4uvv8LFZ");

pub mod constants;
pub use constants::*;
pub mod error;
pub use error::*;
pub mod pda;
pub mod state;
pub use state::*;
pub mod contexts;
pub use contexts::*;
#[cfg(not(target_os = "solana"))]
pub mod client;

#[program]
pub mod escrow_v2 {
    use super::*;

    /// Locks `amount_a` of the maker's token in a program-owned vault and records
    /// the `amount_b` of the other token the maker wants in return
    pub fn open(ctx: Context<Open>, amount_a: u64, amount_b: u64) -> Result<()> {
        validate_amounts(amount_a, amount_b)?;
        ctx.accounts.save_escrow(amount_a, amount_b, &ctx.bumps)?;
        ctx.accounts.deposit(amount_a)
    }

    /// Returns the vaulted tokens to the maker and closes the escrow
    /// Only the maker who opened the escrow may call this
    pub fn cancel(ctx: Context<Cancel>) -> Result<()> {
        ctx.accounts.refund_and_close_vault()
    }

    /// Settles the swap: the taker pays `amount_b` to the maker and receives the
    /// vaulted `amount_a`, then both escrow accounts are closed
    pub fn exchange(ctx: Context<Exchange>) -> Result<()> {
        ctx.accounts.pay_maker()?;
        ctx.accounts.withdraw_and_close_vault()
    }
}

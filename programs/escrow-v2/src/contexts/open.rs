use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::{Escrow, EscrowError, ESCROW_SEED, VAULT_SEED};

/// Accounts needed to open an escrow: the maker, both mints, the maker's token
/// account for the deposited mint, and the two program-derived accounts created here
#[derive(Accounts)]
#[instruction(amount_a: u64, amount_b: u64)]
pub struct Open<'info> {
    /// Escrow record, addressed by the offer terms so the same maker can hold
    /// offers with different amounts side by side
    #[account(
        init,
        payer = authority,
        space = Escrow::MIN_ENCODED_LEN,
        seeds = [
            ESCROW_SEED,
            amount_a.to_le_bytes().as_ref(),
            amount_b.to_le_bytes().as_ref(),
            authority.key().as_ref(),
        ],
        bump,
    )]
    pub escrow: Account<'info, Escrow>,

    /// Token account holding the deposit; only the escrow PDA can move funds out of it
    #[account(
        init,
        payer = authority,
        seeds = [VAULT_SEED, escrow.key().as_ref()],
        bump,
        token::mint = mint_token_maker,
        token::authority = escrow,
        token::token_program = token_program,
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    /// The maker, who signs, pays for both accounts and funds the deposit
    #[account(mut)]
    pub authority: Signer<'info>,

    /// The maker's token account for `mint_token_maker`, debited by `amount_a`
    #[account(
        mut,
        constraint = token_account_maker.mint == mint_token_maker.key(),
        constraint = token_account_maker.owner == authority.key(),
    )]
    pub token_account_maker: InterfaceAccount<'info, TokenAccount>,

    /// Mint of the deposited token (asset X)
    #[account(mint::token_program = token_program)]
    pub mint_token_maker: InterfaceAccount<'info, Mint>,

    /// Mint the maker wants in return (asset Y)
    #[account(mint::token_program = token_program)]
    pub mint_token_taker: InterfaceAccount<'info, Mint>,

    /// Token program owning both mints; SPL Token or Token-2022
    pub token_program: Interface<'info, TokenInterface>,
    /// Creates the escrow and vault accounts
    pub system_program: Program<'info, System>,
    /// Rent sysvar for the rent-exempt balance of the new accounts
    pub rent: Sysvar<'info, Rent>,
}

/// Both sides of an offer must be non-zero.
pub fn validate_amounts(amount_a: u64, amount_b: u64) -> Result<()> {
    require!(amount_a > 0, EscrowError::InvalidAmount);
    require!(amount_b > 0, EscrowError::InvalidAmount);
    Ok(())
}

impl<'info> Open<'info> {
    pub fn save_escrow(&mut self, amount_a: u64, amount_b: u64, bumps: &OpenBumps) -> Result<()> {
        self.escrow.set_inner(Escrow {
            authority: self.authority.key(),
            mint_token_maker: self.mint_token_maker.key(),
            mint_token_taker: self.mint_token_taker.key(),
            amount_a,
            amount_b,
            escrow_bump: bumps.escrow,
            vault_bump: bumps.vault,
            vec_u8: Vec::new(),
            vec_u16: Vec::new(),
        });
        Ok(())
    }

    /// Moves `amount_a` from the maker into the vault
    pub fn deposit(&mut self, amount_a: u64) -> Result<()> {
        require_gte!(
            self.token_account_maker.amount,
            amount_a,
            EscrowError::InsufficientFunds
        );

        let transfer_accounts = TransferChecked {
            from: self.token_account_maker.to_account_info(),
            mint: self.mint_token_maker.to_account_info(),
            to: self.vault.to_account_info(),
            authority: self.authority.to_account_info(),
        };
        let cpi_ctx = CpiContext::new(self.token_program.to_account_info(), transfer_accounts);
        transfer_checked(cpi_ctx, amount_a, self.mint_token_maker.decimals)?;

        msg!(
            "Escrow {} opened: {} of {} for {} of {}",
            self.escrow.key(),
            amount_a,
            self.mint_token_maker.key(),
            self.escrow.amount_b,
            self.mint_token_taker.key()
        );
        Ok(())
    }
}

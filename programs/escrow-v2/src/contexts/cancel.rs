use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    close_account, transfer_checked, CloseAccount, Mint, TokenAccount, TokenInterface,
    TransferChecked,
};

use crate::{Escrow, EscrowError, ESCROW_SEED, VAULT_SEED};

/// Accounts for the maker to take back the deposit of an open escrow
#[derive(Accounts)]
pub struct Cancel<'info> {
    /// The escrow being cancelled; closed to the maker once the vault is emptied.
    /// A second cancel fails here because the account no longer exists
    #[account(
        mut,
        constraint = escrow.authority == authority.key() @ EscrowError::Unauthorized,
        seeds = [
            ESCROW_SEED,
            escrow.amount_a.to_le_bytes().as_ref(),
            escrow.amount_b.to_le_bytes().as_ref(),
            escrow.authority.as_ref(),
        ],
        bump = escrow.escrow_bump,
        close = authority,
    )]
    pub escrow: Account<'info, Escrow>,

    /// Vault holding the deposit; emptied into the refund account and closed
    #[account(
        mut,
        seeds = [VAULT_SEED, escrow.key().as_ref()],
        bump = escrow.vault_bump,
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    /// The maker; must be the authority recorded in the escrow
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Receives the refund
    #[account(
        mut,
        constraint = token_account_maker.mint == escrow.mint_token_maker,
        constraint = token_account_maker.owner == authority.key(),
    )]
    pub token_account_maker: InterfaceAccount<'info, TokenAccount>,

    /// Mint of the deposit, needed for its decimals
    #[account(address = escrow.mint_token_maker)]
    pub mint_token_maker: InterfaceAccount<'info, Mint>,

    /// Token program that owns the vault
    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> Cancel<'info> {
    /// Sends the whole vault balance back to the maker, then closes the vault
    /// and returns its rent to the maker
    pub fn refund_and_close_vault(&mut self) -> Result<()> {
        let amount_a = self.escrow.amount_a.to_le_bytes();
        let amount_b = self.escrow.amount_b.to_le_bytes();
        let signer_seeds: [&[&[u8]]; 1] = [&[
            ESCROW_SEED,
            &amount_a[..],
            &amount_b[..],
            self.escrow.authority.as_ref(),
            &[self.escrow.escrow_bump],
        ]];

        let refunded = self.vault.amount;
        let transfer_accounts = TransferChecked {
            from: self.vault.to_account_info(),
            mint: self.mint_token_maker.to_account_info(),
            to: self.token_account_maker.to_account_info(),
            authority: self.escrow.to_account_info(),
        };
        let ctx = CpiContext::new_with_signer(
            self.token_program.to_account_info(),
            transfer_accounts,
            &signer_seeds,
        );
        transfer_checked(ctx, refunded, self.mint_token_maker.decimals)?;

        let close_accounts = CloseAccount {
            account: self.vault.to_account_info(),
            destination: self.authority.to_account_info(),
            authority: self.escrow.to_account_info(),
        };
        let ctx = CpiContext::new_with_signer(
            self.token_program.to_account_info(),
            close_accounts,
            &signer_seeds,
        );
        close_account(ctx)?;

        msg!("Escrow {} cancelled: {} refunded", self.escrow.key(), refunded);
        Ok(())
    }
}

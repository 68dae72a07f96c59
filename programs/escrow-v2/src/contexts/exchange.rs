use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::get_associated_token_address_with_program_id,
    token_interface::{
        close_account, transfer_checked, CloseAccount, Mint, TokenAccount, TokenInterface,
        TransferChecked,
    },
};

use crate::{Escrow, EscrowError, ESCROW_SEED, VAULT_SEED};

/// Accounts for settling an escrow. `authority` is the taker here; the maker
/// only receives funds and does not sign
#[derive(Accounts)]
pub struct Exchange<'info> {
    /// The escrow being settled; closed to the maker
    #[account(
        mut,
        constraint = escrow.authority == maker.key(),
        seeds = [
            ESCROW_SEED,
            escrow.amount_a.to_le_bytes().as_ref(),
            escrow.amount_b.to_le_bytes().as_ref(),
            escrow.authority.as_ref(),
        ],
        bump = escrow.escrow_bump,
        close = maker,
    )]
    pub escrow: Box<Account<'info, Escrow>>,

    /// Vault holding the deposit; released to the taker and closed
    #[account(
        mut,
        seeds = [VAULT_SEED, escrow.key().as_ref()],
        bump = escrow.vault_bump,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// The maker who opened the escrow; receives `amount_b` and all reclaimed rent
    #[account(mut)]
    pub maker: SystemAccount<'info>,

    /// The taker
    #[account(mut)]
    pub authority: Signer<'info>,

    /// The maker's account for the wanted mint, credited with `amount_b`
    #[account(
        mut,
        constraint = token_account_maker_b.mint == escrow.mint_token_taker,
        constraint = token_account_maker_b.owner == maker.key(),
    )]
    pub token_account_maker_b: Box<InterfaceAccount<'info, TokenAccount>>,

    /// The taker's account for the wanted mint, debited by `amount_b`
    #[account(
        mut,
        constraint = token_account_taker_b.mint == escrow.mint_token_taker,
        constraint = token_account_taker_b.owner == authority.key(),
    )]
    pub token_account_taker_b: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Must be the taker's associated token account for the deposited mint
    #[account(
        mut,
        constraint = token_account_taker_a.mint == escrow.mint_token_maker,
        constraint = token_account_taker_a.owner == authority.key(),
        constraint = token_account_taker_a.key() == get_associated_token_address_with_program_id(
            &authority.key(),
            &escrow.mint_token_maker,
            &token_program.key(),
        ),
    )]
    pub token_account_taker_a: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Mint of the deposit
    #[account(address = escrow.mint_token_maker)]
    pub mint_token_maker: Box<InterfaceAccount<'info, Mint>>,

    /// Mint the maker asked for
    #[account(address = escrow.mint_token_taker)]
    pub mint_token_taker: Box<InterfaceAccount<'info, Mint>>,

    /// Token program that owns both mints and the vault
    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> Exchange<'info> {
    /// Transfers `amount_b` of the wanted mint from the taker to the maker
    pub fn pay_maker(&mut self) -> Result<()> {
        require_gte!(
            self.token_account_taker_b.amount,
            self.escrow.amount_b,
            EscrowError::InsufficientFunds
        );

        let transfer_accounts = TransferChecked {
            from: self.token_account_taker_b.to_account_info(),
            mint: self.mint_token_taker.to_account_info(),
            to: self.token_account_maker_b.to_account_info(),
            authority: self.authority.to_account_info(),
        };
        let cpi_ctx = CpiContext::new(self.token_program.to_account_info(), transfer_accounts);
        transfer_checked(cpi_ctx, self.escrow.amount_b, self.mint_token_taker.decimals)
    }

    /// Releases the vault to the taker and closes it, rent going back to the maker
    pub fn withdraw_and_close_vault(&mut self) -> Result<()> {
        let amount_a = self.escrow.amount_a.to_le_bytes();
        let amount_b = self.escrow.amount_b.to_le_bytes();
        let signer_seeds: [&[&[u8]]; 1] = [&[
            ESCROW_SEED,
            &amount_a[..],
            &amount_b[..],
            self.escrow.authority.as_ref(),
            &[self.escrow.escrow_bump],
        ]];

        let released = self.vault.amount;
        let accounts = TransferChecked {
            from: self.vault.to_account_info(),
            mint: self.mint_token_maker.to_account_info(),
            to: self.token_account_taker_a.to_account_info(),
            authority: self.escrow.to_account_info(),
        };
        let ctx = CpiContext::new_with_signer(
            self.token_program.to_account_info(),
            accounts,
            &signer_seeds,
        );
        transfer_checked(ctx, released, self.mint_token_maker.decimals)?;

        let accounts = CloseAccount {
            account: self.vault.to_account_info(),
            destination: self.maker.to_account_info(),
            authority: self.escrow.to_account_info(),
        };
        let ctx = CpiContext::new_with_signer(
            self.token_program.to_account_info(),
            accounts,
            &signer_seeds,
        );
        close_account(ctx)?;

        msg!(
            "Escrow {} exchanged: {} released to {}, {} paid to {}",
            self.escrow.key(),
            released,
            self.authority.key(),
            self.escrow.amount_b,
            self.maker.key()
        );
        Ok(())
    }
}

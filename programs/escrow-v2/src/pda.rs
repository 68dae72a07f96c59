//! Program-derived addresses of the escrow record and its custody vault.
//!
//! The seed layout is part of the program's external contract:
//!
//! ```text
//! escrow = find_program_address(["escrow", amount_a (LE u64), amount_b (LE u64), authority])
//! vault  = find_program_address(["vault", escrow])
//! ```
//!
//! The returned bump is the canonical one, so the address is off the ed25519
//! curve and no private key can sign for it.

use anchor_lang::prelude::*;

use crate::{ESCROW_SEED, VAULT_SEED};

/// Derives the canonical program address for `tag` followed by `fields`.
pub fn derive(tag: &[u8], fields: &[&[u8]], program_id: &Pubkey) -> (Pubkey, u8) {
    let mut seeds: Vec<&[u8]> = Vec::with_capacity(fields.len() + 1);
    seeds.push(tag);
    seeds.extend_from_slice(fields);
    Pubkey::find_program_address(&seeds, program_id)
}

/// Address and bump of the escrow record for these terms under this program.
pub fn find_escrow_address(amount_a: u64, amount_b: u64, authority: &Pubkey) -> (Pubkey, u8) {
    find_escrow_address_with_program_id(amount_a, amount_b, authority, &crate::ID)
}

/// Same as [`find_escrow_address`] for a program deployed at another id.
pub fn find_escrow_address_with_program_id(
    amount_a: u64,
    amount_b: u64,
    authority: &Pubkey,
    program_id: &Pubkey,
) -> (Pubkey, u8) {
    derive(
        ESCROW_SEED,
        &[
            &amount_a.to_le_bytes(),
            &amount_b.to_le_bytes(),
            authority.as_ref(),
        ],
        program_id,
    )
}

/// Address and bump of the custody vault belonging to `escrow`.
pub fn find_vault_address(escrow: &Pubkey) -> (Pubkey, u8) {
    find_vault_address_with_program_id(escrow, &crate::ID)
}

/// Same as [`find_vault_address`] for a program deployed at another id.
pub fn find_vault_address_with_program_id(escrow: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    derive(VAULT_SEED, &[escrow.as_ref()], program_id)
}

//! Instruction builders for off-chain callers.
//!
//! Every program-derived address is recomputed from the offer terms, so a
//! caller only supplies wallets, token accounts and mints.

use anchor_lang::{
    prelude::*,
    solana_program::{instruction::Instruction, sysvar},
    system_program, InstructionData,
};

use crate::{pda, Escrow};

pub fn open_instruction(
    authority: &Pubkey,
    token_account_maker: &Pubkey,
    mint_token_maker: &Pubkey,
    mint_token_taker: &Pubkey,
    token_program: &Pubkey,
    amount_a: u64,
    amount_b: u64,
) -> Instruction {
    let (escrow, _) = pda::find_escrow_address(amount_a, amount_b, authority);
    let (vault, _) = pda::find_vault_address(&escrow);

    Instruction {
        program_id: crate::ID,
        accounts: crate::accounts::Open {
            escrow,
            vault,
            authority: *authority,
            token_account_maker: *token_account_maker,
            mint_token_maker: *mint_token_maker,
            mint_token_taker: *mint_token_taker,
            token_program: *token_program,
            system_program: system_program::ID,
            rent: sysvar::rent::ID,
        }
        .to_account_metas(None),
        data: crate::instruction::Open { amount_a, amount_b }.data(),
    }
}

pub fn cancel_instruction(
    escrow: &Escrow,
    token_account_maker: &Pubkey,
    token_program: &Pubkey,
) -> Instruction {
    let (escrow_address, _) =
        pda::find_escrow_address(escrow.amount_a, escrow.amount_b, &escrow.authority);
    let (vault, _) = pda::find_vault_address(&escrow_address);

    Instruction {
        program_id: crate::ID,
        accounts: crate::accounts::Cancel {
            escrow: escrow_address,
            vault,
            authority: escrow.authority,
            token_account_maker: *token_account_maker,
            mint_token_maker: escrow.mint_token_maker,
            token_program: *token_program,
        }
        .to_account_metas(None),
        data: crate::instruction::Cancel {}.data(),
    }
}

/// `token_account_taker_a` has to be the taker's associated token account for
/// `escrow.mint_token_maker`; the program rejects anything else.
pub fn exchange_instruction(
    escrow: &Escrow,
    taker: &Pubkey,
    token_account_maker_b: &Pubkey,
    token_account_taker_b: &Pubkey,
    token_account_taker_a: &Pubkey,
    token_program: &Pubkey,
) -> Instruction {
    let (escrow_address, _) =
        pda::find_escrow_address(escrow.amount_a, escrow.amount_b, &escrow.authority);
    let (vault, _) = pda::find_vault_address(&escrow_address);

    Instruction {
        program_id: crate::ID,
        accounts: crate::accounts::Exchange {
            escrow: escrow_address,
            vault,
            maker: escrow.authority,
            authority: *taker,
            token_account_maker_b: *token_account_maker_b,
            token_account_taker_b: *token_account_taker_b,
            token_account_taker_a: *token_account_taker_a,
            mint_token_maker: escrow.mint_token_maker,
            mint_token_taker: escrow.mint_token_taker,
            token_program: *token_program,
        }
        .to_account_metas(None),
        data: crate::instruction::Exchange {}.data(),
    }
}

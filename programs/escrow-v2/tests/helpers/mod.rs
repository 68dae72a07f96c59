use anchor_spl::{associated_token::get_associated_token_address, token::spl_token};
use escrow_v2::{
    pda::{find_escrow_address, find_vault_address},
    Escrow,
};
use litesvm::{types::TransactionResult, LiteSVM};
use solana_sdk::{
    account::Account,
    instruction::{Instruction, InstructionError},
    program_option::COption,
    program_pack::Pack,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::{Transaction, TransactionError},
};

pub const DECIMALS: u8 = 6;
pub const MAKER_X_BALANCE: u64 = 1_000;
pub const TAKER_Y_BALANCE: u64 = 1_000;

const PROGRAM_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../target/deploy/escrow_v2.so"
);

/// A ledger with the escrow program deployed, two mints and two funded wallets.
///
/// The maker starts with `MAKER_X_BALANCE` of mint X and an empty Y account;
/// the taker starts with `TAKER_Y_BALANCE` of mint Y and an empty X account.
/// All token accounts are associated token accounts.
pub struct TestEnvironment {
    pub svm: LiteSVM,
    pub maker: Keypair,
    pub taker: Keypair,
    pub mint_x: Pubkey,
    pub mint_y: Pubkey,
    pub maker_x: Pubkey,
    pub maker_y: Pubkey,
    pub taker_x: Pubkey,
    pub taker_y: Pubkey,
}

pub fn setup() -> TestEnvironment {
    let mut svm = LiteSVM::new();
    svm.add_program_from_file(escrow_v2::ID, PROGRAM_PATH)
        .expect("escrow_v2.so missing; build it with cargo build-sbf");

    let maker = Keypair::new();
    let taker = Keypair::new();
    svm.airdrop(&maker.pubkey(), 10_000_000_000).unwrap();
    svm.airdrop(&taker.pubkey(), 10_000_000_000).unwrap();

    let mint_authority = Pubkey::new_unique();
    let mint_x = create_mint(&mut svm, &mint_authority);
    let mint_y = create_mint(&mut svm, &mint_authority);

    let maker_x = create_token_account(&mut svm, &maker.pubkey(), &mint_x, MAKER_X_BALANCE);
    let maker_y = create_token_account(&mut svm, &maker.pubkey(), &mint_y, 0);
    let taker_x = create_token_account(&mut svm, &taker.pubkey(), &mint_x, 0);
    let taker_y = create_token_account(&mut svm, &taker.pubkey(), &mint_y, TAKER_Y_BALANCE);

    TestEnvironment {
        svm,
        maker,
        taker,
        mint_x,
        mint_y,
        maker_x,
        maker_y,
        taker_x,
        taker_y,
    }
}

pub fn create_mint(svm: &mut LiteSVM, mint_authority: &Pubkey) -> Pubkey {
    let mint = Pubkey::new_unique();
    let mut data = vec![0u8; spl_token::state::Mint::LEN];
    spl_token::state::Mint {
        mint_authority: COption::Some(*mint_authority),
        supply: u64::MAX / 2,
        decimals: DECIMALS,
        is_initialized: true,
        freeze_authority: COption::None,
    }
    .pack_into_slice(&mut data);

    let account = token_program_account(svm, data);
    svm.set_account(mint, account).expect("failed to place mint");
    mint
}

/// Places an initialized token account holding `amount` at the owner's
/// associated token address for `mint`.
pub fn create_token_account(svm: &mut LiteSVM, owner: &Pubkey, mint: &Pubkey, amount: u64) -> Pubkey {
    let address = get_associated_token_address(owner, mint);
    create_token_account_at(svm, &address, owner, mint, amount);
    address
}

pub fn create_token_account_at(
    svm: &mut LiteSVM,
    address: &Pubkey,
    owner: &Pubkey,
    mint: &Pubkey,
    amount: u64,
) {
    let mut data = vec![0u8; spl_token::state::Account::LEN];
    spl_token::state::Account {
        mint: *mint,
        owner: *owner,
        amount,
        delegate: COption::None,
        state: spl_token::state::AccountState::Initialized,
        is_native: COption::None,
        delegated_amount: 0,
        close_authority: COption::None,
    }
    .pack_into_slice(&mut data);

    let account = token_program_account(svm, data);
    svm.set_account(*address, account)
        .expect("failed to place token account");
}

fn token_program_account(svm: &LiteSVM, data: Vec<u8>) -> Account {
    Account {
        lamports: svm.minimum_balance_for_rent_exemption(data.len()),
        data,
        owner: spl_token::ID,
        executable: false,
        rent_epoch: 0,
    }
}

pub fn send(
    svm: &mut LiteSVM,
    instruction: Instruction,
    payer: &Keypair,
    signers: &[&Keypair],
) -> TransactionResult {
    let transaction = Transaction::new_signed_with_payer(
        &[instruction],
        Some(&payer.pubkey()),
        signers,
        svm.latest_blockhash(),
    );
    svm.send_transaction(transaction)
}

/// Extracts the program error code of a failed single-instruction transaction.
pub fn error_code(result: TransactionResult) -> u32 {
    match result {
        Ok(_) => panic!("transaction was expected to fail"),
        Err(failed) => match failed.err {
            TransactionError::InstructionError(0, InstructionError::Custom(code)) => code,
            other => panic!("unexpected transaction error: {other:?}"),
        },
    }
}

/// Logs of a failed transaction, for asserting which account a constraint named.
pub fn failure_logs(result: TransactionResult) -> Vec<String> {
    match result {
        Ok(_) => panic!("transaction was expected to fail"),
        Err(failed) => failed.meta.logs,
    }
}

/// Asserts the transaction failed with `code` and that Anchor blamed `account`.
pub fn assert_rejected(result: TransactionResult, code: u32, account: &str) {
    let failed = result.unwrap_err();
    assert_eq!(
        failed.err,
        TransactionError::InstructionError(0, InstructionError::Custom(code))
    );
    let cause = format!("caused by account: {account}");
    assert!(
        failed.meta.logs.iter().any(|line| line.contains(&cause)),
        "no log line names {account}"
    );
}

/// Current state of `addresses`, for checking a failed instruction left them alone.
pub fn snapshot(svm: &LiteSVM, addresses: &[Pubkey]) -> Vec<Option<Account>> {
    addresses.iter().map(|address| svm.get_account(address)).collect()
}

pub fn token_balance(svm: &LiteSVM, token_account: &Pubkey) -> u64 {
    let account = svm
        .get_account(token_account)
        .expect("token account not found");
    spl_token::state::Account::unpack(&account.data)
        .expect("not a token account")
        .amount
}

pub fn lamports(svm: &LiteSVM, address: &Pubkey) -> u64 {
    svm.get_account(address).map_or(0, |account| account.lamports)
}

/// The runtime drops accounts left without lamports, so zero lamports is closed.
pub fn is_closed(svm: &LiteSVM, address: &Pubkey) -> bool {
    lamports(svm, address) == 0
}

pub fn escrow_addresses(amount_a: u64, amount_b: u64, maker: &Pubkey) -> (Pubkey, Pubkey) {
    let (escrow, _) = find_escrow_address(amount_a, amount_b, maker);
    let (vault, _) = find_vault_address(&escrow);
    (escrow, vault)
}

pub fn read_escrow(svm: &LiteSVM, escrow: &Pubkey) -> Escrow {
    let account = svm.get_account(escrow).expect("escrow account not found");
    let (record, _) = Escrow::decode(&account.data, 0).expect("escrow account did not decode");
    record
}

use anchor_lang::prelude::*;
use anchor_lang::{AccountSerialize, Discriminator};

use crate::EscrowError;

/// Terms of one open swap offer.
///
/// Layout (after the 8-byte account discriminator, little-endian, no padding):
///
/// ```text
/// [0..32]    Pubkey   authority
/// [32..64]   Pubkey   mint_token_maker
/// [64..96]   Pubkey   mint_token_taker
/// [96..104]  u64      amount_a
/// [104..112] u64      amount_b
/// [112]      u8       escrow_bump
/// [113]      u8       vault_bump
/// [114..]    u32 len  vec_u8 bytes
///            u32 len  vec_u16 elements
/// ```
///
/// The record is never mutated after `open`. Closing the account is the only
/// state change, so an escrow that no longer exists is a settled escrow.
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct Escrow {
    pub authority: Pubkey,        // maker, the only signer allowed to cancel
    pub mint_token_maker: Pubkey, // token the maker locked in the vault
    pub mint_token_taker: Pubkey, // token the maker wants in return
    pub amount_a: u64,            // amount of mint_token_maker held by the vault
    pub amount_b: u64,            // amount of mint_token_taker the taker must pay
    pub escrow_bump: u8,          // canonical bump of this account's address
    pub vault_bump: u8,           // canonical bump of the vault's address
    pub vec_u8: Vec<u8>,
    pub vec_u16: Vec<u16>,
}

impl Escrow {
    /// Size of the fixed-width fields.
    pub const FIXED_LEN: usize = 32 + 32 + 32 + 8 + 8 + 1 + 1;

    /// Size of a record whose extension vectors are empty, without discriminator.
    pub const MIN_LEN: usize = Self::FIXED_LEN + 4 + 4;

    /// Smallest buffer `decode` accepts.
    pub const MIN_ENCODED_LEN: usize = 8 + Self::MIN_LEN;

    /// Exact size of `encode(self)`, which is also the account space it needs.
    pub fn encoded_len(&self) -> usize {
        Self::MIN_ENCODED_LEN + self.vec_u8.len() + 2 * self.vec_u16.len()
    }

    /// Serializes the record exactly as it is stored on chain.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.try_serialize(&mut buf)?;
        Ok(buf)
    }

    /// Reads one record starting at `offset`.
    ///
    /// Returns the record and the number of bytes it occupied, so callers can
    /// step to the next record of a packed buffer.
    pub fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let data = buf.get(offset..).ok_or(EscrowError::Truncated)?;
        require!(data.len() >= Self::MIN_ENCODED_LEN, EscrowError::Truncated);

        let (discriminator, mut body) = data.split_at(Self::DISCRIMINATOR.len());
        require!(
            discriminator == &Self::DISCRIMINATOR[..],
            ErrorCode::AccountDiscriminatorMismatch
        );

        // Fixed fields fit by the length check above, so a borsh failure here
        // can only be a vector length running past the end of the buffer.
        let escrow = <Self as AnchorDeserialize>::deserialize(&mut body)
            .map_err(|_| error!(EscrowError::Truncated))?;

        Ok((escrow, data.len() - body.len()))
    }

    /// Decodes every record of a buffer holding records back to back.
    pub fn decode_all(buf: &[u8]) -> Result<Vec<Self>> {
        let mut records = Vec::new();
        let mut offset = 0;
        while offset < buf.len() {
            let (record, consumed) = Self::decode(buf, offset)?;
            records.push(record);
            offset += consumed;
        }
        Ok(records)
    }
}

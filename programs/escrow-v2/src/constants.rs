/// Seed tag of the escrow record address
pub const ESCROW_SEED: &[u8] = b"escrow";

/// Seed tag of the custody vault address
pub const VAULT_SEED: &[u8] = b"vault";

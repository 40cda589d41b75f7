use anchor_lang::prelude::*;

#[constant]
pub const SEED_SALE: &[u8] = b"sale";
#[constant]
pub const SEED_BUYER: &[u8] = b"buyer";
#[constant]
pub const SEED_VAULT: &[u8] = b"vault";

/// Fixed-point precision for USD values and token quantities.
pub const USD_DECIMALS: u8 = 18;
pub const WAD: u128 = 1_000_000_000_000_000_000;

/// Lamports per SOL.
pub const NATIVE_DECIMALS: u8 = 9;

/// Stage sequence capacity of the sale account. Also bounds the receipt size
/// returned from purchases (Solana return data is capped at 1024 bytes).
pub const MAX_STAGES: usize = 20;

/// $50 in 18-decimal USD.
pub const DEFAULT_MIN_PURCHASE_USD: u128 = 50 * WAD;

pub const DEFAULT_ORACLE_MAX_AGE_SECS: u64 = 60;

/// Instruction invoked on the staking manager program for claim-and-stake.
pub const STAKE_DEPOSIT_IX_NAME: &str = "global:deposit_for";

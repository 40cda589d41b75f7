use anchor_lang::prelude::*;

use crate::constants::MAX_STAGES;
use crate::errors::PresaleError;
use crate::state::Stage;

/// Singleton sale account: configuration, lifecycle flags, global totals and
/// the append-only stage sequence.
///
/// `total_tokens_sold` and `total_usd_raised` always equal the sums of the
/// per-stage counters; see [`crate::ledger::verify_conservation`].
#[account]
#[derive(Default)]
pub struct SaleState {
    /// Owner allowed to run lifecycle and configuration instructions
    pub admin: Pubkey,
    /// Receives native and stablecoin payments
    pub treasury: Pubkey,
    /// Mint of the token being sold
    pub token_mint: Pubkey,
    /// Mint of the accepted stablecoin
    pub stable_mint: Pubkey,
    /// Pyth price account for the native coin in USD
    pub native_price_feed: Pubkey,
    /// External staking program used by claim-and-stake
    pub staking_manager: Option<Pubkey>,
    /// Token account that receives staked tokens; set with `staking_manager`
    pub staking_vault: Option<Pubkey>,
    pub token_decimals: u8,
    pub stable_decimals: u8,
    /// Smallest accepted purchase, 18-decimal USD
    pub min_purchase_usd: u128,
    /// Maximum oracle price age in seconds
    pub oracle_max_age_secs: u64,
    /// Stage where the next purchase starts filling
    pub current_stage: u32,
    pub global_pause: bool,
    pub claim_enabled: bool,
    pub total_tokens_sold: u128,
    pub total_usd_raised: u128,
    /// Tokens already paid out by claims (direct or staked)
    pub total_tokens_claimed: u128,
    pub unique_buyers: u64,
    pub bump: u8,
    pub vault_bump: u8,
    pub stages: Vec<Stage>,
}

impl SaleState {
    pub const LEN: usize = 8 +  // discriminator
        32 +  // admin
        32 +  // treasury
        32 +  // token_mint
        32 +  // stable_mint
        32 +  // native_price_feed
        1 + 32 +  // staking_manager
        1 + 32 +  // staking_vault
        1 +   // token_decimals
        1 +   // stable_decimals
        16 +  // min_purchase_usd
        8 +   // oracle_max_age_secs
        4 +   // current_stage
        1 +   // global_pause
        1 +   // claim_enabled
        16 +  // total_tokens_sold
        16 +  // total_usd_raised
        16 +  // total_tokens_claimed
        8 +   // unique_buyers
        1 +   // bump
        1 +   // vault_bump
        4 + Stage::LEN * MAX_STAGES +  // stages
        64;   // padding for future use

    pub fn stages_count(&self) -> u32 {
        self.stages.len() as u32
    }

    pub fn stage(&self, index: u32) -> Result<&Stage> {
        self.stages
            .get(index as usize)
            .ok_or_else(|| error!(PresaleError::IndexOutOfRange))
    }

    pub fn stage_mut(&mut self, index: u32) -> Result<&mut Stage> {
        self.stages
            .get_mut(index as usize)
            .ok_or_else(|| error!(PresaleError::IndexOutOfRange))
    }

    /// The stage purchases currently start from, if the pointer is in range.
    pub fn active_stage(&self) -> Option<&Stage> {
        self.stages.get(self.current_stage as usize)
    }
}

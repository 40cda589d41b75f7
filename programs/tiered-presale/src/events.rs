use anchor_lang::prelude::*;

#[event]
pub struct SaleInitialized {
    pub admin: Pubkey,
    pub treasury: Pubkey,
    pub token_mint: Pubkey,
    pub stable_mint: Pubkey,
    pub stages: u32,
}

#[event]
pub struct StageAdded {
    pub index: u32,
    pub usd_per_token: u128,
    pub cap_tokens: u128,
    pub max_usd_raise: u128,
    pub start_time: i64,
    pub end_time: i64,
    pub paused: bool,
}

#[event]
pub struct StagePauseSet {
    pub index: u32,
    pub paused: bool,
}

#[event]
pub struct StageAdvanced {
    pub from: u32,
    pub to: u32,
}

#[event]
pub struct StageSealed {
    pub index: u32,
    pub sold_tokens: u128,
    pub released_tokens: u128,
    pub next_stage: u32,
}

/// One entry per stage touched, in fill order. The three vectors are parallel.
#[event]
pub struct TokensBoughtSplit {
    pub buyer: Pubkey,
    pub payment_mint: Pubkey,
    pub payment_amount: u64,
    pub usd_total: u128,
    pub tokens_total: u128,
    pub stage_indexes: Vec<u32>,
    pub stage_usd: Vec<u128>,
    pub stage_tokens: Vec<u128>,
}

/// Same as [`TokensBoughtSplit`] for purchases that asked to stake at claim.
#[event]
pub struct TokensBoughtAndStakedSplit {
    pub buyer: Pubkey,
    pub payment_mint: Pubkey,
    pub payment_amount: u64,
    pub usd_total: u128,
    pub tokens_total: u128,
    pub stage_indexes: Vec<u32>,
    pub stage_usd: Vec<u128>,
    pub stage_tokens: Vec<u128>,
}

#[event]
pub struct TokensClaimed {
    pub buyer: Pubkey,
    pub amount: u128,
    /// Base units actually transferred out of the vault
    pub units: u64,
    pub total_claimed: u128,
}

#[event]
pub struct TokensStaked {
    pub buyer: Pubkey,
    pub staking_manager: Pubkey,
    pub amount: u128,
    pub units: u64,
}

#[event]
pub struct ClaimToggled {
    pub enabled: bool,
}

#[event]
pub struct GlobalPauseSet {
    pub paused: bool,
}

#[event]
pub struct ConfigUpdated {
    pub treasury: Pubkey,
    pub min_purchase_usd: u128,
    pub oracle_max_age_secs: u64,
    pub native_price_feed: Pubkey,
}

#[event]
pub struct StakingManagerSet {
    pub staking_manager: Option<Pubkey>,
    pub staking_vault: Option<Pubkey>,
}

#[event]
pub struct UnsoldRescued {
    pub treasury_token_account: Pubkey,
    pub amount: u64,
    pub remaining_liabilities: u128,
}

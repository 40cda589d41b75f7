use anchor_lang::prelude::*;

/// Per-buyer claimable balance and purchase history.
#[account]
#[derive(Default)]
pub struct BuyerAccount {
    /// Buyer's wallet address
    pub owner: Pubkey,
    /// Tokens owed and not yet claimed, zeroed on claim
    pub purchased_unclaimed: u128,
    /// Tokens bought across all purchases
    pub total_purchased: u128,
    /// Tokens paid out by claims
    pub total_claimed: u128,
    /// USD spent across all purchases
    pub usd_spent: u128,
    pub purchase_count: u32,
    /// Whether the latest purchase asked for tokens to be staked at claim
    pub stake_preference: bool,
    /// Set on the first nonzero purchase; drives the unique buyer count
    pub counted: bool,
    /// PDA bump seed
    pub bump: u8,
}

impl BuyerAccount {
    pub const LEN: usize = 8 +  // discriminator
        32 +  // owner
        16 +  // purchased_unclaimed
        16 +  // total_purchased
        16 +  // total_claimed
        16 +  // usd_spent
        4 +   // purchase_count
        1 +   // stake_preference
        1 +   // counted
        1 +   // bump
        32;   // padding for future use
}

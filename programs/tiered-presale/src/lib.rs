use anchor_lang::prelude::*;

pub mod claims;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod ledger;
pub mod lifecycle;
pub mod math;
pub mod oracle;
pub mod pricing;
pub mod state;
pub mod transfers;

#[cfg(test)]
mod testing;

pub use engine::PurchaseReceipt;
pub use errors::PresaleError;
pub use instructions::*;
pub use ledger::OverallStats;
pub use lifecycle::ConfigUpdate;
pub use state::{Stage, StageParams, StageStatus};

declare_id!("5RHGGwn6G9boHwWAXgPM8zyoo9pJhBj66c5van7TUx9i");

// ============================================================================
// PROGRAM
// ============================================================================

#[program]
pub mod tiered_presale {
    use super::*;

    /// Creates the sale account and the token vault, and appends the initial
    /// stages.
    ///
    /// # Security
    /// - Can only be called once (sale account is initialized)
    /// - The signer becomes the sale admin
    pub fn initialize(ctx: Context<Initialize>, params: InitializeParams) -> Result<()> {
        instructions::initialize::initialize(ctx, params)
    }

    // ------------------------------------------------------------------------
    // Purchases
    // ------------------------------------------------------------------------

    /// Buys tokens with SOL priced through the oracle.
    ///
    /// The purchase starts at the current stage and spills into the following
    /// stages only when a stage runs out of token or USD capacity. It is
    /// filled completely or rejected; the receipt lists every stage touched.
    pub fn buy_with_native(
        ctx: Context<BuyWithNative>,
        lamports: u64,
        want_stake: bool,
    ) -> Result<PurchaseReceipt> {
        instructions::buy_native::buy_with_native(ctx, lamports, want_stake)
    }

    /// Buys tokens with the stablecoin at 1:1 USD parity.
    pub fn buy_with_stable(
        ctx: Context<BuyWithStable>,
        amount: u64,
        want_stake: bool,
    ) -> Result<PurchaseReceipt> {
        instructions::buy_stable::buy_with_stable(ctx, amount, want_stake)
    }

    // ------------------------------------------------------------------------
    // Claims
    // ------------------------------------------------------------------------

    /// Claims the caller's unclaimed tokens, directly or into the staking
    /// manager. Returns the amount claimed (18 decimals).
    pub fn claim<'info>(
        ctx: Context<'_, '_, '_, 'info, Claim<'info>>,
        want_stake: bool,
    ) -> Result<u128> {
        instructions::claim::claim(ctx, want_stake)
    }

    // ------------------------------------------------------------------------
    // Stage lifecycle (admin)
    // ------------------------------------------------------------------------

    pub fn add_stage(ctx: Context<AdminOnly>, params: StageParams) -> Result<u32> {
        instructions::stages::add_stage(ctx, params)
    }

    pub fn add_stage_simple(
        ctx: Context<AdminOnly>,
        usd_per_token: u128,
        cap_tokens: u128,
        max_usd_raise: u128,
        paused: bool,
    ) -> Result<u32> {
        instructions::stages::add_stage_simple(ctx, usd_per_token, cap_tokens, max_usd_raise, paused)
    }

    pub fn pause_stage(ctx: Context<AdminOnly>, index: u32, paused: bool) -> Result<()> {
        instructions::stages::pause_stage(ctx, index, paused)
    }

    /// Moves the current stage pointer. Only allowed once the current stage is
    /// sold out, expired or USD-capped.
    pub fn manual_advance(ctx: Context<AdminOnly>, target: u32) -> Result<()> {
        instructions::advance::manual_advance(ctx, target)
    }

    /// Seals the current stage at what it has sold and moves to the next one.
    pub fn cancel_current_stage_and_continue(ctx: Context<AdminOnly>) -> Result<()> {
        instructions::advance::cancel_current_stage_and_continue(ctx)
    }

    /// Like `cancel_current_stage_and_continue`, but refuses paused or
    /// already sold out stages.
    pub fn early_end_and_rollover(ctx: Context<AdminOnly>) -> Result<()> {
        instructions::advance::early_end_and_rollover(ctx)
    }

    // ------------------------------------------------------------------------
    // Sale administration
    // ------------------------------------------------------------------------

    pub fn toggle_claim(ctx: Context<AdminOnly>, enabled: bool) -> Result<()> {
        instructions::admin::toggle_claim(ctx, enabled)
    }

    pub fn set_global_pause(ctx: Context<AdminOnly>, paused: bool) -> Result<()> {
        instructions::admin::set_global_pause(ctx, paused)
    }

    /// Sets or clears the staking program and the token account that
    /// receives claim-and-stake deposits.
    pub fn set_staking_manager(
        ctx: Context<AdminOnly>,
        staking_manager: Option<Pubkey>,
        staking_vault: Option<Pubkey>,
    ) -> Result<()> {
        instructions::admin::set_staking_manager(ctx, staking_manager, staking_vault)
    }

    pub fn update_config(ctx: Context<UpdateConfig>, update: ConfigUpdate) -> Result<()> {
        instructions::update_config::update_config(ctx, update)
    }

    /// Sends unsold vault tokens to the treasury, never dipping into tokens
    /// still owed to buyers.
    pub fn rescue_unsold_to_treasury(ctx: Context<RescueUnsold>, amount: u64) -> Result<()> {
        instructions::rescue_unsold::rescue_unsold_to_treasury(ctx, amount)
    }

    // ------------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------------

    pub fn get_stage(ctx: Context<ViewSale>, index: u32) -> Result<Stage> {
        instructions::views::get_stage(ctx, index)
    }

    pub fn stage_status(ctx: Context<ViewSale>, index: u32) -> Result<StageStatus> {
        instructions::views::stage_status(ctx, index)
    }

    pub fn stages_count(ctx: Context<ViewSale>) -> Result<u32> {
        instructions::views::stages_count(ctx)
    }

    pub fn current_stage(ctx: Context<ViewSale>) -> Result<u32> {
        instructions::views::current_stage(ctx)
    }

    pub fn claim_enabled(ctx: Context<ViewSale>) -> Result<bool> {
        instructions::views::claim_enabled(ctx)
    }

    pub fn global_pause(ctx: Context<ViewSale>) -> Result<bool> {
        instructions::views::global_pause(ctx)
    }

    pub fn get_overall_stats(ctx: Context<ViewSale>) -> Result<OverallStats> {
        instructions::views::get_overall_stats(ctx)
    }

    pub fn purchased(ctx: Context<ViewBuyer>, owner: Pubkey) -> Result<u128> {
        instructions::views::purchased(ctx, owner)
    }
}

//! Read-only queries. Values are returned through transaction return data,
//! so clients read them with a simulated transaction.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::ledger::{self, OverallStats};
use crate::state::*;

pub fn get_stage(ctx: Context<ViewSale>, index: u32) -> Result<Stage> {
    ctx.accounts.sale.stage(index).copied()
}

pub fn stage_status(ctx: Context<ViewSale>, index: u32) -> Result<StageStatus> {
    let now = Clock::get()?.unix_timestamp;
    Ok(ctx.accounts.sale.stage(index)?.status(now))
}

pub fn stages_count(ctx: Context<ViewSale>) -> Result<u32> {
    Ok(ctx.accounts.sale.stages_count())
}

pub fn current_stage(ctx: Context<ViewSale>) -> Result<u32> {
    Ok(ctx.accounts.sale.current_stage)
}

pub fn claim_enabled(ctx: Context<ViewSale>) -> Result<bool> {
    Ok(ctx.accounts.sale.claim_enabled)
}

pub fn global_pause(ctx: Context<ViewSale>) -> Result<bool> {
    Ok(ctx.accounts.sale.global_pause)
}

pub fn get_overall_stats(ctx: Context<ViewSale>) -> Result<OverallStats> {
    Ok(ledger::overall_stats(&ctx.accounts.sale))
}

/// Unclaimed balance of `owner`; zero if they never bought.
pub fn purchased(ctx: Context<ViewBuyer>, _owner: Pubkey) -> Result<u128> {
    let info = ctx.accounts.buyer_account.to_account_info();
    if info.data_is_empty() {
        return Ok(0);
    }
    let data = info.try_borrow_data()?;
    let account = BuyerAccount::try_deserialize(&mut &data[..])?;
    Ok(account.purchased_unclaimed)
}

#[derive(Accounts)]
pub struct ViewSale<'info> {
    #[account(
        seeds = [SEED_SALE],
        bump = sale.bump
    )]
    pub sale: Account<'info, SaleState>,
}

#[derive(Accounts)]
#[instruction(owner: Pubkey)]
pub struct ViewBuyer<'info> {
    #[account(
        seeds = [SEED_SALE],
        bump = sale.bump
    )]
    pub sale: Account<'info, SaleState>,

    /// CHECK: Buyer PDA for `owner`; may not exist yet
    #[account(
        seeds = [SEED_BUYER, owner.as_ref()],
        bump
    )]
    pub buyer_account: UncheckedAccount<'info>,
}

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::PresaleError;
use crate::events::{ClaimToggled, GlobalPauseSet, StakingManagerSet};
use crate::lifecycle;
use crate::state::*;

pub fn toggle_claim(ctx: Context<AdminOnly>, enabled: bool) -> Result<()> {
    lifecycle::toggle_claim(&mut ctx.accounts.sale, enabled);
    msg!("Claim enabled: {}", enabled);
    emit!(ClaimToggled { enabled });
    Ok(())
}

pub fn set_global_pause(ctx: Context<AdminOnly>, paused: bool) -> Result<()> {
    lifecycle::set_global_pause(&mut ctx.accounts.sale, paused);
    msg!("Global pause: {}", paused);
    emit!(GlobalPauseSet { paused });
    Ok(())
}

pub fn set_staking_manager(
    ctx: Context<AdminOnly>,
    staking_manager: Option<Pubkey>,
    staking_vault: Option<Pubkey>,
) -> Result<()> {
    lifecycle::set_staking_manager(&mut ctx.accounts.sale, staking_manager, staking_vault)?;
    emit!(StakingManagerSet {
        staking_manager,
        staking_vault,
    });
    Ok(())
}

/// Accounts for owner-only instructions that only touch the sale account.
#[derive(Accounts)]
pub struct AdminOnly<'info> {
    #[account(
        constraint = admin.key() == sale.admin @ PresaleError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_SALE],
        bump = sale.bump
    )]
    pub sale: Account<'info, SaleState>,
}

use anchor_lang::prelude::*;

use crate::events::{StageAdvanced, StageSealed};
use crate::instructions::admin::AdminOnly;
use crate::lifecycle::{self, Rollover};
use crate::state::*;

pub fn manual_advance(ctx: Context<AdminOnly>, target: u32) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let from = lifecycle::manual_advance(&mut ctx.accounts.sale, target, now)?;
    emit!(StageAdvanced { from, to: target });
    Ok(())
}

/// Owner override: closes the current stage whatever its state.
pub fn cancel_current_stage_and_continue(ctx: Context<AdminOnly>) -> Result<()> {
    let rollover = lifecycle::cancel_current_stage_and_continue(&mut ctx.accounts.sale)?;
    emit_rollover(&ctx.accounts.sale, &rollover)
}

pub fn early_end_and_rollover(ctx: Context<AdminOnly>) -> Result<()> {
    let rollover = lifecycle::early_end_and_rollover(&mut ctx.accounts.sale)?;
    emit_rollover(&ctx.accounts.sale, &rollover)
}

fn emit_rollover(sale: &SaleState, rollover: &Rollover) -> Result<()> {
    emit!(StageSealed {
        index: rollover.sealed_stage,
        sold_tokens: sale.stage(rollover.sealed_stage)?.sold_tokens,
        released_tokens: rollover.released_tokens,
        next_stage: rollover.next_stage,
    });
    emit!(StageAdvanced {
        from: rollover.sealed_stage,
        to: rollover.next_stage,
    });
    Ok(())
}

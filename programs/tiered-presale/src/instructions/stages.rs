use anchor_lang::prelude::*;

use crate::events::{StageAdded, StagePauseSet};
use crate::instructions::admin::AdminOnly;
use crate::lifecycle;
use crate::state::*;

pub fn add_stage(ctx: Context<AdminOnly>, params: StageParams) -> Result<u32> {
    let index = lifecycle::add_stage(&mut ctx.accounts.sale, params)?;
    emit_stage_added(index, ctx.accounts.sale.stage(index)?);
    Ok(index)
}

/// Adds a stage that is open from the moment it becomes current.
pub fn add_stage_simple(
    ctx: Context<AdminOnly>,
    usd_per_token: u128,
    cap_tokens: u128,
    max_usd_raise: u128,
    paused: bool,
) -> Result<u32> {
    let index = lifecycle::add_stage_simple(
        &mut ctx.accounts.sale,
        usd_per_token,
        cap_tokens,
        max_usd_raise,
        paused,
    )?;
    emit_stage_added(index, ctx.accounts.sale.stage(index)?);
    Ok(index)
}

pub fn pause_stage(ctx: Context<AdminOnly>, index: u32, paused: bool) -> Result<()> {
    lifecycle::pause_stage(&mut ctx.accounts.sale, index, paused)?;
    msg!("Stage {} paused: {}", index, paused);
    emit!(StagePauseSet { index, paused });
    Ok(())
}

fn emit_stage_added(index: u32, stage: &Stage) {
    emit!(StageAdded {
        index,
        usd_per_token: stage.usd_per_token,
        cap_tokens: stage.cap_tokens,
        max_usd_raise: stage.max_usd_raise,
        start_time: stage.start_time,
        end_time: stage.end_time,
        paused: stage.paused,
    });
}

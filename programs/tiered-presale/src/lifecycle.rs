//! Owner-only mutations of the stage sequence and the sale flags.
//!
//! None of these touch `sold_tokens`, `usd_raised` or the global totals. A
//! rollover only clamps the current stage's cap to what it has sold and moves
//! the pointer; unsold capacity is dropped, never moved into the next stage.

use anchor_lang::prelude::*;

use crate::constants::MAX_STAGES;
use crate::errors::PresaleError;
use crate::ledger::verify_conservation;
use crate::pricing::wad_to_mint_units;
use crate::state::{SaleState, StageParams};

/// Result of sealing the current stage and moving past it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rollover {
    pub sealed_stage: u32,
    /// Capacity dropped by the seal
    pub released_tokens: u128,
    pub next_stage: u32,
}

/// Optional configuration changes. `None` keeps the current value.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigUpdate {
    pub treasury: Option<Pubkey>,
    pub min_purchase_usd: Option<u128>,
    pub oracle_max_age_secs: Option<u64>,
    pub native_price_feed: Option<Pubkey>,
}

/// Appends a stage and returns its index.
pub fn add_stage(sale: &mut SaleState, params: StageParams) -> Result<u32> {
    params.validate()?;
    require!(
        sale.stages.len() < MAX_STAGES,
        PresaleError::StageLimitReached
    );
    ensure_caps_fit_mint(sale, params.cap_tokens)?;
    sale.stages.push(params.into_stage());
    let index = sale.stages_count() - 1;
    msg!("Stage {} added", index);
    Ok(index)
}

/// Claims and rescues move base units as `u64`, so everything the stages
/// could ever sell (`extra_cap` included) has to fit in that range.
fn ensure_caps_fit_mint(sale: &SaleState, extra_cap: u128) -> Result<()> {
    let total_caps = sale
        .stages
        .iter()
        .try_fold(extra_cap, |total, stage| total.checked_add(stage.cap_tokens))
        .ok_or(PresaleError::StageCapsExceedMintRange)?;
    if wad_to_mint_units(total_caps, sale.token_decimals).is_err() {
        msg!(
            "Stage caps total {} which overflows a {}-decimal mint",
            total_caps,
            sale.token_decimals
        );
        return err!(PresaleError::StageCapsExceedMintRange);
    }
    Ok(())
}

/// Appends a stage with no time window.
pub fn add_stage_simple(
    sale: &mut SaleState,
    usd_per_token: u128,
    cap_tokens: u128,
    max_usd_raise: u128,
    paused: bool,
) -> Result<u32> {
    add_stage(
        sale,
        StageParams {
            usd_per_token,
            cap_tokens,
            max_usd_raise,
            start_time: 0,
            end_time: 0,
            paused,
        },
    )
}

pub fn pause_stage(sale: &mut SaleState, index: u32, paused: bool) -> Result<()> {
    sale.stage_mut(index)?.paused = paused;
    Ok(())
}

/// Points the sale at `target`. Only allowed once the current stage can no
/// longer be filled (sold out, expired or USD-capped). Returns the previous
/// index.
pub fn manual_advance(sale: &mut SaleState, target: u32, now: i64) -> Result<u32> {
    require!(
        target < sale.stages_count(),
        PresaleError::IndexOutOfRange
    );
    require!(target != sale.current_stage, PresaleError::SameStage);
    if let Some(current) = sale.active_stage() {
        require!(
            !current.is_fillable(now),
            PresaleError::CurrentStageStillActive
        );
    }

    let previous = sale.current_stage;
    sale.current_stage = target;
    msg!("Current stage moved from {} to {}", previous, target);
    Ok(previous)
}

/// Owner override: seals the current stage whatever its state and moves on.
pub fn cancel_current_stage_and_continue(sale: &mut SaleState) -> Result<Rollover> {
    require!(sale.active_stage().is_some(), PresaleError::NoActiveStage);
    seal_and_advance(sale)
}

/// Ends a running stage early. Paused stages must be cancelled instead.
pub fn early_end_and_rollover(sale: &mut SaleState) -> Result<Rollover> {
    let current = sale.active_stage().ok_or(PresaleError::NoActiveStage)?;
    require!(!current.paused, PresaleError::StagePaused);
    require!(!current.is_sold_out(), PresaleError::NothingToEnd);
    seal_and_advance(sale)
}

fn seal_and_advance(sale: &mut SaleState) -> Result<Rollover> {
    let sealed_stage = sale.current_stage;
    let next_stage = sealed_stage
        .checked_add(1)
        .ok_or(PresaleError::MathOverflow)?;
    let released_tokens = sale.stage_mut(sealed_stage)?.seal();
    sale.current_stage = next_stage;
    verify_conservation(sale)?;

    msg!(
        "Stage {} sealed ({} tokens released), current stage now {}",
        sealed_stage,
        released_tokens,
        next_stage
    );
    Ok(Rollover {
        sealed_stage,
        released_tokens,
        next_stage,
    })
}

pub fn set_global_pause(sale: &mut SaleState, paused: bool) {
    sale.global_pause = paused;
}

pub fn toggle_claim(sale: &mut SaleState, enabled: bool) {
    sale.claim_enabled = enabled;
}

/// Sets the staking program together with the token account it receives
/// stakes in. Both are set or both are cleared.
pub fn set_staking_manager(
    sale: &mut SaleState,
    manager: Option<Pubkey>,
    vault: Option<Pubkey>,
) -> Result<()> {
    require!(
        manager.is_some() == vault.is_some(),
        PresaleError::IncompleteStakingConfig
    );
    sale.staking_manager = manager;
    sale.staking_vault = vault;
    Ok(())
}

pub fn apply_config_update(sale: &mut SaleState, update: &ConfigUpdate) -> Result<()> {
    if let Some(min) = update.min_purchase_usd {
        require!(min > 0, PresaleError::InvalidMinPurchase);
    }
    if let Some(age) = update.oracle_max_age_secs {
        require!(age > 0, PresaleError::InvalidAmount);
    }

    if let Some(treasury) = update.treasury {
        sale.treasury = treasury;
    }
    if let Some(min) = update.min_purchase_usd {
        sale.min_purchase_usd = min;
    }
    if let Some(age) = update.oracle_max_age_secs {
        sale.oracle_max_age_secs = age;
    }
    if let Some(feed) = update.native_price_feed {
        sale.native_price_feed = feed;
    }
    Ok(())
}

//! Purchase engine.
//!
//! A purchase is filled in two phases. [`simulate`] walks the stages from the
//! current pointer and produces the full per-stage breakdown without touching
//! the ledger; [`commit`] applies that breakdown in one step. A purchase is
//! therefore either filled completely or rejected with nothing written.
//!
//! The walk only spills into the next stage when the current one runs out of
//! capacity (token cap or USD cap). A blocked stage anywhere on the walk
//! (paused, outside its window, already exhausted) rejects the whole purchase
//! with that stage's reason; stages are never skipped.

use anchor_lang::prelude::*;

use crate::errors::PresaleError;
use crate::ledger::verify_conservation;
use crate::pricing::{to_usd, tokens_from_usd, usd_for_tokens_ceil, Payment, PriceSource};
use crate::state::{BuyerAccount, SaleState};

/// Portion of a purchase filled from one stage.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct StageFill {
    pub stage_index: u32,
    pub usd: u128,
    pub tokens: u128,
}

/// Full breakdown of a purchase. Produced by [`simulate`] as a plan and
/// returned unchanged as the receipt once committed.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PurchaseReceipt {
    pub tokens_total: u128,
    pub usd_total: u128,
    pub fills: Vec<StageFill>,
}

impl PurchaseReceipt {
    pub fn stage_indexes(&self) -> Vec<u32> {
        self.fills.iter().map(|f| f.stage_index).collect()
    }

    pub fn stage_usd(&self) -> Vec<u128> {
        self.fills.iter().map(|f| f.usd).collect()
    }

    pub fn stage_tokens(&self) -> Vec<u128> {
        self.fills.iter().map(|f| f.tokens).collect()
    }
}

/// Rejects every purchase while the global kill-switch is on.
pub fn ensure_accepting(sale: &SaleState) -> Result<()> {
    require!(!sale.global_pause, PresaleError::GloballyPaused);
    Ok(())
}

/// Converts the payment and plans the fill. Nothing is mutated.
///
/// The oracle is consulted only for native payments and only after the
/// global pause check.
pub fn quote(
    sale: &SaleState,
    payment: Payment,
    oracle: Option<&dyn PriceSource>,
    now: i64,
) -> Result<PurchaseReceipt> {
    require!(payment.amount() > 0, PresaleError::InvalidAmount);
    ensure_accepting(sale)?;
    let usd_amount = to_usd(payment, sale.stable_decimals, oracle)?;
    require!(
        usd_amount >= sale.min_purchase_usd,
        PresaleError::BelowMinimum
    );
    simulate(sale, usd_amount, now)
}

/// Walks the stages from `current_stage` and plans how `usd_amount` fills.
pub fn simulate(sale: &SaleState, usd_amount: u128, now: i64) -> Result<PurchaseReceipt> {
    require!(usd_amount > 0, PresaleError::InvalidAmount);
    require!(
        sale.current_stage < sale.stages_count(),
        PresaleError::SoldOut
    );

    let mut index = sale.current_stage;
    let mut outstanding = usd_amount;
    let mut tokens_total: u128 = 0;
    let mut fills = Vec::new();

    loop {
        let stage = match sale.stages.get(index as usize) {
            Some(stage) => stage,
            None => return err!(PresaleError::SoldOut),
        };
        stage.ensure_open(now)?;

        let remaining_tokens = stage.remaining_tokens();
        let mut fill_usd =
            outstanding.min(usd_for_tokens_ceil(remaining_tokens, stage.usd_per_token)?);
        if let Some(usd_room) = stage.remaining_usd_cap() {
            fill_usd = fill_usd.min(usd_room);
        }
        let tokens = tokens_from_usd(fill_usd, stage.usd_per_token)?.min(remaining_tokens);

        fills.push(StageFill {
            stage_index: index,
            usd: fill_usd,
            tokens,
        });
        tokens_total = tokens_total
            .checked_add(tokens)
            .ok_or(PresaleError::MathOverflow)?;
        outstanding -= fill_usd;

        if outstanding == 0 {
            break;
        }
        // The fill stopped short of the order, so this stage hit its token
        // or USD cap and the rest spills forward.
        msg!(
            "Stage {} exhausted, carrying {} usd to stage {}",
            index,
            outstanding,
            index + 1
        );
        index += 1;
    }

    require!(tokens_total > 0, PresaleError::InvalidAmount);
    Ok(PurchaseReceipt {
        tokens_total,
        usd_total: usd_amount,
        fills,
    })
}

/// Applies a planned purchase to the stages, the global totals and the
/// buyer's claimable balance. Every new value is computed before anything is
/// written, and the conservation invariant is re-checked afterwards.
///
/// Returns true when this purchase made the buyer count as a unique buyer.
pub fn commit(
    sale: &mut SaleState,
    buyer: &mut BuyerAccount,
    plan: &PurchaseReceipt,
    want_stake: bool,
) -> Result<bool> {
    let mut stages = sale.stages.clone();
    for fill in &plan.fills {
        let stage = stages
            .get_mut(fill.stage_index as usize)
            .ok_or(PresaleError::IndexOutOfRange)?;
        stage.sold_tokens = stage
            .sold_tokens
            .checked_add(fill.tokens)
            .ok_or(PresaleError::MathOverflow)?;
        stage.usd_raised = stage
            .usd_raised
            .checked_add(fill.usd)
            .ok_or(PresaleError::MathOverflow)?;
        require!(
            stage.sold_tokens <= stage.cap_tokens,
            PresaleError::StageSoldOut
        );
    }

    let total_tokens_sold = sale
        .total_tokens_sold
        .checked_add(plan.tokens_total)
        .ok_or(PresaleError::MathOverflow)?;
    let total_usd_raised = sale
        .total_usd_raised
        .checked_add(plan.usd_total)
        .ok_or(PresaleError::MathOverflow)?;
    let purchased_unclaimed = buyer
        .purchased_unclaimed
        .checked_add(plan.tokens_total)
        .ok_or(PresaleError::MathOverflow)?;
    let total_purchased = buyer
        .total_purchased
        .checked_add(plan.tokens_total)
        .ok_or(PresaleError::MathOverflow)?;
    let usd_spent = buyer
        .usd_spent
        .checked_add(plan.usd_total)
        .ok_or(PresaleError::MathOverflow)?;
    let purchase_count = buyer
        .purchase_count
        .checked_add(1)
        .ok_or(PresaleError::MathOverflow)?;
    let first_purchase = !buyer.counted && plan.tokens_total > 0;
    let unique_buyers = if first_purchase {
        sale.unique_buyers
            .checked_add(1)
            .ok_or(PresaleError::MathOverflow)?
    } else {
        sale.unique_buyers
    };

    sale.stages = stages;
    sale.total_tokens_sold = total_tokens_sold;
    sale.total_usd_raised = total_usd_raised;
    sale.unique_buyers = unique_buyers;

    buyer.purchased_unclaimed = purchased_unclaimed;
    buyer.total_purchased = total_purchased;
    buyer.usd_spent = usd_spent;
    buyer.purchase_count = purchase_count;
    buyer.stake_preference = want_stake;
    buyer.counted |= first_purchase;

    verify_conservation(sale)?;
    Ok(first_purchase)
}

/// Quote and commit in one call.
pub fn buy(
    sale: &mut SaleState,
    buyer: &mut BuyerAccount,
    payment: Payment,
    want_stake: bool,
    oracle: Option<&dyn PriceSource>,
    now: i64,
) -> Result<PurchaseReceipt> {
    let plan = quote(sale, payment, oracle, now)?;
    commit(sale, buyer, &plan, want_stake)?;
    Ok(plan)
}

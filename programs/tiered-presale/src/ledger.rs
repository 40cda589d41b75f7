//! Read-only aggregates over the sale and the conservation check that backs
//! them.

use anchor_lang::prelude::*;

use crate::errors::PresaleError;
use crate::pricing::{mint_units_to_wad, wad_to_mint_units};
use crate::state::{SaleState, Stage};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OverallStats {
    pub total_tokens_sold: u128,
    pub total_usd_raised: u128,
    pub unique_buyers: u64,
}

pub fn overall_stats(sale: &SaleState) -> OverallStats {
    OverallStats {
        total_tokens_sold: sale.total_tokens_sold,
        total_usd_raised: sale.total_usd_raised,
        unique_buyers: sale.unique_buyers,
    }
}

/// Sums of `sold_tokens` and `usd_raised` over a stage sequence.
pub fn stage_sums(stages: &[Stage]) -> Result<(u128, u128)> {
    stages.iter().try_fold((0u128, 0u128), |(tokens, usd), stage| {
        Ok((
            tokens
                .checked_add(stage.sold_tokens)
                .ok_or(PresaleError::MathOverflow)?,
            usd.checked_add(stage.usd_raised)
                .ok_or(PresaleError::MathOverflow)?,
        ))
    })
}

/// Fails with `LedgerInvariantViolated` unless the global totals equal the
/// per-stage sums and no stage has sold past its cap.
pub fn verify_conservation(sale: &SaleState) -> Result<()> {
    let (tokens, usd) = stage_sums(&sale.stages)?;
    if tokens != sale.total_tokens_sold || usd != sale.total_usd_raised {
        msg!(
            "Ledger mismatch: stages sum to {} tokens / {} usd, totals are {} / {}",
            tokens,
            usd,
            sale.total_tokens_sold,
            sale.total_usd_raised
        );
        return err!(PresaleError::LedgerInvariantViolated);
    }
    require!(
        sale.stages.iter().all(|s| s.sold_tokens <= s.cap_tokens),
        PresaleError::LedgerInvariantViolated
    );
    require!(
        sale.total_tokens_claimed <= sale.total_tokens_sold,
        PresaleError::LedgerInvariantViolated
    );
    Ok(())
}

/// Tokens sold but not yet claimed; the vault must always cover these.
pub fn outstanding_liabilities(sale: &SaleState) -> Result<u128> {
    sale.total_tokens_sold
        .checked_sub(sale.total_tokens_claimed)
        .ok_or_else(|| error!(PresaleError::LedgerInvariantViolated))
}

/// Vault base units that can leave the sale without touching buyers' claims.
pub fn rescuable_units(sale: &SaleState, vault_balance: u64) -> Result<u64> {
    let owed = outstanding_liabilities(sale)?;
    let vault = mint_units_to_wad(vault_balance, sale.token_decimals)?;
    let free = vault.saturating_sub(owed);
    wad_to_mint_units(free, sale.token_decimals)
}

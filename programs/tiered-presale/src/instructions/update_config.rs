use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::PresaleError;
use crate::events::ConfigUpdated;
use crate::lifecycle::{self, ConfigUpdate};
use crate::state::*;

/// Updates runtime configuration. Mints, decimals and the stage sequence are
/// fixed after initialization.
pub fn update_config(ctx: Context<UpdateConfig>, update: ConfigUpdate) -> Result<()> {
    let sale = &mut ctx.accounts.sale;
    lifecycle::apply_config_update(sale, &update)?;

    emit!(ConfigUpdated {
        treasury: sale.treasury,
        min_purchase_usd: sale.min_purchase_usd,
        oracle_max_age_secs: sale.oracle_max_age_secs,
        native_price_feed: sale.native_price_feed,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
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

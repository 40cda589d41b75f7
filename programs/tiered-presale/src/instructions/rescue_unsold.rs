use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::*;
use crate::errors::PresaleError;
use crate::events::UnsoldRescued;
use crate::ledger;
use crate::state::*;
use crate::transfers::VaultPayout;

/// Moves unsold tokens from the vault to the treasury's token account. The
/// vault always keeps enough to cover every buyer's unclaimed balance.
pub fn rescue_unsold_to_treasury(ctx: Context<RescueUnsold>, amount: u64) -> Result<()> {
    require!(amount > 0, PresaleError::InvalidAmount);
    let sale = &ctx.accounts.sale;
    let free = ledger::rescuable_units(sale, ctx.accounts.vault.amount)?;
    require!(amount <= free, PresaleError::InsufficientUnsold);

    let payout = VaultPayout {
        token_program: ctx.accounts.token_program.to_account_info(),
        vault: ctx.accounts.vault.to_account_info(),
        destination: ctx.accounts.treasury_token_account.to_account_info(),
        sale: sale.key(),
        vault_bump: sale.vault_bump,
        token_decimals: sale.token_decimals,
    };
    payout.transfer_units(amount)?;

    let remaining_liabilities = ledger::outstanding_liabilities(sale)?;
    msg!(
        "Rescued {} units, {} tokens still owed to buyers",
        amount,
        remaining_liabilities
    );
    emit!(UnsoldRescued {
        treasury_token_account: ctx.accounts.treasury_token_account.key(),
        amount,
        remaining_liabilities,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct RescueUnsold<'info> {
    #[account(
        constraint = admin.key() == sale.admin @ PresaleError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        seeds = [SEED_SALE],
        bump = sale.bump
    )]
    pub sale: Account<'info, SaleState>,

    #[account(
        mut,
        seeds = [SEED_VAULT, sale.key().as_ref()],
        bump = sale.vault_bump,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = treasury_token_account.owner == sale.treasury @ PresaleError::InvalidTreasuryAccount,
        constraint = treasury_token_account.mint == sale.token_mint @ PresaleError::InvalidTreasuryAccount,
    )]
    pub treasury_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::errors::PresaleError;
use crate::events::{SaleInitialized, StageAdded};
use crate::lifecycle;
use crate::state::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct InitializeParams {
    /// Wallet receiving native and stablecoin payments
    pub treasury: Pubkey,
    /// Pyth native/USD price account
    pub native_price_feed: Pubkey,
    /// Defaults to $50
    pub min_purchase_usd: Option<u128>,
    /// Defaults to 60 seconds
    pub oracle_max_age_secs: Option<u64>,
    pub staking_manager: Option<Pubkey>,
    /// Staking manager's token account; required with `staking_manager`
    pub staking_vault: Option<Pubkey>,
    /// Initial stages, in sale order
    pub stages: Vec<StageParams>,
}

pub fn initialize(ctx: Context<Initialize>, params: InitializeParams) -> Result<()> {
    require!(
        params.stages.len() <= MAX_STAGES,
        PresaleError::StageLimitReached
    );
    let token_decimals = ctx.accounts.token_mint.decimals;
    let stable_decimals = ctx.accounts.stable_mint.decimals;
    require!(
        token_decimals <= USD_DECIMALS && stable_decimals <= USD_DECIMALS,
        PresaleError::InvalidMintDecimals
    );
    let min_purchase_usd = params
        .min_purchase_usd
        .unwrap_or(DEFAULT_MIN_PURCHASE_USD);
    require!(min_purchase_usd > 0, PresaleError::InvalidMinPurchase);
    let oracle_max_age_secs = params
        .oracle_max_age_secs
        .unwrap_or(DEFAULT_ORACLE_MAX_AGE_SECS);
    require!(oracle_max_age_secs > 0, PresaleError::InvalidAmount);

    let sale = &mut ctx.accounts.sale;
    sale.admin = ctx.accounts.admin.key();
    sale.treasury = params.treasury;
    sale.token_mint = ctx.accounts.token_mint.key();
    sale.stable_mint = ctx.accounts.stable_mint.key();
    sale.native_price_feed = params.native_price_feed;
    lifecycle::set_staking_manager(sale, params.staking_manager, params.staking_vault)?;
    sale.token_decimals = token_decimals;
    sale.stable_decimals = stable_decimals;
    sale.min_purchase_usd = min_purchase_usd;
    sale.oracle_max_age_secs = oracle_max_age_secs;

    // Sale state
    sale.current_stage = 0;
    sale.global_pause = false;
    sale.claim_enabled = false;
    sale.total_tokens_sold = 0;
    sale.total_usd_raised = 0;
    sale.total_tokens_claimed = 0;
    sale.unique_buyers = 0;
    sale.bump = ctx.bumps.sale;
    sale.vault_bump = ctx.bumps.vault;

    sale.stages = Vec::with_capacity(params.stages.len());
    for stage in params.stages {
        let index = lifecycle::add_stage(sale, stage)?;
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

    emit!(SaleInitialized {
        admin: sale.admin,
        treasury: sale.treasury,
        token_mint: sale.token_mint,
        stable_mint: sale.stable_mint,
        stages: sale.stages_count(),
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        init,
        payer = admin,
        space = SaleState::LEN,
        seeds = [SEED_SALE],
        bump
    )]
    pub sale: Account<'info, SaleState>,

    /// The token being sold (must already exist)
    pub token_mint: Account<'info, Mint>,

    /// Accepted stablecoin
    pub stable_mint: Account<'info, Mint>,

    /// Vault PDA holding the tokens owed to buyers
    #[account(
        init,
        payer = admin,
        seeds = [SEED_VAULT, sale.key().as_ref()],
        bump,
        token::mint = token_mint,
        token::authority = vault,
    )]
    pub vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::engine::{self, PurchaseReceipt};
use crate::errors::PresaleError;
use crate::instructions::utils::{emit_purchase, open_buyer_account};
use crate::oracle::PythPriceSource;
use crate::pricing::Payment;
use crate::state::*;

/// Buys with SOL. The lamports are priced through the Pyth feed and sent
/// straight to the treasury; nothing is held by the program.
pub fn buy_with_native(
    ctx: Context<BuyWithNative>,
    lamports: u64,
    want_stake: bool,
) -> Result<PurchaseReceipt> {
    let now = Clock::get()?.unix_timestamp;
    let oracle = PythPriceSource {
        feed: &ctx.accounts.price_feed,
        now,
        max_age_secs: ctx.accounts.sale.oracle_max_age_secs,
    };
    let receipt = engine::quote(
        &ctx.accounts.sale,
        Payment::Native(lamports),
        Some(&oracle),
        now,
    )?;

    let buyer = ctx.accounts.buyer.key();
    let buyer_account = &mut ctx.accounts.buyer_account;
    open_buyer_account(buyer_account, buyer, ctx.bumps.buyer_account);
    engine::commit(&mut ctx.accounts.sale, buyer_account, &receipt, want_stake)?;

    // Interactions last
    let transfer_ix = anchor_lang::solana_program::system_instruction::transfer(
        &buyer,
        &ctx.accounts.treasury.key(),
        lamports,
    );
    anchor_lang::solana_program::program::invoke(
        &transfer_ix,
        &[
            ctx.accounts.buyer.to_account_info(),
            ctx.accounts.treasury.to_account_info(),
            ctx.accounts.system_program.to_account_info(),
        ],
    )?;

    emit_purchase(buyer, Pubkey::default(), lamports, &receipt, want_stake);

    Ok(receipt)
}

#[derive(Accounts)]
pub struct BuyWithNative<'info> {
    #[account(mut)]
    pub buyer: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_SALE],
        bump = sale.bump,
    )]
    pub sale: Account<'info, SaleState>,

    #[account(
        init_if_needed,
        payer = buyer,
        space = BuyerAccount::LEN,
        seeds = [SEED_BUYER, buyer.key().as_ref()],
        bump
    )]
    pub buyer_account: Account<'info, BuyerAccount>,

    /// CHECK: Validated against sale.treasury
    #[account(
        mut,
        constraint = treasury.key() == sale.treasury @ PresaleError::InvalidTreasuryAccount
    )]
    pub treasury: AccountInfo<'info>,

    /// CHECK: Validated against sale.native_price_feed, parsed by the Pyth SDK
    #[account(
        constraint = price_feed.key() == sale.native_price_feed @ PresaleError::InvalidPriceFeed
    )]
    pub price_feed: AccountInfo<'info>,

    pub system_program: Program<'info, System>,
}

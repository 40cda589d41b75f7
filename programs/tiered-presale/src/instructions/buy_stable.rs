use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::engine::{self, PurchaseReceipt};
use crate::errors::PresaleError;
use crate::instructions::utils::{emit_purchase, open_buyer_account};
use crate::pricing::Payment;
use crate::state::*;

/// Buys with the stablecoin at 1:1 USD parity. The buyer signs the transfer
/// from their own token account to the treasury's.
pub fn buy_with_stable(
    ctx: Context<BuyWithStable>,
    amount: u64,
    want_stake: bool,
) -> Result<PurchaseReceipt> {
    let now = Clock::get()?.unix_timestamp;
    let receipt = engine::quote(&ctx.accounts.sale, Payment::Stable(amount), None, now)?;

    let buyer = ctx.accounts.buyer.key();
    let buyer_account = &mut ctx.accounts.buyer_account;
    open_buyer_account(buyer_account, buyer, ctx.bumps.buyer_account);
    engine::commit(&mut ctx.accounts.sale, buyer_account, &receipt, want_stake)?;

    let cpi_accounts = Transfer {
        from: ctx.accounts.buyer_stable_account.to_account_info(),
        to: ctx.accounts.treasury_stable_account.to_account_info(),
        authority: ctx.accounts.buyer.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    token::transfer(CpiContext::new(cpi_program, cpi_accounts), amount)?;

    emit_purchase(
        buyer,
        ctx.accounts.stable_mint.key(),
        amount,
        &receipt,
        want_stake,
    );

    Ok(receipt)
}

#[derive(Accounts)]
pub struct BuyWithStable<'info> {
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

    #[account(
        constraint = stable_mint.key() == sale.stable_mint @ PresaleError::InvalidTokenMint
    )]
    pub stable_mint: Account<'info, Mint>,

    #[account(
        mut,
        constraint = buyer_stable_account.owner == buyer.key() @ PresaleError::InvalidTokenAccount,
        constraint = buyer_stable_account.mint == stable_mint.key() @ PresaleError::InvalidTokenAccount,
    )]
    pub buyer_stable_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = treasury_stable_account.owner == sale.treasury @ PresaleError::InvalidTreasuryAccount,
        constraint = treasury_stable_account.mint == stable_mint.key() @ PresaleError::InvalidTreasuryAccount,
    )]
    pub treasury_stable_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

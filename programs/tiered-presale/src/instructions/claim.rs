use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::claims::{self, StakeSink};
use crate::constants::*;
use crate::errors::PresaleError;
use crate::events::{TokensClaimed, TokensStaked};
use crate::state::*;
use crate::transfers::{StakingDeposit, VaultPayout};

/// Pays out the caller's whole unclaimed balance from the vault.
///
/// With `want_stake` the tokens go to the staking manager's token account
/// instead and `deposit_for` is called on the buyer's behalf. The staking
/// program and its token account must then be supplied, plus any accounts
/// the staking program needs as remaining accounts.
pub fn claim<'info>(
    ctx: Context<'_, '_, '_, 'info, Claim<'info>>,
    want_stake: bool,
) -> Result<u128> {
    let accounts = &mut *ctx.accounts;
    let payout = VaultPayout {
        token_program: accounts.token_program.to_account_info(),
        vault: accounts.vault.to_account_info(),
        destination: accounts.buyer_token_account.to_account_info(),
        sale: accounts.sale.key(),
        vault_bump: accounts.sale.vault_bump,
        token_decimals: accounts.sale.token_decimals,
    };
    let mut direct = payout.clone();
    let mut staking = match (&accounts.staking_program, &accounts.staking_token_account) {
        (Some(program), Some(destination)) => Some(StakingDeposit {
            payout: VaultPayout {
                destination: destination.to_account_info(),
                ..payout
            },
            staking_program: program.to_account_info(),
            extra_accounts: ctx.remaining_accounts,
        }),
        _ => None,
    };

    let claimed = claims::claim(
        &mut accounts.sale,
        &mut accounts.buyer_account,
        want_stake,
        &mut direct,
        staking.as_mut().map(|sink| sink as &mut dyn StakeSink),
    )?;

    let buyer = accounts.buyer.key();
    if claimed.staked {
        msg!("Staked {} tokens for {}", claimed.amount, buyer);
        emit!(TokensStaked {
            buyer,
            staking_manager: accounts.sale.staking_manager.unwrap_or_default(),
            amount: claimed.amount,
            units: claimed.units,
        });
    } else {
        msg!("Claimed {} tokens for {}", claimed.amount, buyer);
    }
    emit!(TokensClaimed {
        buyer,
        amount: claimed.amount,
        units: claimed.units,
        total_claimed: accounts.buyer_account.total_claimed,
    });

    Ok(claimed.amount)
}

#[derive(Accounts)]
pub struct Claim<'info> {
    #[account(mut)]
    pub buyer: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_SALE],
        bump = sale.bump,
    )]
    pub sale: Account<'info, SaleState>,

    #[account(
        mut,
        seeds = [SEED_BUYER, buyer.key().as_ref()],
        bump = buyer_account.bump,
        constraint = buyer_account.owner == buyer.key() @ PresaleError::Unauthorized,
    )]
    pub buyer_account: Account<'info, BuyerAccount>,

    #[account(
        mut,
        seeds = [SEED_VAULT, sale.key().as_ref()],
        bump = sale.vault_bump,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        constraint = token_mint.key() == sale.token_mint @ PresaleError::InvalidTokenMint
    )]
    pub token_mint: Account<'info, Mint>,

    /// Buyer's token account for direct claims
    #[account(
        init_if_needed,
        payer = buyer,
        associated_token::mint = token_mint,
        associated_token::authority = buyer,
    )]
    pub buyer_token_account: Account<'info, TokenAccount>,

    /// CHECK: Must match sale.staking_manager; only invoked for claim-and-stake
    #[account(
        constraint = Some(staking_program.key()) == sale.staking_manager
            @ PresaleError::InvalidStakingManager
    )]
    pub staking_program: Option<UncheckedAccount<'info>>,

    /// Staking manager's token account receiving staked tokens
    #[account(
        mut,
        constraint = Some(staking_token_account.key()) == sale.staking_vault
            @ PresaleError::InvalidTokenAccount,
        constraint = staking_token_account.mint == sale.token_mint @ PresaleError::InvalidTokenAccount,
    )]
    pub staking_token_account: Option<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

//! Claim and claim-and-stake.

use anchor_lang::prelude::*;

use crate::errors::PresaleError;
use crate::pricing::wad_to_mint_units;
use crate::state::{BuyerAccount, SaleState};

/// Delivers claimed tokens straight to the beneficiary.
pub trait FungibleLedger {
    fn credit(&mut self, beneficiary: Pubkey, amount: u128) -> Result<()>;
}

/// External staking manager accepting deposits on behalf of a beneficiary.
pub trait StakeSink {
    /// Token account the staked tokens are sent to.
    fn destination(&self) -> Pubkey;
    fn deposit(&mut self, beneficiary: Pubkey, amount: u128) -> Result<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Claimed {
    pub amount: u128,
    /// `amount` in base units of the token mint, as transferred
    pub units: u64,
    pub staked: bool,
}

/// Pays out the buyer's whole unclaimed balance, either to the buyer or into
/// the staking manager.
///
/// The balance is zeroed before any transfer and restored if the delivery
/// fails, so a claim either completes or leaves the buyer untouched. Staked
/// tokens only go to the configured staking vault.
pub fn claim(
    sale: &mut SaleState,
    buyer: &mut BuyerAccount,
    want_stake: bool,
    ledger: &mut dyn FungibleLedger,
    stake: Option<&mut dyn StakeSink>,
) -> Result<Claimed> {
    require!(sale.claim_enabled, PresaleError::ClaimDisabled);
    let amount = buyer.purchased_unclaimed;
    require!(amount > 0, PresaleError::NothingToClaim);
    let units = wad_to_mint_units(amount, sale.token_decimals)?;

    let buyer_claimed = buyer
        .total_claimed
        .checked_add(amount)
        .ok_or(PresaleError::MathOverflow)?;
    let sale_claimed = sale
        .total_tokens_claimed
        .checked_add(amount)
        .ok_or(PresaleError::MathOverflow)?;
    require!(
        sale_claimed <= sale.total_tokens_sold,
        PresaleError::LedgerInvariantViolated
    );

    buyer.purchased_unclaimed = 0;
    let delivered = if want_stake {
        match stake {
            Some(sink) if sale.staking_manager.is_some() => {
                if sale.staking_vault == Some(sink.destination()) {
                    sink.deposit(buyer.owner, amount)
                } else {
                    msg!("Staking destination {} is not the staking vault", sink.destination());
                    err!(PresaleError::InvalidTokenAccount)
                }
            }
            _ => err!(PresaleError::NoStakingManager),
        }
    } else {
        ledger.credit(buyer.owner, amount)
    };
    if let Err(e) = delivered {
        buyer.purchased_unclaimed = amount;
        msg!("Claim of {} for {} rolled back", amount, buyer.owner);
        return Err(e);
    }

    buyer.total_claimed = buyer_claimed;
    sale.total_tokens_claimed = sale_claimed;
    Ok(Claimed {
        amount,
        units,
        staked: want_stake,
    })
}

//! Token movements out of the sale vault.
//!
//! The vault is a PDA token account that is its own authority, so every
//! outgoing transfer signs with `[SEED_VAULT, sale, bump]`.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::{
    hash::hash,
    instruction::{AccountMeta, Instruction},
    program::invoke_signed,
};
use anchor_spl::token::{self, Transfer};

use crate::claims::{FungibleLedger, StakeSink};
use crate::constants::{SEED_VAULT, STAKE_DEPOSIT_IX_NAME};
use crate::errors::PresaleError;
use crate::pricing::wad_to_mint_units;

#[derive(Clone)]
pub struct VaultPayout<'info> {
    pub token_program: AccountInfo<'info>,
    pub vault: AccountInfo<'info>,
    pub destination: AccountInfo<'info>,
    pub sale: Pubkey,
    pub vault_bump: u8,
    pub token_decimals: u8,
}

impl<'info> VaultPayout<'info> {
    /// Moves `units` base units from the vault to `destination`.
    pub fn transfer_units(&self, units: u64) -> Result<()> {
        require!(units > 0, PresaleError::InvalidAmount);
        let bump = [self.vault_bump];
        let seeds = &[SEED_VAULT, self.sale.as_ref(), &bump];
        let signer_seeds = &[&seeds[..]];

        let transfer_ctx = CpiContext::new_with_signer(
            self.token_program.clone(),
            Transfer {
                from: self.vault.clone(),
                to: self.destination.clone(),
                authority: self.vault.clone(),
            },
            signer_seeds,
        );
        token::transfer(transfer_ctx, units)
    }
}

impl FungibleLedger for VaultPayout<'_> {
    fn credit(&mut self, beneficiary: Pubkey, amount: u128) -> Result<()> {
        let units = wad_to_mint_units(amount, self.token_decimals)?;
        msg!("Paying {} units to {}", units, beneficiary);
        self.transfer_units(units)
    }
}

/// Claim-and-stake delivery: funds the staking manager's token account from
/// the vault, then calls its `deposit_for(beneficiary, amount)` with the
/// vault signing as depositor.
pub struct StakingDeposit<'a, 'info> {
    /// Transfer whose destination is the staking manager's token account
    pub payout: VaultPayout<'info>,
    pub staking_program: AccountInfo<'info>,
    /// Extra accounts the staking manager expects, passed through in order
    pub extra_accounts: &'a [AccountInfo<'info>],
}

impl StakeSink for StakingDeposit<'_, '_> {
    fn destination(&self) -> Pubkey {
        self.payout.destination.key()
    }

    fn deposit(&mut self, beneficiary: Pubkey, amount: u128) -> Result<()> {
        let units = wad_to_mint_units(amount, self.payout.token_decimals)?;
        self.payout.transfer_units(units)?;

        let mut accounts = vec![
            AccountMeta::new(self.payout.vault.key(), true),
            AccountMeta::new(self.payout.destination.key(), false),
        ];
        accounts.extend(self.extra_accounts.iter().map(|info| {
            if info.is_writable {
                AccountMeta::new(info.key(), info.is_signer)
            } else {
                AccountMeta::new_readonly(info.key(), info.is_signer)
            }
        }));
        let ix = Instruction {
            program_id: self.staking_program.key(),
            accounts,
            data: deposit_for_data(&beneficiary, units),
        };

        let mut infos = vec![self.payout.vault.clone(), self.payout.destination.clone()];
        infos.extend(self.extra_accounts.iter().cloned());
        infos.push(self.staking_program.clone());

        let bump = [self.payout.vault_bump];
        let seeds = &[SEED_VAULT, self.payout.sale.as_ref(), &bump];
        invoke_signed(&ix, &infos, &[&seeds[..]]).map_err(|e| {
            msg!("Staking manager deposit failed: {:?}", e);
            error!(PresaleError::StakeDepositFailed)
        })
    }
}

/// Anchor-style instruction data: 8-byte sighash, beneficiary, amount (LE).
pub fn deposit_for_data(beneficiary: &Pubkey, units: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(8 + 32 + 8);
    data.extend_from_slice(&hash(STAKE_DEPOSIT_IX_NAME.as_bytes()).to_bytes()[..8]);
    data.extend_from_slice(beneficiary.as_ref());
    data.extend_from_slice(&units.to_le_bytes());
    data
}

//! Fixtures shared by the unit tests.

use anchor_lang::prelude::*;

use crate::constants::{DEFAULT_MIN_PURCHASE_USD, DEFAULT_ORACLE_MAX_AGE_SECS, WAD};
use crate::errors::PresaleError;
use crate::pricing::PriceSource;
use crate::state::{BuyerAccount, SaleState, Stage};

pub const NOW: i64 = 1_700_000_000;

pub struct FixedPrice(pub u128);

impl PriceSource for FixedPrice {
    fn native_usd_price(&self) -> Result<u128> {
        Ok(self.0)
    }
}

pub struct DownOracle;

impl PriceSource for DownOracle {
    fn native_usd_price(&self) -> Result<u128> {
        err!(PresaleError::OracleUnavailable)
    }
}

/// Open-window stage priced in thousandths of a dollar, capped in whole tokens.
pub fn stage(price_milli_usd: u128, cap_whole_tokens: u128) -> Stage {
    Stage {
        usd_per_token: price_milli_usd * WAD / 1000,
        cap_tokens: cap_whole_tokens * WAD,
        ..Default::default()
    }
}

pub fn sale(stages: Vec<Stage>) -> SaleState {
    SaleState {
        admin: Pubkey::new_unique(),
        treasury: Pubkey::new_unique(),
        token_decimals: 9,
        stable_decimals: 6,
        min_purchase_usd: DEFAULT_MIN_PURCHASE_USD,
        oracle_max_age_secs: DEFAULT_ORACLE_MAX_AGE_SECS,
        stages,
        ..Default::default()
    }
}

pub fn buyer() -> BuyerAccount {
    BuyerAccount {
        owner: Pubkey::new_unique(),
        ..Default::default()
    }
}

pub fn usd(dollars: u128) -> u128 {
    dollars * WAD
}

pub fn tokens(whole: u128) -> u128 {
    whole * WAD
}

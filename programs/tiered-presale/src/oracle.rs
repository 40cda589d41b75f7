use anchor_lang::prelude::*;
use pyth_sdk_solana::state::SolanaPriceAccount;

use crate::constants::USD_DECIMALS;
use crate::errors::PresaleError;
use crate::pricing::{pow10, PriceSource};

/// Native/USD price read from a Pyth price account at execution time.
pub struct PythPriceSource<'a, 'info> {
    pub feed: &'a AccountInfo<'info>,
    pub now: i64,
    pub max_age_secs: u64,
}

impl PriceSource for PythPriceSource<'_, '_> {
    fn native_usd_price(&self) -> Result<u128> {
        let price_feed = SolanaPriceAccount::account_info_to_feed(self.feed)
            .map_err(|_| PresaleError::OracleUnavailable)?;
        let price = price_feed
            .get_price_no_older_than(self.now, self.max_age_secs)
            .ok_or(PresaleError::OracleUnavailable)?;
        msg!("Native price: {} (expo {})", price.price, price.expo);
        price_to_wad(price.price, price.expo)
    }
}

/// Rescales a `price * 10^expo` oracle reading to 18 decimals.
pub fn price_to_wad(price: i64, expo: i32) -> Result<u128> {
    require!(price > 0, PresaleError::OracleUnavailable);
    let price = price as u128;
    let shift = expo + USD_DECIMALS as i32;
    let scaled = if shift >= 0 {
        let factor = u8::try_from(shift).map_err(|_| PresaleError::OracleUnavailable)?;
        price
            .checked_mul(pow10(factor)?)
            .ok_or(PresaleError::MathOverflow)?
    } else {
        let factor = u8::try_from(-shift).map_err(|_| PresaleError::OracleUnavailable)?;
        price / pow10(factor)?
    };
    require!(scaled > 0, PresaleError::OracleUnavailable);
    Ok(scaled)
}

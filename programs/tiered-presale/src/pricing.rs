//! Payment-to-USD and USD-to-token conversion.
//!
//! USD values and token quantities are 18-decimal fixed point. Every division
//! truncates toward zero, so a buyer is never credited with fractional dust.

use anchor_lang::prelude::*;

use crate::constants::{NATIVE_DECIMALS, USD_DECIMALS, WAD};
use crate::errors::PresaleError;
use crate::math::{mul_div_ceil, mul_div_floor};

/// Source of the native coin's USD price.
pub trait PriceSource {
    /// USD value of one whole native coin, 18-decimal. Fails with
    /// `OracleUnavailable` when no fresh, positive price exists.
    fn native_usd_price(&self) -> Result<u128>;
}

/// An incoming payment in the currency's own base units.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Payment {
    /// Lamports
    Native(u64),
    /// Stablecoin base units
    Stable(u64),
}

impl Payment {
    pub fn amount(&self) -> u64 {
        match self {
            Payment::Native(amount) | Payment::Stable(amount) => *amount,
        }
    }
}

/// Converts a payment to 18-decimal USD.
///
/// Stablecoins convert at 1:1 parity and never touch the oracle. Native
/// payments fetch a fresh price; without an oracle the call fails.
pub fn to_usd(
    payment: Payment,
    stable_decimals: u8,
    oracle: Option<&dyn PriceSource>,
) -> Result<u128> {
    match payment {
        Payment::Stable(amount) => scale_to_wad(amount as u128, stable_decimals),
        Payment::Native(amount) => {
            let oracle = oracle.ok_or(PresaleError::OracleUnavailable)?;
            let price = oracle.native_usd_price()?;
            mul_div_floor(amount as u128, price, pow10(NATIVE_DECIMALS)?)
        }
    }
}

/// Tokens bought with `usd` at `usd_per_token`, truncated.
pub fn tokens_from_usd(usd: u128, usd_per_token: u128) -> Result<u128> {
    require!(usd_per_token > 0, PresaleError::InvalidStagePrice);
    mul_div_floor(usd, WAD, usd_per_token)
}

/// Smallest USD amount that buys at least `tokens` at `usd_per_token`.
pub fn usd_for_tokens_ceil(tokens: u128, usd_per_token: u128) -> Result<u128> {
    mul_div_ceil(tokens, usd_per_token, WAD)
}

/// Rescales an amount with `decimals` places to 18 decimals.
pub fn scale_to_wad(amount: u128, decimals: u8) -> Result<u128> {
    if decimals <= USD_DECIMALS {
        amount
            .checked_mul(pow10(USD_DECIMALS - decimals)?)
            .ok_or_else(|| error!(PresaleError::MathOverflow))
    } else {
        Ok(amount / pow10(decimals - USD_DECIMALS)?)
    }
}

/// Converts an 18-decimal token quantity to SPL base units of a mint with
/// `mint_decimals` places, truncating sub-unit dust.
pub fn wad_to_mint_units(amount: u128, mint_decimals: u8) -> Result<u64> {
    require!(mint_decimals <= USD_DECIMALS, PresaleError::InvalidMintDecimals);
    let units = amount / pow10(USD_DECIMALS - mint_decimals)?;
    u64::try_from(units).map_err(|_| error!(PresaleError::MathOverflow))
}

/// Inverse of [`wad_to_mint_units`].
pub fn mint_units_to_wad(units: u64, mint_decimals: u8) -> Result<u128> {
    require!(mint_decimals <= USD_DECIMALS, PresaleError::InvalidMintDecimals);
    scale_to_wad(units as u128, mint_decimals)
}

pub(crate) fn pow10(exp: u8) -> Result<u128> {
    10u128
        .checked_pow(exp as u32)
        .ok_or_else(|| error!(PresaleError::MathOverflow))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DownOracle, FixedPrice};
    use anchor_lang::error::Error;

    #[test]
    fn stable_is_rescaled_at_parity() {
        // 100 USDT with 6 decimals
        let usd = to_usd(Payment::Stable(100_000_000), 6, None).unwrap();
        assert_eq!(usd, 100 * WAD);
    }

    #[test]
    fn native_uses_oracle_price() {
        let oracle = FixedPrice(150 * WAD);
        // 0.5 SOL at $150
        let usd = to_usd(Payment::Native(500_000_000), 6, Some(&oracle)).unwrap();
        assert_eq!(usd, 75 * WAD);
    }

    #[test]
    fn native_without_price_fails() {
        assert_eq!(
            to_usd(Payment::Native(1), 6, None).unwrap_err(),
            Error::from(PresaleError::OracleUnavailable)
        );
        assert_eq!(
            to_usd(Payment::Native(1), 6, Some(&DownOracle)).unwrap_err(),
            Error::from(PresaleError::OracleUnavailable)
        );
    }

    #[test]
    fn tokens_truncate_toward_zero() {
        // $0.003 per token, $1 buys 333.333... tokens
        let tokens = tokens_from_usd(WAD, 3 * WAD / 1000).unwrap();
        assert_eq!(tokens, 333_333_333_333_333_333_333);
        assert_eq!(tokens_from_usd(900 * WAD, WAD / 1000).unwrap(), 900_000 * WAD);
    }

    #[test]
    fn ceil_cost_covers_requested_tokens() {
        let price = 3 * WAD / 1000;
        let tokens = 1_000 * WAD + 1;
        let usd = usd_for_tokens_ceil(tokens, price).unwrap();
        assert!(tokens_from_usd(usd, price).unwrap() >= tokens);
        assert!(tokens_from_usd(usd - 1, price).unwrap() < tokens);
        assert_eq!(usd_for_tokens_ceil(100_000 * WAD, WAD / 1000).unwrap(), 100 * WAD);
    }

    #[test]
    fn mint_unit_conversion() {
        assert_eq!(wad_to_mint_units(5 * WAD + 7, 9).unwrap(), 5_000_000_000);
        assert_eq!(mint_units_to_wad(5_000_000_000, 9).unwrap(), 5 * WAD);
        assert_eq!(
            wad_to_mint_units(WAD, 19).unwrap_err(),
            Error::from(PresaleError::InvalidMintDecimals)
        );
    }
}

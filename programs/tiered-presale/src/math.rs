//! `a * b / d` on u128 with a 256-bit intermediate product.
//!
//! 18-decimal amounts overflow u128 as soon as two of them are multiplied
//! (a $1M purchase times `WAD` is already ~1e42), so every scaled product in
//! the ledger goes through these helpers.

use anchor_lang::prelude::*;

use crate::errors::PresaleError;

/// floor(a * b / d)
pub fn mul_div_floor(a: u128, b: u128, d: u128) -> Result<u128> {
    let (quotient, _) = mul_div_rem(a, b, d)?;
    Ok(quotient)
}

/// ceil(a * b / d)
pub fn mul_div_ceil(a: u128, b: u128, d: u128) -> Result<u128> {
    let (quotient, remainder) = mul_div_rem(a, b, d)?;
    if remainder == 0 {
        Ok(quotient)
    } else {
        quotient
            .checked_add(1)
            .ok_or_else(|| error!(PresaleError::MathOverflow))
    }
}

fn mul_div_rem(a: u128, b: u128, d: u128) -> Result<(u128, u128)> {
    require!(d != 0, PresaleError::MathOverflow);
    if let Some(product) = a.checked_mul(b) {
        return Ok((product / d, product % d));
    }
    let (hi, lo) = widening_mul(a, b);
    // quotient must fit in 128 bits
    require!(hi < d, PresaleError::MathOverflow);
    Ok(div_wide(hi, lo, d))
}

/// Full 256-bit product as (high, low) halves.
fn widening_mul(a: u128, b: u128) -> (u128, u128) {
    const MASK: u128 = u64::MAX as u128;
    let (a_lo, a_hi) = (a & MASK, a >> 64);
    let (b_lo, b_hi) = (b & MASK, b >> 64);

    let ll = a_lo * b_lo;
    let lh = a_lo * b_hi;
    let hl = a_hi * b_lo;
    let hh = a_hi * b_hi;

    let mid = (ll >> 64) + (lh & MASK) + (hl & MASK);
    let lo = (ll & MASK) | (mid << 64);
    let hi = hh + (lh >> 64) + (hl >> 64) + (mid >> 64);
    (hi, lo)
}

/// Restoring long division of (hi:lo) by d. Requires hi < d.
fn div_wide(hi: u128, lo: u128, d: u128) -> (u128, u128) {
    let mut rem = hi;
    let mut quotient: u128 = 0;
    for shift in (0..128).rev() {
        let carry = rem >> 127;
        rem = (rem << 1) | ((lo >> shift) & 1);
        quotient <<= 1;
        if carry == 1 || rem >= d {
            rem = rem.wrapping_sub(d);
            quotient |= 1;
        }
    }
    (quotient, rem)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WAD: u128 = 1_000_000_000_000_000_000;

    #[test]
    fn small_products_take_the_fast_path() {
        assert_eq!(mul_div_floor(7, 3, 2).unwrap(), 10);
        assert_eq!(mul_div_ceil(7, 3, 2).unwrap(), 11);
        assert_eq!(mul_div_ceil(8, 3, 2).unwrap(), 12);
    }

    #[test]
    fn wide_products_divide_exactly() {
        // $5M at $0.002 per token
        let usd = 5_000_000 * WAD;
        let tokens = mul_div_floor(usd, WAD, 2 * WAD / 1000).unwrap();
        assert_eq!(tokens, 2_500_000_000 * WAD);

        let back = mul_div_ceil(tokens, 2 * WAD / 1000, WAD).unwrap();
        assert_eq!(back, usd);
    }

    #[test]
    fn wide_products_truncate() {
        let a = u128::MAX / 3;
        let q = mul_div_floor(a, 6, 4).unwrap();
        assert_eq!(q, a / 2 * 3 + (a % 2) * 3 / 2);
        assert_eq!(mul_div_ceil(a, 6, 4).unwrap(), q + 1);
    }

    #[test]
    fn quotient_overflow_and_zero_divisor_fail() {
        assert!(mul_div_floor(u128::MAX, u128::MAX, 1).is_err());
        assert!(mul_div_floor(1, 1, 0).is_err());
    }
}

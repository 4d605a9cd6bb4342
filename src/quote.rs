//! Pure pricing functions shared by the router and off-chain clients.
//!
//! Both sides of the system price trades with the same integer-floor
//! formulas, so a client-side preview can only diverge from execution
//! through an intervening reserve change — never through arithmetic.
//! The functions are pure and never touch exchange state; callers pass
//! in the reserves they observed.
//!
//! The swap fee is a flat 0.3%, realized by scaling the input to
//! 997/1000 before applying the constant-product formula. It is a
//! protocol constant, not a per-pool parameter.

use crate::domain::{Amount, Rounding};
use crate::error::{DexError, Result};
use crate::math::CheckedArithmetic;

/// Fee-retained fraction of every swap input: 997 parts...
pub const SWAP_FEE_NUMERATOR: u128 = 997;

/// ...out of 1000. The 3-part remainder accrues to the reserves.
pub const SWAP_FEE_DENOMINATOR: u128 = 1000;

/// Output amount for an exact input against the given reserves.
///
/// ```text
/// amount_in_with_fee = amount_in * 997
/// amount_out = floor(amount_in_with_fee * reserve_out
///                    / (reserve_in * 1000 + amount_in_with_fee))
/// ```
///
/// # Errors
///
/// - [`DexError::InsufficientInputAmount`] if `amount_in` is zero.
/// - [`DexError::InsufficientLiquidity`] if either reserve is zero.
/// - [`DexError::Overflow`] if an intermediate product exceeds 256 bits.
///
/// # Examples
///
/// ```
/// use triton_dex::domain::Amount;
/// use triton_dex::quote::get_amount_out;
///
/// let out = get_amount_out(
///     Amount::new(10_000),
///     Amount::new(40_000),
///     Amount::new(90_000),
/// ).expect("liquid reserves");
/// assert_eq!(out, Amount::new(17_956));
/// ```
pub fn get_amount_out(amount_in: Amount, reserve_in: Amount, reserve_out: Amount) -> Result<Amount> {
    if amount_in.is_zero() {
        return Err(DexError::InsufficientInputAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(DexError::InsufficientLiquidity);
    }

    let amount_in_with_fee = amount_in.safe_mul(&Amount::new(SWAP_FEE_NUMERATOR))?;
    let numerator = amount_in_with_fee.safe_mul(&reserve_out)?;
    let denominator = reserve_in
        .safe_mul(&Amount::new(SWAP_FEE_DENOMINATOR))?
        .safe_add(&amount_in_with_fee)?;

    numerator.safe_div(&denominator, Rounding::Down)
}

/// Balanced counterpart amount for a deposit: `floor(amount_a * reserve_b / reserve_a)`.
///
/// Used to propose how much of asset B matches a chosen amount of
/// asset A at the pool's current price. Meaningless on an empty pool —
/// a first deposit sets the price and must supply both amounts
/// directly.
///
/// # Errors
///
/// - [`DexError::InsufficientAmount`] if `amount_a` is zero.
/// - [`DexError::InsufficientLiquidity`] if either reserve is zero.
/// - [`DexError::Overflow`] if the product exceeds 256 bits.
pub fn quote(amount_a: Amount, reserve_a: Amount, reserve_b: Amount) -> Result<Amount> {
    if amount_a.is_zero() {
        return Err(DexError::InsufficientAmount);
    }
    if reserve_a.is_zero() || reserve_b.is_zero() {
        return Err(DexError::InsufficientLiquidity);
    }

    amount_a
        .safe_mul(&reserve_b)?
        .safe_div(&reserve_a, Rounding::Down)
}

//! Checked arithmetic trait for domain wrapper types.
//!
//! [`CheckedArithmetic`] maps the `Option`-returning checked operations
//! of [`Amount`] onto named [`DexError`] variants, so call sites can use
//! `?` instead of threading `ok_or` everywhere.
//!
//! # Contract
//!
//! - **No panics** — all error conditions produce `Err`.
//! - **No saturation** — saturation hides bugs; errors propagate instead.

use crate::domain::{Amount, Rounding};
use crate::error::DexError;

/// Fallible arithmetic for domain wrapper types.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`] if the result exceeds the
    /// representable range.
    fn safe_add(&self, other: &Self) -> Result<Self, DexError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Underflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, DexError>;

    /// Checked multiplication.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`] if the result exceeds the
    /// representable range.
    fn safe_mul(&self, other: &Self) -> Result<Self, DexError>;

    /// Checked division with explicit [`Rounding`] direction.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::DivisionByZero`] if `other` is zero.
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, DexError>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, DexError> {
        self.checked_add(other)
            .ok_or(DexError::Overflow("amount addition"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, DexError> {
        self.checked_sub(other)
            .ok_or(DexError::Underflow("amount subtraction"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self, DexError> {
        self.checked_mul(other)
            .ok_or(DexError::Overflow("amount multiplication"))
    }

    #[inline]
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, DexError> {
        self.checked_div(other, rounding)
            .ok_or(DexError::DivisionByZero)
    }
}

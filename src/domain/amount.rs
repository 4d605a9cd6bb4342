//! Raw token amount with checked 256-bit arithmetic.

use core::fmt;

use primitive_types::{U256, U512};
use serde::{Deserialize, Serialize};

/// Rounding direction for division on [`Amount`].
///
/// Every division in the exchange core names its rounding direction
/// explicitly; which way truncation goes decides who keeps the dust,
/// and the pool must always be the one that keeps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}

/// A raw token amount in the smallest indivisible unit.
///
/// Backed by a 256-bit unsigned integer so that reserve products and
/// fee-scaled intermediates never need to fit a native word. `Amount`
/// never interprets decimals — display scaling is a front-end concern.
///
/// Arithmetic methods are checked: they return `None` on overflow,
/// underflow, or division by zero instead of panicking. Nothing in the
/// crate wraps silently.
///
/// # Examples
///
/// ```
/// use triton_dex::domain::{Amount, Rounding};
///
/// let a = Amount::new(100);
/// let b = Amount::new(200);
/// assert_eq!(a.checked_add(&b), Some(Amount::new(300)));
/// assert_eq!(b.checked_div(&a, Rounding::Down), Some(Amount::new(2)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[must_use]
pub struct Amount(U256);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(U256([0, 0, 0, 0]));

    /// Maximum representable amount.
    pub const MAX: Self = Self(U256([u64::MAX, u64::MAX, u64::MAX, u64::MAX]));

    /// Creates a new `Amount` from a `u128` value.
    pub fn new(value: u128) -> Self {
        Self(U256::from(value))
    }

    /// Creates a new `Amount` from a raw 256-bit value.
    pub const fn from_raw(value: U256) -> Self {
        Self(value)
    }

    /// Returns the underlying 256-bit value.
    #[must_use]
    pub const fn get(&self) -> U256 {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Checked multiplication. Returns `None` on overflow.
    #[must_use]
    pub fn checked_mul(&self, other: &Self) -> Option<Self> {
        self.0.checked_mul(other.0).map(Self)
    }

    /// Widening multiplication into 512 bits.
    ///
    /// Used for invariant comparisons where the product of two full-width
    /// reserves must not be allowed to overflow.
    #[must_use]
    pub fn widening_mul(&self, other: &Self) -> U512 {
        self.0.full_mul(other.0)
    }

    /// Checked division with an explicit rounding direction.
    ///
    /// Returns `None` if `divisor` is zero.
    #[must_use]
    pub fn checked_div(&self, divisor: &Self, rounding: Rounding) -> Option<Self> {
        if divisor.0.is_zero() {
            return None;
        }
        let quotient = self.0 / divisor.0;
        match rounding {
            Rounding::Down => Some(Self(quotient)),
            Rounding::Up => {
                if (self.0 % divisor.0).is_zero() {
                    Some(Self(quotient))
                } else {
                    // quotient + 1 cannot overflow: a nonzero remainder
                    // implies quotient < U256::MAX.
                    Some(Self(quotient + U256::one()))
                }
            }
        }
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self::new(value)
    }
}

impl From<U256> for Amount {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//! Exact integer square root and ordering helpers.

use primitive_types::U256;

use crate::domain::Amount;

/// Returns the smaller of two amounts.
#[must_use]
pub fn min(a: Amount, b: Amount) -> Amount {
    if a < b {
        a
    } else {
        b
    }
}

/// Returns `floor(sqrt(n))`, exact for the full 256-bit range.
///
/// Babylonian (Newton) iteration on integers: starting from a guess no
/// smaller than the true root, the sequence `y = (x + n/x) / 2`
/// decreases monotonically and stops at the floor of the square root.
/// No floating point is involved, so results stay exact far beyond the
/// f64 safe-integer range.
#[must_use]
pub fn integer_sqrt(n: U256) -> U256 {
    if n.is_zero() {
        return U256::zero();
    }
    // (n >> 1) + 1 >= sqrt(n) for every n >= 1, and never overflows.
    let mut x = n;
    let mut y = (n >> 1) + U256::one();
    while y < x {
        x = y;
        y = (x + n / x) >> 1;
    }
    x
}

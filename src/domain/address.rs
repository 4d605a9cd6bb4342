//! Chain-agnostic 32-byte address.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A 32-byte identity used for accounts, token contracts, and pools alike.
///
/// All 32-byte sequences are valid addresses, so construction is
/// infallible. Addresses are totally ordered by byte-wise comparison,
/// which is the order used to canonicalize token pairs.
///
/// The all-zero address is reserved as the burn/lock sink: liquidity
/// shares minted to it are unreachable forever.
///
/// # Examples
///
/// ```
/// use triton_dex::domain::Address;
///
/// let addr = Address::from_bytes([1u8; 32]);
/// assert_eq!(addr.as_bytes(), [1u8; 32]);
/// assert!(Address::zero() < addr);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address([u8; 32]);

impl Address {
    /// Creates an `Address` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns the all-zero address, the burn/lock sink.
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }

    /// Returns `true` for the all-zero address.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        let mut i = 0;
        while i < 32 {
            if self.0[i] != 0 {
                return false;
            }
            i += 1;
        }
        true
    }
}

impl fmt::Display for Address {
    /// Hex rendering with a `0x` prefix, for logs and event dumps.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

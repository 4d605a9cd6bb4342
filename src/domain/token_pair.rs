//! Canonically ordered pair of distinct token addresses.

use serde::{Deserialize, Serialize};

use super::Address;
use crate::error::DexError;

/// An unordered token pair in canonical form.
///
/// The two addresses are sorted at construction so that
/// `token0() < token1()` byte-wise. Any two calls with the same tokens in
/// either order produce equal pairs, which makes `TokenPair` directly
/// usable as the registry key — one map entry serves both orderings.
///
/// # Examples
///
/// ```
/// use triton_dex::domain::{Address, TokenPair};
///
/// let a = Address::from_bytes([1u8; 32]);
/// let b = Address::from_bytes([2u8; 32]);
///
/// let forward = TokenPair::new(a, b).expect("distinct tokens");
/// let reversed = TokenPair::new(b, a).expect("distinct tokens");
/// assert_eq!(forward, reversed);
/// assert_eq!(forward.token0(), a);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenPair {
    token0: Address,
    token1: Address,
}

impl TokenPair {
    /// Creates a canonically ordered pair.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::IdenticalTokens`] if both addresses are equal.
    pub fn new(token_a: Address, token_b: Address) -> Result<Self, DexError> {
        if token_a == token_b {
            return Err(DexError::IdenticalTokens);
        }
        let (token0, token1) = if token_a < token_b {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };
        Ok(Self { token0, token1 })
    }

    /// Returns the lower-addressed token.
    #[must_use]
    pub const fn token0(&self) -> Address {
        self.token0
    }

    /// Returns the higher-addressed token.
    #[must_use]
    pub const fn token1(&self) -> Address {
        self.token1
    }

    /// Returns `true` if the given address is one of the pair's tokens.
    #[must_use]
    pub fn contains(&self, token: &Address) -> bool {
        self.token0 == *token || self.token1 == *token
    }

    /// Returns the counterpart of `token` in this pair.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::UnknownToken`] if `token` is not in the pair.
    pub fn other(&self, token: &Address) -> Result<Address, DexError> {
        if *token == self.token0 {
            Ok(self.token1)
        } else if *token == self.token1 {
            Ok(self.token0)
        } else {
            Err(DexError::UnknownToken)
        }
    }

    /// Concatenated `token0 ++ token1` bytes, the salt preimage for
    /// deterministic pool-address derivation.
    #[must_use]
    pub fn salt_preimage(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&self.token0.as_bytes());
        out[32..].copy_from_slice(&self.token1.as_bytes());
        out
    }
}

//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use triton_dex::prelude::*;
//!
//! let mut dex = Dex::new();
//! let token = Address::from_bytes([1; 32]);
//! dex.register_token(token, "tokenA", "A", 18).expect("register");
//! assert!(dex.ledger().is_registered(&token));
//! ```

pub use crate::dex::Dex;
pub use crate::domain::{Address, Amount, Rounding, Timestamp, TokenPair};
pub use crate::error::{DexError, Result};
pub use crate::events::{Event, EventLog};
pub use crate::factory::PairRegistry;
pub use crate::ledger::{TokenContract, TokenLedger};
pub use crate::pool::{ConstantProductPool, MINIMUM_LIQUIDITY};
pub use crate::quote::{get_amount_out, quote};
pub use crate::traits::FungibleToken;

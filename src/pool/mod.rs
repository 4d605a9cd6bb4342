//! The constant-product pool and its embedded share token.

mod constant_product;
mod shares;

#[cfg(test)]
mod proptest_properties;

pub use constant_product::{ConstantProductPool, MINIMUM_LIQUIDITY};
pub use shares::{LpShares, SHARE_DECIMALS, SHARE_SYMBOL};

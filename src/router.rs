//! Router: deadline-bounded, slippage-bounded orchestration.
//!
//! The router is stateless — it owns nothing but its identity — and
//! stages multi-step flows over the factory, the ledger, and the pools:
//! pull funds from the caller, create the pool if this is the pair's
//! first deposit, invoke the pool, and enforce the caller's minimums.
//! Every entry point is one atomic transaction: a failure at any step,
//! including a post-hoc minimum check *after* the pool has already
//! executed, reverts the whole call.
//!
//! Callers must `approve` the router (see [`Dex::router`]) on the input
//! tokens — or on the pool's shares, for withdrawals — before routing.
//! Pricing uses the same [`quote`](crate::quote) functions clients use
//! off-chain, so a routed execution can only deviate from a client-side
//! preview through a reserve change between quote and submission; the
//! `amount_*_min` bounds and the `deadline` are the defense against
//! exactly that drift.

use tracing::debug;

use crate::dex::Dex;
use crate::domain::{Address, Amount, Timestamp, TokenPair};
use crate::error::{DexError, Result};
use crate::quote;
use crate::traits::FungibleToken;

impl Dex {
    /// Reserves of `pool` oriented so the first element matches
    /// `token_a`'s side of the pair.
    fn oriented_reserves(
        &self,
        pool: &Address,
        token_a: Address,
        pair: &TokenPair,
    ) -> Result<(Amount, Amount)> {
        let (reserve0, reserve1) = self.pool(pool)?.reserves();
        if token_a == pair.token0() {
            Ok((reserve0, reserve1))
        } else {
            Ok((reserve1, reserve0))
        }
    }

    /// Adds liquidity for an unordered pair, creating the pool on first
    /// use.
    ///
    /// On a fresh pool the desired amounts deposit as-is and set the
    /// initial price. On an existing pool the router quotes the balanced
    /// counterpart of `amount_a_desired`; if that fits under
    /// `amount_b_desired` it is used, otherwise the symmetric quote of
    /// `amount_b_desired` is taken. Whichever side gets scaled back is
    /// checked against its minimum.
    ///
    /// Returns `(amount_a, amount_b, liquidity)` actually deposited and
    /// minted to `to`.
    ///
    /// # Errors
    ///
    /// - [`DexError::Expired`] past `deadline`.
    /// - [`DexError::InsufficientAAmount`] / [`DexError::InsufficientBAmount`]
    ///   when the balanced deposit violates a minimum.
    /// - [`DexError::InsufficientAllowance`] when the router was not
    ///   approved for the chosen amounts.
    /// - Any error from the pool's `mint`.
    #[allow(clippy::too_many_arguments)]
    pub fn add_liquidity(
        &mut self,
        sender: Address,
        token_a: Address,
        token_b: Address,
        amount_a_desired: Amount,
        amount_b_desired: Amount,
        amount_a_min: Amount,
        amount_b_min: Amount,
        to: Address,
        deadline: Timestamp,
    ) -> Result<(Amount, Amount, Amount)> {
        self.transact(|dex| {
            dex.now.check_deadline(deadline)?;
            let pair = TokenPair::new(token_a, token_b)?;
            let pool_address = match dex.registry.get_pool(token_a, token_b) {
                Some(address) => address,
                None => dex.create_pool_inner(token_a, token_b)?,
            };

            let (reserve_a, reserve_b) = dex.oriented_reserves(&pool_address, token_a, &pair)?;
            let (amount_a, amount_b) = if reserve_a.is_zero() && reserve_b.is_zero() {
                // First deposit sets the price.
                (amount_a_desired, amount_b_desired)
            } else {
                let amount_b_optimal = quote::quote(amount_a_desired, reserve_a, reserve_b)?;
                if amount_b_optimal <= amount_b_desired {
                    if amount_b_optimal < amount_b_min {
                        return Err(DexError::InsufficientBAmount);
                    }
                    (amount_a_desired, amount_b_optimal)
                } else {
                    let amount_a_optimal = quote::quote(amount_b_desired, reserve_b, reserve_a)?;
                    if amount_a_optimal < amount_a_min {
                        return Err(DexError::InsufficientAAmount);
                    }
                    (amount_a_optimal, amount_b_desired)
                }
            };

            let router = dex.router;
            dex.ledger
                .transfer_from(&token_a, router, sender, pool_address, amount_a, &mut dex.events)?;
            dex.ledger
                .transfer_from(&token_b, router, sender, pool_address, amount_b, &mut dex.events)?;

            let pool = dex
                .pools
                .get_mut(&pool_address)
                .ok_or(DexError::PoolDoesNotExist)?;
            let liquidity = pool.mint(router, to, &dex.ledger, &mut dex.events)?;
            debug!(%sender, %amount_a, %amount_b, %liquidity, "add_liquidity");
            Ok((amount_a, amount_b, liquidity))
        })
    }

    /// Withdraws liquidity: pulls `liquidity` shares from `sender` into
    /// the pool, burns them, and pays both assets to `to`.
    ///
    /// The minimum checks run *after* the burn — the burn has already
    /// executed when they fail, and the transaction reverts it wholesale.
    ///
    /// Returns `(amount_a, amount_b)` withdrawn.
    ///
    /// # Errors
    ///
    /// - [`DexError::Expired`] past `deadline`.
    /// - [`DexError::PoolDoesNotExist`] for an unregistered pair.
    /// - [`DexError::InsufficientShareAllowance`] when the router was
    ///   not approved for the shares.
    /// - [`DexError::InsufficientAAmount`] / [`DexError::InsufficientBAmount`]
    ///   when the realized amounts fall below the minimums.
    #[allow(clippy::too_many_arguments)]
    pub fn remove_liquidity(
        &mut self,
        sender: Address,
        token_a: Address,
        token_b: Address,
        liquidity: Amount,
        amount_a_min: Amount,
        amount_b_min: Amount,
        to: Address,
        deadline: Timestamp,
    ) -> Result<(Amount, Amount)> {
        self.transact(|dex| {
            dex.now.check_deadline(deadline)?;
            let pair = TokenPair::new(token_a, token_b)?;
            let pool_address = dex
                .registry
                .get_pool(token_a, token_b)
                .ok_or(DexError::PoolDoesNotExist)?;

            let router = dex.router;
            let pool = dex
                .pools
                .get_mut(&pool_address)
                .ok_or(DexError::PoolDoesNotExist)?;
            pool.shares_mut()
                .transfer_from(router, sender, pool_address, liquidity, &mut dex.events)?;
            let (amount0, amount1) = pool.burn(router, to, &mut dex.ledger, &mut dex.events)?;

            let (amount_a, amount_b) = if token_a == pair.token0() {
                (amount0, amount1)
            } else {
                (amount1, amount0)
            };
            if amount_a < amount_a_min {
                return Err(DexError::InsufficientAAmount);
            }
            if amount_b < amount_b_min {
                return Err(DexError::InsufficientBAmount);
            }
            debug!(%sender, %amount_a, %amount_b, %liquidity, "remove_liquidity");
            Ok((amount_a, amount_b))
        })
    }

    /// Swaps an exact `amount_in` of `token_in` for `token_out`.
    ///
    /// The output is quoted from current reserves with
    /// [`quote::get_amount_out`], bounded below by `amount_out_min`,
    /// and delivered to `to`.
    ///
    /// Returns the output amount.
    ///
    /// # Errors
    ///
    /// - [`DexError::Expired`] past `deadline`.
    /// - [`DexError::PoolDoesNotExist`] for an unregistered pair.
    /// - [`DexError::InsufficientOutputAmount`] when the quote falls
    ///   below `amount_out_min`.
    /// - [`DexError::InsufficientAllowance`] when the router was not
    ///   approved for `amount_in`.
    #[allow(clippy::too_many_arguments)]
    pub fn swap_token_pair(
        &mut self,
        sender: Address,
        token_in: Address,
        token_out: Address,
        amount_in: Amount,
        amount_out_min: Amount,
        to: Address,
        deadline: Timestamp,
    ) -> Result<Amount> {
        self.transact(|dex| {
            dex.now.check_deadline(deadline)?;
            let pair = TokenPair::new(token_in, token_out)?;
            let pool_address = dex
                .registry
                .get_pool(token_in, token_out)
                .ok_or(DexError::PoolDoesNotExist)?;

            let (reserve_in, reserve_out) = dex.oriented_reserves(&pool_address, token_in, &pair)?;
            let amount_out = quote::get_amount_out(amount_in, reserve_in, reserve_out)?;
            if amount_out < amount_out_min {
                return Err(DexError::InsufficientOutputAmount);
            }

            let router = dex.router;
            dex.ledger
                .transfer_from(&token_in, router, sender, pool_address, amount_in, &mut dex.events)?;
            let (amount0_out, amount1_out) = if token_in == pair.token0() {
                (Amount::ZERO, amount_out)
            } else {
                (amount_out, Amount::ZERO)
            };
            let pool = dex
                .pools
                .get_mut(&pool_address)
                .ok_or(DexError::PoolDoesNotExist)?;
            pool.swap(router, amount0_out, amount1_out, to, &mut dex.ledger, &mut dex.events)?;
            debug!(%sender, %amount_in, %amount_out, "swap_token_pair");
            Ok(amount_out)
        })
    }
}

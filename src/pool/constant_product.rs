//! Constant-product liquidity pool.
//!
//! The swap invariant is `x × y = k` where `x` and `y` are the reserves
//! of the two tokens. A flat 0.3% fee is taken from every swap's net
//! input, realized by checking the invariant against fee-adjusted
//! balances — fees accrue to the reserves and inflate the value of
//! outstanding shares; no separate fee ledger exists.
//!
//! # Deposit-inference model
//!
//! The pool never pulls tokens. Callers transfer assets in first, then
//! invoke `mint`/`swap`; the pool compares its actual ledger balances
//! against the reserves recorded at the last update to infer what
//! arrived. `swap` goes further and pays the requested output *before*
//! checking anything — the optimistic transfer-then-check pattern — and
//! relies on the transactional execution of the embedding
//! [`Dex`](crate::dex::Dex) to unwind the staged effects when the
//! invariant check rejects.
//!
//! # Lifecycle
//!
//! `Uninitialized → Active`, one-way. Only the creating factory may
//! call [`ConstantProductPool::initialize`], exactly once.

use tracing::debug;

use crate::domain::{Address, Amount, Rounding, TokenPair};
use crate::error::{DexError, Result};
use crate::events::{Event, EventLog};
use crate::ledger::TokenLedger;
use crate::math::{integer_sqrt, min, CheckedArithmetic};
use crate::quote::{SWAP_FEE_DENOMINATOR, SWAP_FEE_NUMERATOR};
use crate::traits::FungibleToken;

use super::shares::LpShares;

/// Share units permanently locked to the zero address on first mint.
///
/// Prevents share-price manipulation through a degenerate first deposit:
/// the first minter can never own 100% of the supply.
pub const MINIMUM_LIQUIDITY: u128 = 1_000;

/// A constant-product pool for one token pair.
///
/// Holds the tracked reserves, the embedded share token, the one-way
/// initialization state, and a reentrancy lock. All balance truth lives
/// in the [`TokenLedger`]; reserves are the pool's last-synced view of
/// it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantProductPool {
    address: Address,
    factory: Address,
    tokens: Option<TokenPair>,
    reserve0: Amount,
    reserve1: Amount,
    shares: LpShares,
    locked: bool,
}

impl ConstantProductPool {
    /// Creates an uninitialized pool deployed by `factory` at `address`.
    #[must_use]
    pub fn new(address: Address, factory: Address) -> Self {
        Self {
            address,
            factory,
            tokens: None,
            reserve0: Amount::ZERO,
            reserve1: Amount::ZERO,
            shares: LpShares::new(address),
            locked: false,
        }
    }

    /// Binds the token pair. Callable once, by the factory only.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InitializationForbidden`] for any other
    /// caller or for a repeat call.
    pub fn initialize(&mut self, caller: Address, pair: TokenPair) -> Result<()> {
        if caller != self.factory || self.tokens.is_some() {
            return Err(DexError::InitializationForbidden);
        }
        self.tokens = Some(pair);
        Ok(())
    }

    /// The pool's own address (also the share token's address).
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// The factory that deployed this pool.
    #[must_use]
    pub const fn factory(&self) -> Address {
        self.factory
    }

    /// Lower-addressed token of the pair.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::PoolNotInitialized`] before `initialize`.
    pub fn token0(&self) -> Result<Address> {
        Ok(self.pair()?.token0())
    }

    /// Higher-addressed token of the pair.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::PoolNotInitialized`] before `initialize`.
    pub fn token1(&self) -> Result<Address> {
        Ok(self.pair()?.token1())
    }

    /// Tracked reserves as of the last accounting update.
    #[must_use]
    pub const fn reserves(&self) -> (Amount, Amount) {
        (self.reserve0, self.reserve1)
    }

    /// Read-only view of the share token.
    #[must_use]
    pub const fn shares(&self) -> &LpShares {
        &self.shares
    }

    /// Mutable access to the share token, for transfers and approvals.
    ///
    /// Share *supply* still only changes through `mint`/`burn`.
    pub fn shares_mut(&mut self) -> &mut LpShares {
        &mut self.shares
    }

    fn pair(&self) -> Result<TokenPair> {
        self.tokens.ok_or(DexError::PoolNotInitialized)
    }

    fn acquire_lock(&mut self) -> Result<()> {
        if self.locked {
            return Err(DexError::Locked);
        }
        self.locked = true;
        Ok(())
    }

    fn release_lock(&mut self) {
        self.locked = false;
    }

    /// Syncs reserves to actual balances and emits `Sync`.
    fn update(&mut self, balance0: Amount, balance1: Amount, events: &mut EventLog) {
        self.reserve0 = balance0;
        self.reserve1 = balance1;
        events.record(Event::Sync {
            pool: self.address,
            reserve0: balance0,
            reserve1: balance1,
        });
    }

    /// Mints shares for tokens already transferred into the pool.
    ///
    /// Deposits are inferred as `ledger balance − tracked reserve` per
    /// token. The first mint prices shares at
    /// `sqrt(amount0 × amount1) − MINIMUM_LIQUIDITY` and locks the
    /// floor at the zero address; later mints price at the smaller of
    /// the two proportional contributions, penalizing unbalanced
    /// deposits.
    ///
    /// Returns the shares credited to `to`.
    ///
    /// # Errors
    ///
    /// - [`DexError::BelowMinimumLiquidity`] when a first deposit does
    ///   not clear the locked floor.
    /// - [`DexError::InsufficientLiquidityMinted`] when a follow-up
    ///   deposit rounds to zero shares.
    /// - [`DexError::PoolNotInitialized`] / [`DexError::Locked`] on
    ///   lifecycle misuse.
    pub fn mint(
        &mut self,
        sender: Address,
        to: Address,
        ledger: &TokenLedger,
        events: &mut EventLog,
    ) -> Result<Amount> {
        self.acquire_lock()?;
        let result = self.mint_locked(sender, to, ledger, events);
        self.release_lock();
        result
    }

    fn mint_locked(
        &mut self,
        sender: Address,
        to: Address,
        ledger: &TokenLedger,
        events: &mut EventLog,
    ) -> Result<Amount> {
        let pair = self.pair()?;
        let balance0 = ledger.balance_of(&pair.token0(), &self.address)?;
        let balance1 = ledger.balance_of(&pair.token1(), &self.address)?;
        let amount0 = balance0
            .checked_sub(&self.reserve0)
            .ok_or(DexError::Underflow("deposit inference"))?;
        let amount1 = balance1
            .checked_sub(&self.reserve1)
            .ok_or(DexError::Underflow("deposit inference"))?;

        let total = self.shares.total_supply();
        let minted = if total.is_zero() {
            let product = amount0.safe_mul(&amount1)?;
            let root = Amount::from_raw(integer_sqrt(product.get()));
            let floor = Amount::new(MINIMUM_LIQUIDITY);
            if root <= floor {
                return Err(DexError::BelowMinimumLiquidity);
            }
            let minted = root.safe_sub(&floor)?;
            self.shares.mint(Address::zero(), floor, events)?;
            minted
        } else {
            let share0 = amount0
                .safe_mul(&total)?
                .safe_div(&self.reserve0, Rounding::Down)?;
            let share1 = amount1
                .safe_mul(&total)?
                .safe_div(&self.reserve1, Rounding::Down)?;
            let minted = min(share0, share1);
            if minted.is_zero() {
                return Err(DexError::InsufficientLiquidityMinted);
            }
            minted
        };

        self.shares.mint(to, minted, events)?;
        self.update(balance0, balance1, events);
        events.record(Event::Mint {
            pool: self.address,
            sender,
            amount0,
            amount1,
        });
        debug!(pool = %self.address, %amount0, %amount1, %minted, "mint");
        Ok(minted)
    }

    /// Burns the shares held by the pool itself and pays out reserves.
    ///
    /// Callers transfer shares into the pool first; whatever the pool
    /// holds is what burns. Payouts are the proportional slice of each
    /// balance, floored — dust stays with the pool.
    ///
    /// Returns the `(amount0, amount1)` paid to `to`.
    ///
    /// # Errors
    ///
    /// - [`DexError::InsufficientLiquidityBurned`] when the pool holds
    ///   no shares.
    /// - [`DexError::PoolNotInitialized`] / [`DexError::Locked`] on
    ///   lifecycle misuse.
    pub fn burn(
        &mut self,
        sender: Address,
        to: Address,
        ledger: &mut TokenLedger,
        events: &mut EventLog,
    ) -> Result<(Amount, Amount)> {
        self.acquire_lock()?;
        let result = self.burn_locked(sender, to, ledger, events);
        self.release_lock();
        result
    }

    fn burn_locked(
        &mut self,
        sender: Address,
        to: Address,
        ledger: &mut TokenLedger,
        events: &mut EventLog,
    ) -> Result<(Amount, Amount)> {
        let pair = self.pair()?;
        let token0 = pair.token0();
        let token1 = pair.token1();
        let balance0 = ledger.balance_of(&token0, &self.address)?;
        let balance1 = ledger.balance_of(&token1, &self.address)?;
        let liquidity = self.shares.balance_of(&self.address);
        if liquidity.is_zero() {
            return Err(DexError::InsufficientLiquidityBurned);
        }

        let total = self.shares.total_supply();
        let amount0 = balance0
            .safe_mul(&liquidity)?
            .safe_div(&total, Rounding::Down)?;
        let amount1 = balance1
            .safe_mul(&liquidity)?
            .safe_div(&total, Rounding::Down)?;

        self.shares.burn(self.address, liquidity, events)?;
        ledger.transfer(&token0, self.address, to, amount0, events)?;
        ledger.transfer(&token1, self.address, to, amount1, events)?;

        let balance0 = ledger.balance_of(&token0, &self.address)?;
        let balance1 = ledger.balance_of(&token1, &self.address)?;
        self.update(balance0, balance1, events);
        events.record(Event::Burn {
            pool: self.address,
            sender,
            amount0,
            amount1,
            to,
        });
        debug!(pool = %self.address, %amount0, %amount1, %liquidity, "burn");
        Ok((amount0, amount1))
    }

    /// Executes a swap: pays the requested outputs, then requires the
    /// fee-adjusted constant product not to have decreased.
    ///
    /// Inputs are whatever the caller transferred in beforehand, inferred
    /// from balances. The invariant check scales each balance by 1000
    /// and subtracts 3× the net input, which is exactly a 0.3% fee on
    /// inputs; the comparison runs in 512 bits so full-width reserves
    /// cannot overflow it.
    ///
    /// # Errors
    ///
    /// - [`DexError::InsufficientOutputAmount`] when both outputs are
    ///   zero.
    /// - [`DexError::InsufficientLiquidity`] when an output meets or
    ///   exceeds its reserve.
    /// - [`DexError::InsufficientInputAmount`] when nothing was
    ///   transferred in.
    /// - [`DexError::KInvariant`] when the fee-adjusted product shrinks.
    /// - [`DexError::PoolNotInitialized`] / [`DexError::Locked`] on
    ///   lifecycle misuse.
    pub fn swap(
        &mut self,
        sender: Address,
        amount0_out: Amount,
        amount1_out: Amount,
        to: Address,
        ledger: &mut TokenLedger,
        events: &mut EventLog,
    ) -> Result<()> {
        self.acquire_lock()?;
        let result = self.swap_locked(sender, amount0_out, amount1_out, to, ledger, events);
        self.release_lock();
        result
    }

    fn swap_locked(
        &mut self,
        sender: Address,
        amount0_out: Amount,
        amount1_out: Amount,
        to: Address,
        ledger: &mut TokenLedger,
        events: &mut EventLog,
    ) -> Result<()> {
        let pair = self.pair()?;
        let token0 = pair.token0();
        let token1 = pair.token1();
        if amount0_out.is_zero() && amount1_out.is_zero() {
            return Err(DexError::InsufficientOutputAmount);
        }
        if amount0_out >= self.reserve0 || amount1_out >= self.reserve1 {
            return Err(DexError::InsufficientLiquidity);
        }

        // Optimistic payout; the invariant check below judges the result.
        if !amount0_out.is_zero() {
            ledger.transfer(&token0, self.address, to, amount0_out, events)?;
        }
        if !amount1_out.is_zero() {
            ledger.transfer(&token1, self.address, to, amount1_out, events)?;
        }

        let balance0 = ledger.balance_of(&token0, &self.address)?;
        let balance1 = ledger.balance_of(&token1, &self.address)?;

        let amount0_in = Self::net_input(balance0, self.reserve0, amount0_out)?;
        let amount1_in = Self::net_input(balance1, self.reserve1, amount1_out)?;
        if amount0_in.is_zero() && amount1_in.is_zero() {
            return Err(DexError::InsufficientInputAmount);
        }

        let adjusted0 = Self::fee_adjusted(balance0, amount0_in)?;
        let adjusted1 = Self::fee_adjusted(balance1, amount1_in)?;
        let scale = Amount::new(SWAP_FEE_DENOMINATOR);
        let lhs = adjusted0.widening_mul(&adjusted1);
        let rhs = self
            .reserve0
            .safe_mul(&scale)?
            .widening_mul(&self.reserve1.safe_mul(&scale)?);
        if lhs < rhs {
            return Err(DexError::KInvariant);
        }

        self.update(balance0, balance1, events);
        events.record(Event::Swap {
            pool: self.address,
            sender,
            amount0_in,
            amount1_in,
            amount0_out,
            amount1_out,
            to,
        });
        debug!(
            pool = %self.address,
            %amount0_in, %amount1_in, %amount0_out, %amount1_out, "swap"
        );
        Ok(())
    }

    /// Net inflow of one token: `balance − (reserve − out)`, floored at
    /// zero.
    fn net_input(balance: Amount, reserve: Amount, out: Amount) -> Result<Amount> {
        let expected = reserve.safe_sub(&out)?;
        if balance > expected {
            balance.safe_sub(&expected)
        } else {
            Ok(Amount::ZERO)
        }
    }

    /// `balance × 1000 − input × 3`: the balance with the 0.3% fee on
    /// net input carved back out, on the 1000× scale.
    fn fee_adjusted(balance: Amount, input: Amount) -> Result<Amount> {
        let fee_units = Amount::new(SWAP_FEE_DENOMINATOR - SWAP_FEE_NUMERATOR);
        balance
            .safe_mul(&Amount::new(SWAP_FEE_DENOMINATOR))?
            .safe_sub(&input.safe_mul(&fee_units)?)
    }
}

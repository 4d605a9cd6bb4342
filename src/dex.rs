//! The exchange state machine.
//!
//! [`Dex`] owns everything the system mutates: the token ledger, the
//! pair registry, every pool, the event log, and the logical clock. It
//! is the transaction boundary — each mutating entry point executes
//! against a snapshot and rolls back in full on any error, so no caller
//! ever observes partial effects. This is the staged-operation pattern
//! the pool's optimistic swap relies on: pay out first, validate after,
//! and let the transaction unwind the payout when validation rejects.
//!
//! Writes name their acting account explicitly (`sender`); the core
//! holds no keys and trusts the embedding environment to have
//! authenticated the caller.
//!
//! # Example
//!
//! ```
//! use triton_dex::dex::Dex;
//! use triton_dex::domain::{Address, Amount};
//!
//! let mut dex = Dex::new();
//! let alice = Address::from_bytes([0xAA; 32]);
//! let token_a = Address::from_bytes([1; 32]);
//! let token_b = Address::from_bytes([2; 32]);
//!
//! dex.register_token(token_a, "tokenA", "A", 18).expect("register");
//! dex.register_token(token_b, "tokenB", "B", 18).expect("register");
//! dex.mint_token(token_a, alice, Amount::new(1_000_000)).expect("fund");
//! dex.mint_token(token_b, alice, Amount::new(1_000_000)).expect("fund");
//!
//! let pool = dex.create_pool(token_a, token_b).expect("create");
//! dex.transfer(token_a, alice, pool, Amount::new(40_000)).expect("deposit");
//! dex.transfer(token_b, alice, pool, Amount::new(90_000)).expect("deposit");
//! let minted = dex.mint(pool, alice, alice).expect("mint");
//! assert_eq!(minted, Amount::new(59_000));
//! ```

use std::collections::HashMap;

use tracing::info;

use crate::domain::{Address, Amount, Timestamp, TokenPair};
use crate::error::{DexError, Result};
use crate::events::{Event, EventLog};
use crate::factory::{keccak256, PairRegistry};
use crate::ledger::TokenLedger;
use crate::pool::ConstantProductPool;
use crate::traits::FungibleToken;

/// Identity preimage of the factory.
const FACTORY_CODE_ID: &[u8] = b"triton-dex/factory/v1";

/// Identity preimage of the router.
const ROUTER_CODE_ID: &[u8] = b"triton-dex/router/v1";

/// Top-level exchange state: ledger, registry, pools, events, clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dex {
    pub(crate) ledger: TokenLedger,
    pub(crate) registry: PairRegistry,
    pub(crate) pools: HashMap<Address, ConstantProductPool>,
    pub(crate) router: Address,
    pub(crate) events: EventLog,
    pub(crate) now: Timestamp,
}

impl Default for Dex {
    fn default() -> Self {
        Self::new()
    }
}

impl Dex {
    /// Creates an empty exchange.
    ///
    /// Factory and router identities are derived from fixed code
    /// identifiers, so every instance agrees on them — and therefore on
    /// every derived pool address.
    #[must_use]
    pub fn new() -> Self {
        let factory = Address::from_bytes(keccak256(FACTORY_CODE_ID));
        let router = Address::from_bytes(keccak256(ROUTER_CODE_ID));
        Self {
            ledger: TokenLedger::new(),
            registry: PairRegistry::new(factory),
            pools: HashMap::new(),
            router,
            events: EventLog::new(),
            now: Timestamp::default(),
        }
    }

    /// Runs `f` as one atomic transaction: on error, every effect —
    /// balances, reserves, shares, events, registrations — is rolled
    /// back to the pre-call snapshot.
    pub(crate) fn transact<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let snapshot = self.clone();
        match f(self) {
            Ok(value) => Ok(value),
            Err(err) => {
                *self = snapshot;
                Err(err)
            }
        }
    }

    // -- clock ---------------------------------------------------------------

    /// Current logical time.
    #[must_use]
    pub const fn now(&self) -> Timestamp {
        self.now
    }

    /// Sets the logical clock.
    pub fn set_time(&mut self, now: Timestamp) {
        self.now = now;
    }

    /// Moves the logical clock forward by `seconds`.
    pub fn advance_time(&mut self, seconds: u64) {
        self.now = self.now.plus(seconds);
    }

    // -- read access ----------------------------------------------------------

    /// The event log.
    #[must_use]
    pub const fn events(&self) -> &EventLog {
        &self.events
    }

    /// The token ledger, for balance/allowance/metadata queries.
    #[must_use]
    pub const fn ledger(&self) -> &TokenLedger {
        &self.ledger
    }

    /// The pair registry, for pool lookups and address derivation.
    #[must_use]
    pub const fn registry(&self) -> &PairRegistry {
        &self.registry
    }

    /// The factory identity.
    #[must_use]
    pub const fn factory(&self) -> Address {
        self.registry.address()
    }

    /// The router identity — the spender callers must approve for
    /// routed operations.
    #[must_use]
    pub const fn router(&self) -> Address {
        self.router
    }

    /// The pool at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::PoolDoesNotExist`] for unknown addresses.
    pub fn pool(&self, address: &Address) -> Result<&ConstantProductPool> {
        self.pools.get(address).ok_or(DexError::PoolDoesNotExist)
    }

    /// Registered pool address for an unordered pair, if any.
    #[must_use]
    pub fn get_pool(&self, token_a: Address, token_b: Address) -> Option<Address> {
        self.registry.get_pool(token_a, token_b)
    }

    // -- token administration --------------------------------------------------

    /// Registers a token contract.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::TokenExists`] if the address is taken.
    pub fn register_token(
        &mut self,
        address: Address,
        name: &str,
        symbol: &str,
        decimals: u8,
    ) -> Result<()> {
        self.ledger.register(address, name, symbol, decimals)
    }

    /// Creates `value` units of `token` for `to` (host-level supply).
    ///
    /// # Errors
    ///
    /// [`DexError::UnknownToken`] or an arithmetic error.
    pub fn mint_token(&mut self, token: Address, to: Address, value: Amount) -> Result<()> {
        self.transact(|dex| dex.ledger.mint(&token, to, value, &mut dex.events))
    }

    // -- token actions ---------------------------------------------------------

    /// Transfers `value` of `token` from `from` to `to`.
    ///
    /// Transferring to a pool address is how deposits are staged before
    /// a direct `mint` or `swap` call.
    ///
    /// # Errors
    ///
    /// [`DexError::UnknownToken`] or [`DexError::InsufficientBalance`].
    pub fn transfer(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        value: Amount,
    ) -> Result<()> {
        self.transact(|dex| dex.ledger.transfer(&token, from, to, value, &mut dex.events))
    }

    /// Sets `spender`'s allowance over `owner`'s `token` balance.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::UnknownToken`] for unregistered tokens.
    pub fn approve(
        &mut self,
        token: Address,
        owner: Address,
        spender: Address,
        value: Amount,
    ) -> Result<()> {
        self.transact(|dex| dex.ledger.approve(&token, owner, spender, value, &mut dex.events))
    }

    // -- liquidity-share actions ----------------------------------------------

    /// Share balance of `owner` in the pool at `pool`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::PoolDoesNotExist`] for unknown pools.
    pub fn lp_balance_of(&self, pool: &Address, owner: &Address) -> Result<Amount> {
        Ok(self.pool(pool)?.shares().balance_of(owner))
    }

    /// Total share supply of the pool at `pool`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::PoolDoesNotExist`] for unknown pools.
    pub fn lp_total_supply(&self, pool: &Address) -> Result<Amount> {
        Ok(self.pool(pool)?.shares().total_supply())
    }

    /// Remaining share allowance granted by `owner` to `spender`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::PoolDoesNotExist`] for unknown pools.
    pub fn lp_allowance(&self, pool: &Address, owner: &Address, spender: &Address) -> Result<Amount> {
        Ok(self.pool(pool)?.shares().allowance(owner, spender))
    }

    /// Transfers liquidity shares.
    ///
    /// # Errors
    ///
    /// [`DexError::PoolDoesNotExist`] or
    /// [`DexError::InsufficientShareBalance`].
    pub fn lp_transfer(
        &mut self,
        pool: Address,
        from: Address,
        to: Address,
        value: Amount,
    ) -> Result<()> {
        self.transact(|dex| {
            let p = dex.pools.get_mut(&pool).ok_or(DexError::PoolDoesNotExist)?;
            p.shares_mut().transfer(from, to, value, &mut dex.events)
        })
    }

    /// Sets `spender`'s allowance over `owner`'s shares.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::PoolDoesNotExist`] for unknown pools.
    pub fn lp_approve(
        &mut self,
        pool: Address,
        owner: Address,
        spender: Address,
        value: Amount,
    ) -> Result<()> {
        self.transact(|dex| {
            let p = dex.pools.get_mut(&pool).ok_or(DexError::PoolDoesNotExist)?;
            p.shares_mut().approve(owner, spender, value, &mut dex.events)
        })
    }

    // -- factory ----------------------------------------------------------------

    /// Creates the pool for an unordered pair at its deterministic
    /// address and emits [`Event::PoolCreated`].
    ///
    /// # Errors
    ///
    /// - [`DexError::IdenticalTokens`] for a same-token pair.
    /// - [`DexError::PoolExists`] if the pair already has a pool.
    pub fn create_pool(&mut self, token_a: Address, token_b: Address) -> Result<Address> {
        self.transact(|dex| dex.create_pool_inner(token_a, token_b))
    }

    /// Creation body, shared with the router's first-deposit auto-create.
    pub(crate) fn create_pool_inner(&mut self, token_a: Address, token_b: Address) -> Result<Address> {
        let pair = TokenPair::new(token_a, token_b)?;
        if self.registry.contains(&pair) {
            return Err(DexError::PoolExists);
        }
        let address = self.registry.pool_address(&pair);
        let factory = self.registry.address();
        let mut pool = ConstantProductPool::new(address, factory);
        pool.initialize(factory, pair)?;
        self.registry.insert(pair, address);
        self.pools.insert(address, pool);
        self.events.record(Event::PoolCreated {
            token0: pair.token0(),
            token1: pair.token1(),
            pool: address,
        });
        info!(%address, "pool created");
        Ok(address)
    }

    // -- direct pool operations --------------------------------------------------

    /// Mints liquidity shares for tokens already transferred to the pool.
    ///
    /// # Errors
    ///
    /// See [`ConstantProductPool::mint`]; also
    /// [`DexError::PoolDoesNotExist`] for unknown pools.
    pub fn mint(&mut self, pool: Address, sender: Address, to: Address) -> Result<Amount> {
        self.transact(|dex| {
            let p = dex.pools.get_mut(&pool).ok_or(DexError::PoolDoesNotExist)?;
            p.mint(sender, to, &dex.ledger, &mut dex.events)
        })
    }

    /// Burns the shares held by the pool and pays out both reserves.
    ///
    /// # Errors
    ///
    /// See [`ConstantProductPool::burn`]; also
    /// [`DexError::PoolDoesNotExist`] for unknown pools.
    pub fn burn(&mut self, pool: Address, sender: Address, to: Address) -> Result<(Amount, Amount)> {
        self.transact(|dex| {
            let p = dex.pools.get_mut(&pool).ok_or(DexError::PoolDoesNotExist)?;
            p.burn(sender, to, &mut dex.ledger, &mut dex.events)
        })
    }

    /// Executes a swap against the pool at `pool`.
    ///
    /// # Errors
    ///
    /// See [`ConstantProductPool::swap`]; also
    /// [`DexError::PoolDoesNotExist`] for unknown pools.
    pub fn swap(
        &mut self,
        pool: Address,
        sender: Address,
        amount0_out: Amount,
        amount1_out: Amount,
        to: Address,
    ) -> Result<()> {
        self.transact(|dex| {
            let p = dex.pools.get_mut(&pool).ok_or(DexError::PoolDoesNotExist)?;
            p.swap(sender, amount0_out, amount1_out, to, &mut dex.ledger, &mut dex.events)
        })
    }
}

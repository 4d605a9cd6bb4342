//! Event log for off-chain reconciliation.
//!
//! Every state transition appends one or more [`Event`]s to the shared
//! [`EventLog`]. Off-chain consumers replay the log to reconcile
//! displayed balances and positions with exchange state. Because entry
//! points are transactional, events from a failed call never survive —
//! the log only ever shows effects that actually happened.
//!
//! Unlike on-chain logs, where the emitting contract is implicit, every
//! event here names its emitter (`pool` or `token`) so a single flat log
//! serves the whole exchange.

use serde::Serialize;

use crate::domain::{Address, Amount};

/// A single reconciliation event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Event {
    /// A new pool was registered for a token pair.
    PoolCreated {
        /// Lower-addressed token of the pair.
        token0: Address,
        /// Higher-addressed token of the pair.
        token1: Address,
        /// Deterministically derived pool address.
        pool: Address,
    },

    /// Liquidity was deposited and shares minted.
    Mint {
        /// Emitting pool.
        pool: Address,
        /// Caller that triggered the mint (the router, for routed calls).
        sender: Address,
        /// Deposited amount of `token0`.
        amount0: Amount,
        /// Deposited amount of `token1`.
        amount1: Amount,
    },

    /// Shares were burned and reserves paid out.
    Burn {
        /// Emitting pool.
        pool: Address,
        /// Caller that triggered the burn.
        sender: Address,
        /// Withdrawn amount of `token0`.
        amount0: Amount,
        /// Withdrawn amount of `token1`.
        amount1: Amount,
        /// Recipient of the withdrawn assets.
        to: Address,
    },

    /// A swap executed against the pool.
    Swap {
        /// Emitting pool.
        pool: Address,
        /// Caller that triggered the swap.
        sender: Address,
        /// Net input of `token0` observed by the pool.
        amount0_in: Amount,
        /// Net input of `token1` observed by the pool.
        amount1_in: Amount,
        /// Output of `token0` sent to `to`.
        amount0_out: Amount,
        /// Output of `token1` sent to `to`.
        amount1_out: Amount,
        /// Recipient of the output.
        to: Address,
    },

    /// Reserves were synchronized to actual balances.
    Sync {
        /// Emitting pool.
        pool: Address,
        /// Tracked balance of `token0` after the update.
        reserve0: Amount,
        /// Tracked balance of `token1` after the update.
        reserve1: Amount,
    },

    /// A fungible transfer — token balances or liquidity shares.
    ///
    /// For share mints `from` is the zero address; for share burns `to`
    /// is the zero address.
    Transfer {
        /// Emitting token contract (a pool address for share transfers).
        token: Address,
        /// Debited account.
        from: Address,
        /// Credited account.
        to: Address,
        /// Transferred value.
        value: Amount,
    },

    /// An allowance was set.
    Approval {
        /// Emitting token contract (a pool address for share approvals).
        token: Address,
        /// Account granting the allowance.
        owner: Address,
        /// Account allowed to spend.
        spender: Address,
        /// Approved value.
        value: Amount,
    },
}

/// Append-only event log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event.
    pub fn record(&mut self, event: Event) {
        self.events.push(event);
    }

    /// All events in emission order.
    #[must_use]
    pub fn all(&self) -> &[Event] {
        &self.events
    }

    /// The most recent event, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Event> {
        self.events.last()
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

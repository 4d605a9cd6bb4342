//! Liquidity-share token embedded in each pool.

use std::collections::HashMap;

use crate::domain::{Address, Amount};
use crate::error::{DexError, Result};
use crate::events::{Event, EventLog};
use crate::math::CheckedArithmetic;
use crate::traits::FungibleToken;

/// Display symbol for every pool's share token.
pub const SHARE_SYMBOL: &str = "TRI-LP";

/// Display decimals for share tokens.
pub const SHARE_DECIMALS: u8 = 18;

/// Fungible liquidity shares of one pool.
///
/// Shares represent proportional ownership of the pool's reserves and
/// move with full fungible semantics — the router pulls them from
/// withdrawing callers via allowance exactly as it pulls deposit
/// tokens. Minting and burning are crate-internal: only the pool's own
/// accounting creates or destroys shares.
///
/// Share `Transfer`/`Approval` events are tagged with the pool's
/// address, which doubles as the share token's address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LpShares {
    pool: Address,
    total_supply: Amount,
    balances: HashMap<Address, Amount>,
    allowances: HashMap<(Address, Address), Amount>,
}

impl LpShares {
    /// Creates an empty share book for the pool at `pool`.
    #[must_use]
    pub fn new(pool: Address) -> Self {
        Self {
            pool,
            total_supply: Amount::ZERO,
            balances: HashMap::new(),
            allowances: HashMap::new(),
        }
    }

    /// Creates `value` shares credited to `to`.
    ///
    /// Minting to the zero address is how the minimum-liquidity floor is
    /// locked: those shares exist in the supply but no key can move them.
    pub(crate) fn mint(&mut self, to: Address, value: Amount, events: &mut EventLog) -> Result<()> {
        self.total_supply = self
            .total_supply
            .checked_add(&value)
            .ok_or(DexError::Overflow("share supply"))?;
        self.credit(to, value)?;
        events.record(Event::Transfer {
            token: self.pool,
            from: Address::zero(),
            to,
            value,
        });
        Ok(())
    }

    /// Destroys `value` shares held by `from`.
    pub(crate) fn burn(&mut self, from: Address, value: Amount, events: &mut EventLog) -> Result<()> {
        self.debit(from, value)?;
        self.total_supply = self
            .total_supply
            .checked_sub(&value)
            .ok_or(DexError::Underflow("share supply"))?;
        events.record(Event::Transfer {
            token: self.pool,
            from,
            to: Address::zero(),
            value,
        });
        Ok(())
    }

    fn credit(&mut self, to: Address, value: Amount) -> Result<()> {
        let balance = self.balance_of(&to);
        let updated = balance
            .checked_add(&value)
            .ok_or(DexError::Overflow("share credit"))?;
        self.balances.insert(to, updated);
        Ok(())
    }

    fn debit(&mut self, from: Address, value: Amount) -> Result<()> {
        let balance = self.balance_of(&from);
        let updated = balance
            .checked_sub(&value)
            .ok_or(DexError::InsufficientShareBalance)?;
        self.balances.insert(from, updated);
        Ok(())
    }
}

impl FungibleToken for LpShares {
    fn address(&self) -> Address {
        self.pool
    }

    fn symbol(&self) -> &str {
        SHARE_SYMBOL
    }

    fn decimals(&self) -> u8 {
        SHARE_DECIMALS
    }

    fn total_supply(&self) -> Amount {
        self.total_supply
    }

    fn balance_of(&self, owner: &Address) -> Amount {
        self.balances.get(owner).copied().unwrap_or(Amount::ZERO)
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn transfer(
        &mut self,
        from: Address,
        to: Address,
        value: Amount,
        events: &mut EventLog,
    ) -> Result<()> {
        self.debit(from, value)?;
        self.credit(to, value)?;
        events.record(Event::Transfer {
            token: self.pool,
            from,
            to,
            value,
        });
        Ok(())
    }

    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        value: Amount,
        events: &mut EventLog,
    ) -> Result<()> {
        let allowed = self.allowance(&from, &spender);
        if allowed < value {
            return Err(DexError::InsufficientShareAllowance);
        }
        if allowed != Amount::MAX {
            let remaining = allowed.safe_sub(&value)?;
            self.allowances.insert((from, spender), remaining);
        }
        self.transfer(from, to, value, events)
    }

    fn approve(
        &mut self,
        owner: Address,
        spender: Address,
        value: Amount,
        events: &mut EventLog,
    ) -> Result<()> {
        self.allowances.insert((owner, spender), value);
        events.record(Event::Approval {
            token: self.pool,
            owner,
            spender,
            value,
        });
        Ok(())
    }
}

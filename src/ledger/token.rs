//! ERC-20-style token contract state.

use std::collections::HashMap;

use crate::domain::{Address, Amount};
use crate::error::{DexError, Result};
use crate::events::{Event, EventLog};
use crate::math::CheckedArithmetic;
use crate::traits::FungibleToken;

/// One fungible token contract: metadata, balances, and allowances.
///
/// Stands in for the external token contracts the original system
/// trades; the pools and router only ever touch it through
/// [`FungibleToken`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenContract {
    address: Address,
    name: String,
    symbol: String,
    decimals: u8,
    total_supply: Amount,
    balances: HashMap<Address, Amount>,
    allowances: HashMap<(Address, Address), Amount>,
}

impl TokenContract {
    /// Creates a token with zero supply.
    #[must_use]
    pub fn new(address: Address, name: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            address,
            name: name.into(),
            symbol: symbol.into(),
            decimals,
            total_supply: Amount::ZERO,
            balances: HashMap::new(),
            allowances: HashMap::new(),
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Creates `value` new units credited to `to`.
    ///
    /// Host-level supply creation, the analogue of the original test
    /// token's constructor mint. Emits a `Transfer` from the zero
    /// address.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`] if the supply or the recipient's
    /// balance would exceed the representable range.
    pub fn mint(&mut self, to: Address, value: Amount, events: &mut EventLog) -> Result<()> {
        self.total_supply = self
            .total_supply
            .checked_add(&value)
            .ok_or(DexError::Overflow("token supply"))?;
        self.credit(to, value)?;
        events.record(Event::Transfer {
            token: self.address,
            from: Address::zero(),
            to,
            value,
        });
        Ok(())
    }

    fn credit(&mut self, to: Address, value: Amount) -> Result<()> {
        let balance = self.balance_of(&to);
        let updated = balance
            .checked_add(&value)
            .ok_or(DexError::Overflow("balance credit"))?;
        self.balances.insert(to, updated);
        Ok(())
    }

    fn debit(&mut self, from: Address, value: Amount) -> Result<()> {
        let balance = self.balance_of(&from);
        let updated = balance
            .checked_sub(&value)
            .ok_or(DexError::InsufficientBalance)?;
        self.balances.insert(from, updated);
        Ok(())
    }
}

impl FungibleToken for TokenContract {
    fn address(&self) -> Address {
        self.address
    }

    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn decimals(&self) -> u8 {
        self.decimals
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
            token: self.address,
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
            return Err(DexError::InsufficientAllowance);
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
            token: self.address,
            owner,
            spender,
            value,
        });
        Ok(())
    }
}

//! Registry of fungible token contracts.
//!
//! [`TokenLedger`] owns every [`TokenContract`] the exchange can trade
//! and routes balance queries and transfers to the right one by address.
//! Pools read their own balances from here to infer deposits, and the
//! router moves caller funds through it.

mod token;

use std::collections::HashMap;

use crate::domain::{Address, Amount};
use crate::error::{DexError, Result};
use crate::events::EventLog;
use crate::traits::FungibleToken;

pub use token::TokenContract;

/// All registered token contracts, keyed by address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenLedger {
    tokens: HashMap<Address, TokenContract>,
}

impl TokenLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new token contract at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::TokenExists`] if the address is taken.
    pub fn register(
        &mut self,
        address: Address,
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u8,
    ) -> Result<()> {
        if self.tokens.contains_key(&address) {
            return Err(DexError::TokenExists);
        }
        self.tokens
            .insert(address, TokenContract::new(address, name, symbol, decimals));
        Ok(())
    }

    /// Returns `true` if a token contract exists at `address`.
    #[must_use]
    pub fn is_registered(&self, address: &Address) -> bool {
        self.tokens.contains_key(address)
    }

    /// Immutable access to the token at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::UnknownToken`] for unregistered addresses.
    pub fn token(&self, address: &Address) -> Result<&TokenContract> {
        self.tokens.get(address).ok_or(DexError::UnknownToken)
    }

    /// Mutable access to the token at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::UnknownToken`] for unregistered addresses.
    pub fn token_mut(&mut self, address: &Address) -> Result<&mut TokenContract> {
        self.tokens.get_mut(address).ok_or(DexError::UnknownToken)
    }

    /// Creates `value` units of `token` credited to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::UnknownToken`] for unregistered addresses,
    /// or an arithmetic error from the supply update.
    pub fn mint(
        &mut self,
        token: &Address,
        to: Address,
        value: Amount,
        events: &mut EventLog,
    ) -> Result<()> {
        self.token_mut(token)?.mint(to, value, events)
    }

    /// Balance of `owner` in `token`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::UnknownToken`] for unregistered addresses.
    pub fn balance_of(&self, token: &Address, owner: &Address) -> Result<Amount> {
        Ok(self.token(token)?.balance_of(owner))
    }

    /// Remaining allowance granted by `owner` to `spender` in `token`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::UnknownToken`] for unregistered addresses.
    pub fn allowance(&self, token: &Address, owner: &Address, spender: &Address) -> Result<Amount> {
        Ok(self.token(token)?.allowance(owner, spender))
    }

    /// Moves `value` of `token` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// [`DexError::UnknownToken`] or [`DexError::InsufficientBalance`].
    pub fn transfer(
        &mut self,
        token: &Address,
        from: Address,
        to: Address,
        value: Amount,
        events: &mut EventLog,
    ) -> Result<()> {
        self.token_mut(token)?.transfer(from, to, value, events)
    }

    /// Allowance-consuming transfer on behalf of `spender`.
    ///
    /// # Errors
    ///
    /// [`DexError::UnknownToken`], [`DexError::InsufficientAllowance`],
    /// or [`DexError::InsufficientBalance`].
    pub fn transfer_from(
        &mut self,
        token: &Address,
        spender: Address,
        from: Address,
        to: Address,
        value: Amount,
        events: &mut EventLog,
    ) -> Result<()> {
        self.token_mut(token)?
            .transfer_from(spender, from, to, value, events)
    }

    /// Sets `spender`'s allowance over `owner`'s `token` balance.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::UnknownToken`] for unregistered addresses.
    pub fn approve(
        &mut self,
        token: &Address,
        owner: Address,
        spender: Address,
        value: Amount,
        events: &mut EventLog,
    ) -> Result<()> {
        self.token_mut(token)?.approve(owner, spender, value, events)
    }
}

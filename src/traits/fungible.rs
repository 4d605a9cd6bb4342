//! The fungible-asset seam.
//!
//! [`FungibleToken`] is the interface the exchange core trades through:
//! anything exposing balances, transfers, and allowances with these
//! semantics is tradable. The ledger's ERC-20-style
//! [`TokenContract`](crate::ledger::TokenContract) implements it, and so
//! does each pool's embedded liquidity-share token — shares move through
//! the router with exactly the same transfer/approve mechanics as the
//! assets they represent.
//!
//! There is no ambient caller identity in the core, so every mutating
//! method names the acting account explicitly. Implementations must
//! keep balances non-negative, keep the sum of balances equal to the
//! total supply, and make each operation atomic.

use crate::domain::{Address, Amount};
use crate::error::Result;
use crate::events::EventLog;

/// Fungible-token operations required of any tradable asset.
///
/// Mutating methods append [`Transfer`](crate::events::Event::Transfer)
/// or [`Approval`](crate::events::Event::Approval) events to the given
/// log; queries are side-effect free.
pub trait FungibleToken {
    /// The contract's own address, used to tag emitted events.
    fn address(&self) -> Address;

    /// Display symbol.
    fn symbol(&self) -> &str;

    /// Display decimals. The core never scales by this; it exists for
    /// off-chain presentation.
    fn decimals(&self) -> u8;

    /// Total outstanding supply.
    fn total_supply(&self) -> Amount;

    /// Balance of `owner`; zero for accounts never seen.
    fn balance_of(&self, owner: &Address) -> Amount;

    /// Remaining allowance granted by `owner` to `spender`.
    fn allowance(&self, owner: &Address, spender: &Address) -> Amount;

    /// Moves `value` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Fails when `from`'s balance is below `value`; implementations
    /// surface their own insufficient-balance variant.
    fn transfer(
        &mut self,
        from: Address,
        to: Address,
        value: Amount,
        events: &mut EventLog,
    ) -> Result<()>;

    /// Moves `value` from `from` to `to` on behalf of `spender`,
    /// consuming allowance.
    ///
    /// An allowance of [`Amount::MAX`] is treated as unlimited and is
    /// not decremented.
    ///
    /// # Errors
    ///
    /// Fails when the allowance or the balance is below `value`.
    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        value: Amount,
        events: &mut EventLog,
    ) -> Result<()>;

    /// Sets `spender`'s allowance over `owner`'s balance to `value`,
    /// replacing any previous allowance.
    fn approve(
        &mut self,
        owner: Address,
        spender: Address,
        value: Amount,
        events: &mut EventLog,
    ) -> Result<()>;
}

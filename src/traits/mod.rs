//! Core abstractions of the exchange.
//!
//! A single trait lives here: [`FungibleToken`], the seam between the
//! exchange core and the assets it moves. Pools and the router never
//! care what a balance *is*, only that it transfers with fungible
//! semantics.

mod fungible;

pub use fungible::FungibleToken;

//! # Triton DEX
//!
//! Constant-product AMM exchange core: a factory/pool/router suite in
//! the Uniswap V2 mold, plus the off-chain quote mirror, modeled as a
//! deterministic in-memory state machine.
//!
//! The crate implements the parts of a DEX with real invariants:
//!
//! - **Pools** price swaps under the `x · y = k` constant-product rule
//!   with a flat 0.3% fee accruing to reserves, and account liquidity
//!   through a fungible share token with a permanently locked minimum.
//! - **The factory** keeps one pool per unordered token pair at a
//!   deterministic, content-derived address that clients can compute
//!   before the pool exists.
//! - **The router** stages multi-step flows — quote, pull funds, invoke
//!   pool — under caller-supplied slippage minimums and deadlines, each
//!   call fully atomic.
//! - **The quote library** exposes the exact integer pricing formulas
//!   for off-chain previews, byte-for-byte the math the router executes.
//!
//! Front ends, wallets, and key management live outside: every write
//! names its authenticated `sender` explicitly.
//!
//! # Quick Start
//!
//! ```rust
//! use triton_dex::dex::Dex;
//! use triton_dex::domain::{Address, Amount};
//!
//! let mut dex = Dex::new();
//! let alice = Address::from_bytes([0xAA; 32]);
//! let token_a = Address::from_bytes([1; 32]);
//! let token_b = Address::from_bytes([2; 32]);
//!
//! // Host setup: two tokens and a funded account.
//! dex.register_token(token_a, "tokenA", "A", 18).expect("register");
//! dex.register_token(token_b, "tokenB", "B", 18).expect("register");
//! dex.mint_token(token_a, alice, Amount::new(1_000_000)).expect("fund");
//! dex.mint_token(token_b, alice, Amount::new(1_000_000)).expect("fund");
//!
//! // Approve the router, then add liquidity; the pool is created on
//! // first use at its precomputed address.
//! let router = dex.router();
//! dex.approve(token_a, alice, router, Amount::new(100_000)).expect("approve");
//! dex.approve(token_b, alice, router, Amount::new(200_000)).expect("approve");
//! let deadline = dex.now().plus(60);
//! let (_, _, liquidity) = dex
//!     .add_liquidity(
//!         alice,
//!         token_a,
//!         token_b,
//!         Amount::new(100_000),
//!         Amount::new(200_000),
//!         Amount::ZERO,
//!         Amount::ZERO,
//!         alice,
//!         deadline,
//!     )
//!     .expect("add liquidity");
//! assert_eq!(liquidity, Amount::new(140_421));
//!
//! // Swap through the router with a slippage floor.
//! dex.approve(token_a, alice, router, Amount::new(10_000)).expect("approve");
//! let out = dex
//!     .swap_token_pair(
//!         alice,
//!         token_a,
//!         token_b,
//!         Amount::new(10_000),
//!         Amount::new(18_000),
//!         alice,
//!         deadline,
//!     )
//!     .expect("swap");
//! assert_eq!(out, Amount::new(18_132));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │    Client     │  previews with quote::get_amount_out
//! └──────┬───────┘
//!        │ add_liquidity / remove_liquidity / swap_token_pair
//!        ▼
//! ┌──────────────┐
//! │    Router     │  deadline + slippage bounds, atomic staging
//! └──────┬───────┘
//!        │ creates via PairRegistry on first deposit
//!        ▼
//! ┌──────────────┐
//! │     Pool      │  x·y = k, fee-adjusted invariant check, LP shares
//! └──────┬───────┘
//!        │ balances
//!        ▼
//! ┌──────────────┐
//! │    Ledger     │  FungibleToken contracts, EventLog
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Address`](domain::Address), [`Amount`](domain::Amount), [`TokenPair`](domain::TokenPair), [`Timestamp`](domain::Timestamp) |
//! | [`traits`] | The [`FungibleToken`](traits::FungibleToken) seam |
//! | [`math`]   | Exact integer sqrt, `min`, checked arithmetic |
//! | [`ledger`] | Token contracts and the [`TokenLedger`](ledger::TokenLedger) |
//! | [`events`] | [`Event`](events::Event) log for off-chain reconciliation |
//! | [`pool`]   | [`ConstantProductPool`](pool::ConstantProductPool) and its share token |
//! | [`factory`] | [`PairRegistry`](factory::PairRegistry) and deterministic addressing |
//! | [`quote`]  | Shared on/off-chain pricing formulas |
//! | [`router`] | Routed entry points on [`Dex`](dex::Dex) |
//! | [`dex`]    | The transactional state container |
//! | [`error`]  | [`DexError`](error::DexError) taxonomy |
//! | [`prelude`] | Convenience re-exports |

pub mod dex;
pub mod domain;
pub mod error;
pub mod events;
pub mod factory;
pub mod ledger;
pub mod math;
pub mod pool;
pub mod prelude;
pub mod quote;
pub mod router;
pub mod traits;

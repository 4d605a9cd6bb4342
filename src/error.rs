//! Unified error type for the exchange core.
//!
//! Every fallible operation across the crate returns [`DexError`]. Each
//! variant renders as a stable, named reason string; front ends are
//! expected to display the string verbatim (or map the variant to a
//! friendlier message). All failures are synchronous and fully
//! reverting — no partial state survives an `Err`.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, DexError>;

/// All failure conditions produced by the exchange core.
///
/// Grouped by class: authorization, invariant violation,
/// insufficient-amount, precondition/lookup, temporal, and arithmetic.
/// Arithmetic variants carry a short static context string identifying
/// the computation that failed, since "overflow" alone is useless in a
/// pipeline of a dozen multiplications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DexError {
    // -- authorization ------------------------------------------------------
    /// `initialize` called twice, or by anyone other than the factory.
    #[error("initialization forbidden")]
    InitializationForbidden,

    /// A pool operation was attempted before the factory initialized it.
    #[error("pool not initialized")]
    PoolNotInitialized,

    /// A pool mutation re-entered while another was in flight.
    #[error("locked")]
    Locked,

    // -- invariant violation ------------------------------------------------
    /// The post-swap fee-adjusted product fell below the pre-swap product.
    #[error("K")]
    KInvariant,

    // -- insufficient-amount class -------------------------------------------
    /// A swap was attempted with no net input transferred in.
    #[error("insufficient input amount")]
    InsufficientInputAmount,

    /// Requested or realized output below what the caller will accept.
    #[error("insufficient output amount")]
    InsufficientOutputAmount,

    /// A reserve needed for pricing is zero, or a swap asked for more
    /// than a reserve holds.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// A quote was requested for a zero amount.
    #[error("insufficient amount")]
    InsufficientAmount,

    /// First deposit too small to clear the permanently locked floor.
    #[error("below minimum liquidity")]
    BelowMinimumLiquidity,

    /// A follow-up deposit rounded down to zero shares.
    #[error("insufficient liquidity minted")]
    InsufficientLiquidityMinted,

    /// `burn` found no shares held by the pool.
    #[error("insufficient liquidity burned")]
    InsufficientLiquidityBurned,

    /// Realized A-side amount fell below the caller's minimum.
    #[error("insufficient A amount")]
    InsufficientAAmount,

    /// Realized B-side amount fell below the caller's minimum.
    #[error("insufficient B amount")]
    InsufficientBAmount,

    /// Token transfer exceeds the sender's balance.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// Token `transfer_from` exceeds the spender's allowance.
    #[error("insufficient allowance")]
    InsufficientAllowance,

    /// Liquidity-share transfer exceeds the holder's balance.
    #[error("insufficient share balance")]
    InsufficientShareBalance,

    /// Liquidity-share `transfer_from` exceeds the spender's allowance.
    #[error("insufficient share allowance")]
    InsufficientShareAllowance,

    // -- precondition / lookup ----------------------------------------------
    /// A pair of two identical token addresses.
    #[error("identical tokens")]
    IdenticalTokens,

    /// `create_pool` for a pair that already has one.
    #[error("pool already exists")]
    PoolExists,

    /// A router operation referenced a pair with no registered pool.
    #[error("pool does not exist")]
    PoolDoesNotExist,

    /// An address that is not a registered token contract.
    #[error("unknown token")]
    UnknownToken,

    /// A token registration at an address already in use.
    #[error("token already registered")]
    TokenExists,

    // -- temporal ------------------------------------------------------------
    /// The caller-supplied deadline has passed.
    #[error("expired")]
    Expired,

    // -- arithmetic -----------------------------------------------------------
    /// 256-bit addition or multiplication exceeded the representable range.
    #[error("overflow: {0}")]
    Overflow(&'static str),

    /// Subtraction would have produced a negative amount.
    #[error("underflow: {0}")]
    Underflow(&'static str),

    /// Division by a zero denominator.
    #[error("division by zero")]
    DivisionByZero,
}

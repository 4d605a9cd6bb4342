//! Property-based tests for pool invariants.
//!
//! Covered properties:
//!
//! 1. **Invariant preservation** — `reserve0 × reserve1` never decreases
//!    across quoted swaps, in either direction.
//! 2. **Quote bound** — `get_amount_out` never reaches the output
//!    reserve.
//! 3. **Quote monotonicity** — a larger input never yields a smaller
//!    output.
//! 4. **Liquidity conservation** — mint-then-burn returns at most the
//!    deposit.
//! 5. **Pair canonicalization** — construction order never matters.
//! 6. **Square-root exactness** — `root² ≤ n < (root+1)²` everywhere.

use primitive_types::U256;
use proptest::prelude::*;

use crate::domain::{Address, Amount, TokenPair};
use crate::events::EventLog;
use crate::ledger::TokenLedger;
use crate::math::integer_sqrt;
use crate::pool::ConstantProductPool;
use crate::quote::get_amount_out;
use crate::traits::FungibleToken;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn addr(byte: u8) -> Address {
    Address::from_bytes([byte; 32])
}

struct Harness {
    pool: ConstantProductPool,
    ledger: TokenLedger,
    events: EventLog,
}

const TOKEN0: u8 = 1;
const TOKEN1: u8 = 2;
const POOL: u8 = 0x70;
const FACTORY: u8 = 0xF0;
const TRADER: u8 = 0xA0;
const PROVIDER: u8 = 0xA1;

/// Funded, initialized pool with the given starting reserves.
fn harness(reserve0: u128, reserve1: u128) -> Harness {
    let mut ledger = TokenLedger::new();
    let mut events = EventLog::new();
    ledger
        .register(addr(TOKEN0), "tokenA", "A", 18)
        .expect("register");
    ledger
        .register(addr(TOKEN1), "tokenB", "B", 18)
        .expect("register");
    for token in [addr(TOKEN0), addr(TOKEN1)] {
        for account in [addr(TRADER), addr(PROVIDER)] {
            ledger
                .mint(&token, account, Amount::new(u128::MAX / 8), &mut events)
                .expect("fund");
        }
    }

    let mut pool = ConstantProductPool::new(addr(POOL), addr(FACTORY));
    let pair = TokenPair::new(addr(TOKEN0), addr(TOKEN1)).expect("pair");
    pool.initialize(addr(FACTORY), pair).expect("initialize");

    ledger
        .transfer(
            &addr(TOKEN0),
            addr(PROVIDER),
            addr(POOL),
            Amount::new(reserve0),
            &mut events,
        )
        .expect("seed reserve0");
    ledger
        .transfer(
            &addr(TOKEN1),
            addr(PROVIDER),
            addr(POOL),
            Amount::new(reserve1),
            &mut events,
        )
        .expect("seed reserve1");
    pool.mint(addr(PROVIDER), addr(PROVIDER), &ledger, &mut events)
        .expect("seed mint");

    Harness {
        pool,
        ledger,
        events,
    }
}

/// Executes one quoted swap in the given direction; skips dust inputs
/// whose quote rounds to zero.
fn quoted_swap(h: &mut Harness, amount_in: u128, zero_for_one: bool) {
    let (reserve0, reserve1) = h.pool.reserves();
    let (reserve_in, reserve_out) = if zero_for_one {
        (reserve0, reserve1)
    } else {
        (reserve1, reserve0)
    };
    let Ok(amount_out) = get_amount_out(Amount::new(amount_in), reserve_in, reserve_out) else {
        return;
    };
    if amount_out.is_zero() {
        return;
    }

    let token_in = if zero_for_one { addr(TOKEN0) } else { addr(TOKEN1) };
    h.ledger
        .transfer(
            &token_in,
            addr(TRADER),
            addr(POOL),
            Amount::new(amount_in),
            &mut h.events,
        )
        .expect("deposit");
    let (out0, out1) = if zero_for_one {
        (Amount::ZERO, amount_out)
    } else {
        (amount_out, Amount::ZERO)
    };
    h.pool
        .swap(addr(TRADER), out0, out1, addr(TRADER), &mut h.ledger, &mut h.events)
        .expect("quoted swap satisfies K");
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property 1: the reserve product never decreases across swaps.
    #[test]
    fn invariant_never_decreases(
        reserve0 in 10_000u128..1_000_000_000,
        reserve1 in 10_000u128..1_000_000_000,
        swaps in prop::collection::vec((1u128..10_000_000, any::<bool>()), 1..12),
    ) {
        let mut h = harness(reserve0, reserve1);
        let (r0, r1) = h.pool.reserves();
        let mut k_prev = r0.widening_mul(&r1);

        for (amount_in, zero_for_one) in swaps {
            quoted_swap(&mut h, amount_in, zero_for_one);
            let (r0, r1) = h.pool.reserves();
            let k_now = r0.widening_mul(&r1);
            prop_assert!(k_now >= k_prev);
            k_prev = k_now;
        }
    }

    /// Property 2: a quote can never drain the output reserve.
    #[test]
    fn quote_stays_below_reserve_out(
        amount_in in 1u128..u128::MAX / 1_000,
        reserve_in in 1u128..u128::MAX / 1_000,
        reserve_out in 1u128..u128::MAX / 1_000,
    ) {
        let out = get_amount_out(
            Amount::new(amount_in),
            Amount::new(reserve_in),
            Amount::new(reserve_out),
        );
        if let Ok(out) = out {
            prop_assert!(out < Amount::new(reserve_out));
        }
    }

    /// Property 3: larger inputs never quote smaller outputs.
    #[test]
    fn quote_is_monotonic(
        amount_in in 1u128..1_000_000_000_000,
        bump in 1u128..1_000_000,
        reserve_in in 1u128..1_000_000_000_000,
        reserve_out in 1u128..1_000_000_000_000,
    ) {
        let base = get_amount_out(
            Amount::new(amount_in),
            Amount::new(reserve_in),
            Amount::new(reserve_out),
        );
        let bigger = get_amount_out(
            Amount::new(amount_in + bump),
            Amount::new(reserve_in),
            Amount::new(reserve_out),
        );
        if let (Ok(base), Ok(bigger)) = (base, bigger) {
            prop_assert!(bigger >= base);
        }
    }

    /// Property 4: mint-then-burn cannot extract more than was deposited.
    #[test]
    fn liquidity_round_trip_is_lossy_at_most(
        reserve0 in 10_000u128..1_000_000_000,
        reserve1 in 10_000u128..1_000_000_000,
        deposit0 in 1_000u128..1_000_000_000,
        deposit1 in 1_000u128..1_000_000_000,
    ) {
        let mut h = harness(reserve0, reserve1);

        h.ledger
            .transfer(&addr(TOKEN0), addr(TRADER), addr(POOL), Amount::new(deposit0), &mut h.events)
            .expect("deposit0");
        h.ledger
            .transfer(&addr(TOKEN1), addr(TRADER), addr(POOL), Amount::new(deposit1), &mut h.events)
            .expect("deposit1");

        let minted = h.pool.mint(addr(TRADER), addr(TRADER), &h.ledger, &mut h.events);
        let Ok(minted) = minted else {
            // Dust deposit rounded to zero shares; nothing to check.
            return Ok(());
        };

        h.pool
            .shares_mut()
            .transfer(addr(TRADER), addr(POOL), minted, &mut h.events)
            .expect("stage shares");
        let (out0, out1) = h
            .pool
            .burn(addr(TRADER), addr(TRADER), &mut h.ledger, &mut h.events)
            .expect("burn");

        prop_assert!(out0 <= Amount::new(deposit0));
        prop_assert!(out1 <= Amount::new(deposit1));
    }

    /// Property 5: token pairs canonicalize identically from either order.
    #[test]
    fn pair_order_never_matters(a in any::<[u8; 32]>(), b in any::<[u8; 32]>()) {
        let (a, b) = (Address::from_bytes(a), Address::from_bytes(b));
        prop_assume!(a != b);
        let forward = TokenPair::new(a, b).expect("distinct");
        let reversed = TokenPair::new(b, a).expect("distinct");
        prop_assert_eq!(forward, reversed);
        prop_assert!(forward.token0() < forward.token1());
    }

    /// Property 6: the integer square root is the exact floor.
    #[test]
    fn sqrt_is_exact_floor(n in any::<u128>()) {
        let n = U256::from(n);
        let root = integer_sqrt(n);
        prop_assert!(root * root <= n);
        prop_assert!((root + 1).full_mul(root + 1) > n.full_mul(U256::one()));
    }
}

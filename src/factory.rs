//! Pair registry and deterministic pool addressing.
//!
//! The registry tracks at most one pool per unordered token pair, keyed
//! by the canonicalized [`TokenPair`] so that lookups agree for either
//! argument order. Pool addresses are not allocated — they are *derived*
//! from the registry's own identity and the pair, so any client can
//! compute where a pool will live before it exists.
//!
//! # Derivation
//!
//! ```text
//! salt      = keccak256(token0 ++ token1)          (canonical order)
//! code_hash = keccak256(POOL_CODE_ID)
//! address   = keccak256(0xff ++ registry ++ salt ++ code_hash)
//! ```
//!
//! The byte layout mirrors the create2 scheme the original deployment
//! used; with 32-byte addresses the full digest is the identifier. Two
//! registries with different identities derive disjoint address spaces.

use std::collections::HashMap;

use sha3::{Digest, Keccak256};
use tracing::info;

use crate::domain::{Address, TokenPair};

/// Stand-in for the pool bytecode hash input of the create2 layout:
/// a fixed identifier of the pool implementation.
pub const POOL_CODE_ID: &[u8] = b"triton-dex/constant-product-pool/v1";

pub(crate) fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// The factory's registry of pools, one per unordered token pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairRegistry {
    address: Address,
    pools: HashMap<TokenPair, Address>,
}

impl PairRegistry {
    /// Creates an empty registry with the given identity.
    ///
    /// The identity participates in address derivation, so registries
    /// deployed under different identities never collide.
    #[must_use]
    pub fn new(address: Address) -> Self {
        Self {
            address,
            pools: HashMap::new(),
        }
    }

    /// The registry's own identity.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Looks up the pool for an unordered pair.
    ///
    /// Returns `None` when no pool exists — including for an
    /// identical-token "pair", which can never have one. Order of the
    /// arguments never matters.
    #[must_use]
    pub fn get_pool(&self, token_a: Address, token_b: Address) -> Option<Address> {
        let pair = TokenPair::new(token_a, token_b).ok()?;
        self.pools.get(&pair).copied()
    }

    /// Returns `true` if the pair already has a pool.
    #[must_use]
    pub fn contains(&self, pair: &TokenPair) -> bool {
        self.pools.contains_key(pair)
    }

    /// Number of registered pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Returns `true` when no pool has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Iterates over `(pair, pool address)` entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&TokenPair, &Address)> {
        self.pools.iter()
    }

    /// Derives the deterministic address for a pair's pool.
    ///
    /// Pure: computing before and after creation yields the same value.
    #[must_use]
    pub fn pool_address(&self, pair: &TokenPair) -> Address {
        let salt = keccak256(&pair.salt_preimage());
        let code_hash = keccak256(POOL_CODE_ID);

        let mut preimage = [0u8; 97];
        preimage[0] = 0xff;
        preimage[1..33].copy_from_slice(&self.address.as_bytes());
        preimage[33..65].copy_from_slice(&salt);
        preimage[65..].copy_from_slice(&code_hash);
        Address::from_bytes(keccak256(&preimage))
    }

    /// Records a newly created pool under its canonical pair key.
    pub(crate) fn insert(&mut self, pair: TokenPair, pool: Address) {
        info!(token0 = %pair.token0(), token1 = %pair.token1(), %pool, "pool registered");
        self.pools.insert(pair, pool);
    }
}

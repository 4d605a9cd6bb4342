//! Logical time for deadline enforcement.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DexError;

/// A logical timestamp in seconds, set by the host.
///
/// The exchange core never reads a wall clock: the embedding environment
/// advances time explicitly, mirroring how a chain exposes a block
/// timestamp. Deadlines are plain `Timestamp` values compared against
/// the current one.
///
/// # Examples
///
/// ```
/// use triton_dex::domain::Timestamp;
///
/// let now = Timestamp::new(1_000);
/// let deadline = now.plus(60);
/// assert!(now.check_deadline(deadline).is_ok());
/// assert!(deadline.plus(1).check_deadline(deadline).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Creates a timestamp from seconds.
    #[must_use]
    pub const fn new(seconds: u64) -> Self {
        Self(seconds)
    }

    /// Returns the raw seconds value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Returns this timestamp shifted forward by `seconds`, saturating
    /// at the representable maximum.
    #[must_use]
    pub const fn plus(&self, seconds: u64) -> Self {
        Self(self.0.saturating_add(seconds))
    }

    /// Fails once the current time (`self`) has passed `deadline`.
    ///
    /// A deadline equal to the current time is still acceptable; only a
    /// strictly later current time rejects.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Expired`] if `self > deadline`.
    pub fn check_deadline(&self, deadline: Timestamp) -> Result<(), DexError> {
        if *self > deadline {
            return Err(DexError::Expired);
        }
        Ok(())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

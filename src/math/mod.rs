//! Arithmetic utilities for pool accounting.
//!
//! Exact integer square root for first-mint share pricing, `min` for
//! proportional-deposit selection, and the [`CheckedArithmetic`] trait
//! that turns checked operations into `?`-friendly results.

mod checked;
mod sqrt;

pub use checked::CheckedArithmetic;
pub use sqrt::{integer_sqrt, min};

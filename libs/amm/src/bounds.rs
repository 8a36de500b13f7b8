//! Bounded withdrawal parameters
//!
//! Both types are validated on construction so the withdrawal calculator
//! never sees an out-of-range fraction.

use crate::error::{MathError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 10 000 basis points = 100%
pub const MAX_BASIS_POINTS: u32 = 10_000;

/// Fraction of a provider's units to redeem, in `0..=10_000` basis points
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct BasisPoints(u32);

impl BasisPoints {
    pub const ZERO: Self = Self(0);
    pub const FULL: Self = Self(MAX_BASIS_POINTS);

    pub fn new(value: u32) -> Result<Self> {
        if value > MAX_BASIS_POINTS {
            return Err(MathError::OutOfRange {
                value: value as i64,
                min: 0,
                max: MAX_BASIS_POINTS as i64,
            });
        }
        Ok(Self(value))
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<u32> for BasisPoints {
    type Error = MathError;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(value)
    }
}

impl From<BasisPoints> for u32 {
    fn from(bp: BasisPoints) -> u32 {
        bp.0
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}

/// Signed withdrawal skew in `-10_000..=10_000`.
///
/// Positive values bias the payout toward the external asset, negative
/// values toward the settlement asset, zero withdraws at the pool ratio.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "i32", into = "i32")]
pub struct Asymmetry(i32);

impl Asymmetry {
    pub const SYMMETRIC: Self = Self(0);
    pub const ALL_EXTERNAL: Self = Self(MAX_BASIS_POINTS as i32);
    pub const ALL_NATIVE: Self = Self(-(MAX_BASIS_POINTS as i32));

    pub fn new(value: i32) -> Result<Self> {
        let bound = MAX_BASIS_POINTS as i32;
        if !(-bound..=bound).contains(&value) {
            return Err(MathError::OutOfRange {
                value: value as i64,
                min: -(bound as i64),
                max: bound as i64,
            });
        }
        Ok(Self(value))
    }

    pub fn get(&self) -> i32 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Magnitude in basis points
    pub fn magnitude(&self) -> u32 {
        self.0.unsigned_abs()
    }
}

impl TryFrom<i32> for Asymmetry {
    type Error = MathError;

    fn try_from(value: i32) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Asymmetry> for i32 {
    fn from(a: Asymmetry) -> i32 {
        a.0
    }
}

impl fmt::Display for Asymmetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.0)
    }
}

//! Checked arithmetic over [`U256`]
//!
//! Wraps the `checked_*` primitives of `U256` so each failure names the
//! calculation it happened in. Nothing here saturates or wraps.

use crate::error::{MathError, Result};
use crate::U256;

/// Fallible arithmetic carrying a context label into the error
pub trait CheckedMath: Sized {
    fn safe_add(self, rhs: Self, context: &'static str) -> Result<Self>;
    fn safe_sub(self, rhs: Self, context: &'static str) -> Result<Self>;
    fn safe_mul(self, rhs: Self, context: &'static str) -> Result<Self>;
    /// Floor division
    fn safe_div(self, rhs: Self, context: &'static str) -> Result<Self>;
}

impl CheckedMath for U256 {
    fn safe_add(self, rhs: Self, context: &'static str) -> Result<Self> {
        self.checked_add(rhs).ok_or(MathError::Overflow { context })
    }

    fn safe_sub(self, rhs: Self, context: &'static str) -> Result<Self> {
        self.checked_sub(rhs).ok_or(MathError::Underflow { context })
    }

    fn safe_mul(self, rhs: Self, context: &'static str) -> Result<Self> {
        self.checked_mul(rhs).ok_or(MathError::Overflow { context })
    }

    fn safe_div(self, rhs: Self, context: &'static str) -> Result<Self> {
        self.checked_div(rhs).ok_or(MathError::DivisionByZero { context })
    }
}

/// `a * b / c` with a single floor at the end
pub fn mul_div(a: U256, b: U256, c: U256, context: &'static str) -> Result<U256> {
    a.safe_mul(b, context)?.safe_div(c, context)
}

/// Absolute difference of two unsigned values
pub fn abs_diff(a: U256, b: U256) -> U256 {
    if a >= b {
        a - b
    } else {
        b - a
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflow_is_reported_with_context() {
        let err = U256::MAX.safe_add(U256::one(), "pool units").unwrap_err();
        assert_eq!(err, MathError::Overflow { context: "pool units" });
    }

    #[test]
    fn test_underflow_is_reported() {
        let err = U256::zero().safe_sub(U256::one(), "reserve").unwrap_err();
        assert!(matches!(err, MathError::Underflow { .. }));
    }

    #[test]
    fn test_division_by_zero() {
        let err = U256::from(10u64).safe_div(U256::zero(), "share").unwrap_err();
        assert!(matches!(err, MathError::DivisionByZero { .. }));
    }

    #[test]
    fn test_mul_div_floors_once() {
        // 7 * 3 / 2 = 10 (not 7 / 2 * 3 = 9)
        let v = mul_div(7u64.into(), 3u64.into(), 2u64.into(), "t").unwrap();
        assert_eq!(v, U256::from(10u64));
    }

    #[test]
    fn test_abs_diff_is_symmetric() {
        let a = U256::from(5u64);
        let b = U256::from(9u64);
        assert_eq!(abs_diff(a, b), abs_diff(b, a));
        assert_eq!(abs_diff(a, b), U256::from(4u64));
    }
}

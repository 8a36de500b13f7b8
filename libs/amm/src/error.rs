//! Error types for pool arithmetic
//!
//! Every routine in this crate is checked: overflow, underflow and division
//! by zero surface as a [`MathError`] instead of wrapping or panicking.

use thiserror::Error;

/// Errors raised by the pool-unit, swap and withdrawal calculations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MathError {
    /// Intermediate or final value exceeds 256 bits
    #[error("Arithmetic overflow in {context}")]
    Overflow { context: &'static str },

    /// Subtraction would produce a negative quantity
    #[error("Arithmetic underflow in {context}")]
    Underflow { context: &'static str },

    /// Division by a zero pool value
    #[error("Division by zero in {context}")]
    DivisionByZero { context: &'static str },

    /// A swap was requested with a zero input amount
    #[error("Input amount must be positive")]
    ZeroInput,

    /// One of the reserves required by the calculation is empty
    #[error("Pool reserve is empty")]
    EmptyReserve,

    /// The trade would remove the entire output reserve
    #[error("Swap would exhaust the output reserve")]
    ReserveExhausted,

    /// A provider claims more units than the pool has outstanding
    #[error("Provider units {provider} exceed pool units {pool}")]
    UnitsExceedPool { provider: String, pool: String },

    /// A bounded parameter was constructed outside its range
    #[error("Value {value} outside allowed range [{min}, {max}]")]
    OutOfRange { value: i64, min: i64, max: i64 },
}

pub type Result<T> = std::result::Result<T, MathError>;

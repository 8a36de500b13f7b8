//! Liquidity withdrawal arithmetic
//!
//! Pure calculation over a pool snapshot. Redeems a basis-point fraction of
//! a provider's units at the current reserve ratio and, for asymmetric
//! withdrawals, sizes the rebalancing swap the caller has to run afterwards.
//!
//! ```text
//! claimed   = provider_units * bp / 10_000
//! native    = R * claimed / P
//! external  = A * claimed / P
//! to_swap   = claimed * |asymmetry| / 10_000
//! rebalance = R * to_swap / P   (asymmetry > 0, native -> external)
//!           = A * to_swap / P   (asymmetry < 0, external -> native)
//! ```

use crate::bounds::{Asymmetry, BasisPoints, MAX_BASIS_POINTS};
use crate::checked::{mul_div, CheckedMath};
use crate::error::{MathError, Result};
use crate::U256;

/// Amounts owed to a provider for a withdrawal, before any rebalance swap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Withdrawal {
    pub native: U256,
    pub external: U256,
    pub remaining_provider_units: U256,
    /// Units removed from the pool supply
    pub redeemed_units: U256,
    /// Amount to swap after withdrawal; zero for a symmetric withdrawal
    pub rebalance_amount: U256,
}

/// Compute the withdrawal of `basis_points` of `provider_units` from a pool
/// holding `native_balance` / `external_balance` with `pool_units`
/// outstanding.
pub fn calculate_withdrawal(
    pool_units: U256,
    native_balance: U256,
    external_balance: U256,
    provider_units: U256,
    basis_points: BasisPoints,
    asymmetry: Asymmetry,
) -> Result<Withdrawal> {
    if provider_units > pool_units {
        return Err(MathError::UnitsExceedPool {
            provider: provider_units.to_string(),
            pool: pool_units.to_string(),
        });
    }
    if pool_units.is_zero() {
        return Err(MathError::DivisionByZero {
            context: "withdrawal share",
        });
    }

    let full = U256::from(MAX_BASIS_POINTS);
    let claimed = mul_div(
        provider_units,
        U256::from(basis_points.get()),
        full,
        "claimed units",
    )?;

    let native = mul_div(native_balance, claimed, pool_units, "native withdrawal")?;
    let external = mul_div(external_balance, claimed, pool_units, "external withdrawal")?;

    let rebalance_amount = if asymmetry.is_zero() {
        U256::zero()
    } else {
        let to_swap = mul_div(
            claimed,
            U256::from(asymmetry.magnitude()),
            full,
            "rebalance units",
        )?;
        let balance = if asymmetry.is_positive() {
            native_balance
        } else {
            external_balance
        };
        mul_div(balance, to_swap, pool_units, "rebalance amount")?
    };

    Ok(Withdrawal {
        native,
        external,
        remaining_provider_units: provider_units.safe_sub(claimed, "remaining units")?,
        redeemed_units: claimed,
        rebalance_amount,
    })
}

//! Pool-unit issuance
//!
//! Units are the ownership ledger of a pool. A first contribution receives
//! the geometric mean of the two deposited amounts, so the opening price
//! does not favour either asset. Later contributions receive units in
//! proportion to the value they add at the current reserve ratio, shrunk by
//! a slip term when the deposit ratio diverges from the pool ratio.
//!
//! ```text
//! base   = P * (R*a + r*A) / (2*R*A)
//! D      = (r + R) * (a + A)
//! issued = base * (D - |R*a - r*A|) / D
//! ```
//!
//! A perfectly balanced deposit (`r/R == a/A`) has no slip and receives
//! exactly `P * a / A` units.

use crate::checked::{abs_diff, mul_div, CheckedMath};
use crate::error::{MathError, Result};
use crate::U256;
use tracing::trace;

/// Result of a contribution: the pool's new unit supply and the units minted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitIssuance {
    pub new_pool_units: U256,
    pub issued_units: U256,
}

/// Compute units minted for contributing `native_amount` / `external_amount`
/// to a pool holding `native_balance` / `external_balance` with
/// `pool_units` outstanding.
///
/// Fails with [`MathError::Overflow`] when the unit supply would exceed 256
/// bits and with [`MathError::EmptyReserve`] when units are outstanding but a
/// reserve is empty (the pool value cannot be divided).
pub fn calculate_pool_units(
    pool_units: U256,
    native_balance: U256,
    external_balance: U256,
    native_amount: U256,
    external_amount: U256,
) -> Result<UnitIssuance> {
    if pool_units.is_zero() {
        let product = native_amount.safe_mul(external_amount, "initial unit product")?;
        let issued = product.integer_sqrt();
        return Ok(UnitIssuance {
            new_pool_units: issued,
            issued_units: issued,
        });
    }

    if native_balance.is_zero() || external_balance.is_zero() {
        return Err(MathError::EmptyReserve);
    }

    let (big_r, big_a) = (native_balance, external_balance);
    let (r, a) = (native_amount, external_amount);

    let r_big_a = r.safe_mul(big_a, "contribution value")?;
    let big_r_a = big_r.safe_mul(a, "contribution value")?;
    let value = r_big_a.safe_add(big_r_a, "contribution value")?;

    let two_r_a = U256::from(2u8)
        .safe_mul(big_r, "pool value")?
        .safe_mul(big_a, "pool value")?;
    let base = mul_div(pool_units, value, two_r_a, "proportional units")?;

    let slip_denominator = r
        .safe_add(big_r, "slip denominator")?
        .safe_mul(a.safe_add(big_a, "slip denominator")?, "slip denominator")?;
    // |R*a - r*A| <= R*a + r*A <= D, so this cannot underflow
    let slip_numerator = slip_denominator.safe_sub(abs_diff(big_r_a, r_big_a), "slip adjustment")?;

    let issued = mul_div(base, slip_numerator, slip_denominator, "slip adjusted units")?;
    let new_pool_units = pool_units.safe_add(issued, "pool units")?;

    trace!(
        %pool_units,
        %issued,
        %new_pool_units,
        "Computed contribution units"
    );

    Ok(UnitIssuance {
        new_pool_units,
        issued_units: issued,
    })
}

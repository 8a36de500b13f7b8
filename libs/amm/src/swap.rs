//! Single-pool swap pricing
//!
//! Slip-based constant-product pricing. For input `x` against input reserve
//! `X` and output reserve `Y`:
//!
//! ```text
//! emitted       = x * X * Y / (x + X)^2
//! liquidity_fee = x^2 * Y   / (x + X)^2
//! trade_slip    = x * (2X + x) * 10_000 / X^2      (basis points)
//! ```
//!
//! `emitted + liquidity_fee` is the fee-free constant-product output
//! `x * Y / (x + X)`; the fee is simply left in the output reserve, which
//! raises the value of every outstanding pool unit without minting any.
//! The fee grows quadratically with trade size relative to depth.

use crate::checked::{mul_div, CheckedMath};
use crate::error::{MathError, Result};
use crate::U256;
use serde::{Deserialize, Serialize};

/// Outcome of pricing one trade against one pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SwapOutcome {
    /// Amount of the output asset paid to the trader
    pub emitted: U256,
    /// Output-asset amount retained in the pool as fee
    pub liquidity_fee: U256,
    /// Price impact relative to the pre-trade price, in basis points
    pub trade_slip: U256,
}

/// Reserves after a trade has been applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reserves {
    pub input: U256,
    pub output: U256,
}

/// Price a trade of `amount_in` against `reserve_in` / `reserve_out`.
///
/// Fails with [`MathError::ZeroInput`] for an empty trade,
/// [`MathError::EmptyReserve`] when either reserve is zero and
/// [`MathError::ReserveExhausted`] if the output reserve would reach zero.
pub fn calculate_swap(amount_in: U256, reserve_in: U256, reserve_out: U256) -> Result<SwapOutcome> {
    if amount_in.is_zero() {
        return Err(MathError::ZeroInput);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(MathError::EmptyReserve);
    }

    let depth = amount_in.safe_add(reserve_in, "swap depth")?;
    let depth_sq = depth.safe_mul(depth, "swap depth")?;

    let emitted = mul_div(
        amount_in.safe_mul(reserve_in, "swap result")?,
        reserve_out,
        depth_sq,
        "swap result",
    )?;
    let liquidity_fee = mul_div(
        amount_in.safe_mul(amount_in, "liquidity fee")?,
        reserve_out,
        depth_sq,
        "liquidity fee",
    )?;
    let trade_slip = calculate_trade_slip(amount_in, reserve_in)?;

    if emitted >= reserve_out {
        return Err(MathError::ReserveExhausted);
    }

    Ok(SwapOutcome {
        emitted,
        liquidity_fee,
        trade_slip,
    })
}

/// Price impact of adding `amount_in` to `reserve_in`, in basis points
pub fn calculate_trade_slip(amount_in: U256, reserve_in: U256) -> Result<U256> {
    let two_x = U256::from(2u8).safe_mul(reserve_in, "trade slip")?;
    let numerator = amount_in
        .safe_mul(two_x.safe_add(amount_in, "trade slip")?, "trade slip")?
        .safe_mul(U256::from(10_000u32), "trade slip")?;
    let denominator = reserve_in.safe_mul(reserve_in, "trade slip")?;
    numerator.safe_div(denominator, "trade slip")
}

/// Apply a priced trade to the reserves it was priced against
pub fn apply_swap(amount_in: U256, outcome: &SwapOutcome, reserves: Reserves) -> Result<Reserves> {
    Ok(Reserves {
        input: reserves.input.safe_add(amount_in, "input reserve")?,
        output: reserves.output.safe_sub(outcome.emitted, "output reserve")?,
    })
}

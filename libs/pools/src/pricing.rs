//! Pool-level swap pricing
//!
//! Orients a trade against a [`Pool`]'s two reserves, prices it with
//! [`amm::calculate_swap`] and returns the pool snapshot with the trade
//! applied. Pure: nothing is persisted and no balances move.

use crate::error::{ClpError, Result};
use crate::types::{Asset, Pool};
use amm::{apply_swap, calculate_swap, Reserves, SwapOutcome, U256};

/// Price `amount` of `from` into `to` against `pool`.
///
/// One of `from` / `to` must be `settlement` and the other the pool's
/// external asset.
pub fn swap_one(
    settlement: &Asset,
    from: &Asset,
    amount: U256,
    to: &Asset,
    pool: &Pool,
) -> Result<(SwapOutcome, Pool)> {
    let native_in = if from == settlement && to == &pool.external_asset {
        true
    } else if from == &pool.external_asset && to == settlement {
        false
    } else {
        return Err(ClpError::InvalidRequest(format!(
            "pool {} cannot swap {} into {}",
            pool.external_asset, from, to
        )));
    };

    let reserves = if native_in {
        Reserves {
            input: pool.native_balance,
            output: pool.external_balance,
        }
    } else {
        Reserves {
            input: pool.external_balance,
            output: pool.native_balance,
        }
    };

    let outcome = calculate_swap(amount, reserves.input, reserves.output)
        .map_err(ClpError::SwapComputationFailure)?;
    let after = apply_swap(amount, &outcome, reserves).map_err(ClpError::SwapComputationFailure)?;

    let mut updated = pool.clone();
    if native_in {
        updated.native_balance = after.input;
        updated.external_balance = after.output;
    } else {
        updated.external_balance = after.input;
        updated.native_balance = after.output;
    }

    Ok((outcome, updated))
}

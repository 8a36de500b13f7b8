//! Decommission payout planning
//!
//! A dead pool is drained by paying every provider a full symmetric
//! withdrawal, in provider order. Each payout is computed against the
//! reserves left by the previous ones, so the drain is a fold over the
//! provider sequence with [`DrainState`] as the carried state.

use crate::types::{Address, LiquidityProvider, Pool};
use amm::{calculate_withdrawal, Asymmetry, BasisPoints, CheckedMath, U256};
use serde::{Deserialize, Serialize};

/// Reserve totals still owed to providers not yet paid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrainState {
    pub pool_units: U256,
    pub native_balance: U256,
    pub external_balance: U256,
}

/// One provider's share of a decommissioned pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub provider: Address,
    pub native: U256,
    pub external: U256,
}

impl DrainState {
    pub fn of(pool: &Pool) -> Self {
        Self {
            pool_units: pool.pool_units,
            native_balance: pool.native_balance,
            external_balance: pool.external_balance,
        }
    }

    /// Pay out all of `provider`'s units and return the state for the next one
    pub fn drain(self, provider: &LiquidityProvider) -> amm::Result<(Self, Payout)> {
        let withdrawal = calculate_withdrawal(
            self.pool_units,
            self.native_balance,
            self.external_balance,
            provider.provider_units,
            BasisPoints::FULL,
            Asymmetry::SYMMETRIC,
        )?;

        let next = Self {
            pool_units: self
                .pool_units
                .safe_sub(withdrawal.redeemed_units, "drained units")?,
            native_balance: self
                .native_balance
                .safe_sub(withdrawal.native, "drained native")?,
            external_balance: self
                .external_balance
                .safe_sub(withdrawal.external, "drained external")?,
        };

        Ok((
            next,
            Payout {
                provider: provider.provider_address.clone(),
                native: withdrawal.native,
                external: withdrawal.external,
            },
        ))
    }

    pub fn is_drained(&self) -> bool {
        self.pool_units.is_zero() && self.native_balance.is_zero() && self.external_balance.is_zero()
    }
}

/// Plan every payout for decommissioning `pool`
pub fn plan_decommission(
    pool: &Pool,
    providers: &[LiquidityProvider],
) -> amm::Result<(Vec<Payout>, DrainState)> {
    providers.iter().try_fold(
        (Vec::with_capacity(providers.len()), DrainState::of(pool)),
        |(mut payouts, state), provider| {
            let (next, payout) = state.drain(provider)?;
            payouts.push(payout);
            Ok((payouts, next))
        },
    )
}

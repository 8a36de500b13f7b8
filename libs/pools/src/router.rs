//! Swap Router
//!
//! Every pool pairs an external asset with the settlement asset, so any
//! trade is at most two hops:
//!
//! ```text
//! settlement -> X   : one hop through pool X
//! X -> settlement   : one hop through pool X
//! X -> Y            : X -> settlement through pool X, then settlement -> Y through pool Y
//! ```
//!
//! Hop one completes (pricing, health check, persistence, intermediate
//! transfer) before hop two starts. The router never undoes hop one when hop
//! two fails; the host transaction boundary is responsible for that.

use crate::error::{ClpError, Result};
use crate::ledger::Ledger;
use crate::pricing::swap_one;
use crate::store::PoolStore;
use crate::types::{coins, Asset, Pool};
use amm::{CheckedMath, SwapOutcome, U256};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which pools a trade passes through
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// One side is the settlement asset; `pool` is keyed by the other side
    Direct { pool: Asset },
    /// External to external through the settlement asset
    TwoHop { source: Asset, destination: Asset },
}

impl Route {
    /// Pool the sent amount is deposited into
    pub fn source(&self) -> &Asset {
        match self {
            Route::Direct { pool } => pool,
            Route::TwoHop { source, .. } => source,
        }
    }

    /// Pool the received amount is paid out of
    pub fn destination(&self) -> &Asset {
        match self {
            Route::Direct { pool } => pool,
            Route::TwoHop { destination, .. } => destination,
        }
    }
}

/// One priced hop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hop {
    pub pool: Asset,
    pub from: Asset,
    pub to: Asset,
    pub amount_in: U256,
    pub outcome: SwapOutcome,
}

/// Result of routing a trade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRoute {
    pub hops: Vec<Hop>,
    /// Amount of the received asset owed to the trader
    pub received_amount: U256,
    /// Sum of the per-hop liquidity fees
    pub liquidity_fee: U256,
    /// Sum of the per-hop trade slips, in basis points
    pub trade_slip: U256,
    /// Final pool snapshots, source first
    pub pools: Vec<Pool>,
}

/// A completed hop, reported before the next one runs
enum HopCompleted<'a> {
    /// Hop one of a two-hop route
    Intermediate {
        source: &'a Pool,
        destination: &'a Pool,
        settlement_amount: U256,
    },
    /// The hop paying the trader
    Final { pool: &'a Pool },
}

/// Routes trades through settlement-paired pools
#[derive(Debug, Clone)]
pub struct SwapRouter {
    settlement: Asset,
}

impl SwapRouter {
    pub fn new(settlement: Asset) -> Self {
        Self { settlement }
    }

    pub fn settlement(&self) -> &Asset {
        &self.settlement
    }

    /// Choose the pools for a trade of `sent` into `received`
    pub fn plan(&self, sent: &Asset, received: &Asset) -> Result<Route> {
        if sent == received {
            return Err(ClpError::InvalidRequest(format!(
                "cannot swap {} into itself",
                sent
            )));
        }
        if sent == &self.settlement {
            Ok(Route::Direct {
                pool: received.clone(),
            })
        } else if received == &self.settlement {
            Ok(Route::Direct { pool: sent.clone() })
        } else {
            Ok(Route::TwoHop {
                source: sent.clone(),
                destination: received.clone(),
            })
        }
    }

    /// Price a trade over pool snapshots without persisting or moving funds
    pub fn quote(
        &self,
        sent: &Asset,
        amount: U256,
        received: &Asset,
        source: &Pool,
        destination: &Pool,
    ) -> Result<SwapRoute> {
        self.run(sent, amount, received, source, destination, |_| Ok(()))
    }

    /// Price a trade and apply it: persist each updated pool and, for two
    /// hops, move the intermediate settlement amount from the source pool's
    /// custody to the destination pool's custody.
    ///
    /// The sent amount must already be in the source pool's custody.
    #[allow(clippy::too_many_arguments)]
    pub fn execute<S: PoolStore, L: Ledger>(
        &self,
        store: &mut S,
        ledger: &mut L,
        sent: &Asset,
        amount: U256,
        received: &Asset,
        source: &Pool,
        destination: &Pool,
    ) -> Result<SwapRoute> {
        let settlement = self.settlement.clone();
        self.run(sent, amount, received, source, destination, |completed| {
            match completed {
                HopCompleted::Intermediate {
                    source,
                    destination,
                    settlement_amount,
                } => {
                    store
                        .set_pool(source)
                        .map_err(ClpError::storage("Unable to set pool"))?;
                    let transfer = coins([(settlement.clone(), settlement_amount)]);
                    if !transfer.is_empty() {
                        ledger
                            .send_coins(&source.pool_address, &destination.pool_address, &transfer)
                            .map_err(ClpError::transfer("Unable to move settlement between pools"))?;
                    }
                }
                HopCompleted::Final { pool } => {
                    store
                        .set_pool(pool)
                        .map_err(ClpError::storage("Unable to set pool"))?;
                }
            }
            Ok(())
        })
    }

    fn run(
        &self,
        sent: &Asset,
        amount: U256,
        received: &Asset,
        source: &Pool,
        destination: &Pool,
        mut on_hop: impl FnMut(HopCompleted<'_>) -> Result<()>,
    ) -> Result<SwapRoute> {
        match self.plan(sent, received)? {
            Route::Direct { .. } => {
                let (outcome, pool) = swap_one(&self.settlement, sent, amount, received, destination)?;
                ensure_healthy(&pool)?;
                on_hop(HopCompleted::Final { pool: &pool })?;

                Ok(SwapRoute {
                    received_amount: outcome.emitted,
                    liquidity_fee: outcome.liquidity_fee,
                    trade_slip: outcome.trade_slip,
                    hops: vec![Hop {
                        pool: pool.external_asset.clone(),
                        from: sent.clone(),
                        to: received.clone(),
                        amount_in: amount,
                        outcome,
                    }],
                    pools: vec![pool],
                })
            }
            Route::TwoHop { .. } => {
                let (first, source_after) =
                    swap_one(&self.settlement, sent, amount, &self.settlement, source)?;
                ensure_healthy(&source_after)?;
                on_hop(HopCompleted::Intermediate {
                    source: &source_after,
                    destination,
                    settlement_amount: first.emitted,
                })?;
                debug!(
                    pool = %source_after.external_asset,
                    settlement_amount = %first.emitted,
                    "Completed first hop"
                );

                let (second, destination_after) = swap_one(
                    &self.settlement,
                    &self.settlement,
                    first.emitted,
                    received,
                    destination,
                )?;
                ensure_healthy(&destination_after)?;
                on_hop(HopCompleted::Final {
                    pool: &destination_after,
                })?;

                let liquidity_fee = first
                    .liquidity_fee
                    .safe_add(second.liquidity_fee, "aggregate liquidity fee")
                    .map_err(ClpError::SwapComputationFailure)?;
                let trade_slip = first
                    .trade_slip
                    .safe_add(second.trade_slip, "aggregate trade slip")
                    .map_err(ClpError::SwapComputationFailure)?;

                Ok(SwapRoute {
                    received_amount: second.emitted,
                    liquidity_fee,
                    trade_slip,
                    hops: vec![
                        Hop {
                            pool: source_after.external_asset.clone(),
                            from: sent.clone(),
                            to: self.settlement.clone(),
                            amount_in: amount,
                            outcome: first,
                        },
                        Hop {
                            pool: destination_after.external_asset.clone(),
                            from: self.settlement.clone(),
                            to: received.clone(),
                            amount_in: first.emitted,
                            outcome: second,
                        },
                    ],
                    pools: vec![source_after, destination_after],
                })
            }
        }
    }
}

/// A pool that has traded must still hold both assets
fn ensure_healthy(pool: &Pool) -> Result<()> {
    if pool.native_balance.is_zero() || pool.external_balance.is_zero() {
        return Err(ClpError::PoolTooShallow(format!(
            "swap would empty a reserve of pool {}",
            pool.external_asset
        )));
    }
    Ok(())
}

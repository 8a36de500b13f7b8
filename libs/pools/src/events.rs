//! Operation receipts and the events derived from them
//!
//! Each successful operation returns a typed receipt carrying the final
//! pool/provider snapshots and computed amounts. Hosts that publish events
//! call [`Response::events`]; the schema below mirrors the attribute sets a
//! ledger host usually emits, one domain event per change followed by a
//! `message` event naming the module and sender.

use crate::decommission::Payout;
use crate::router::SwapRoute;
use crate::types::{Address, Coin, LiquidityProvider, Pool};
use amm::{SwapOutcome, U256};
use serde::{Deserialize, Serialize};

/// Module name reported in `message` events
pub const MODULE_NAME: &str = "clp";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    CreatePool {
        pool: Pool,
    },
    CreateLiquidityProvider {
        liquidity_provider: LiquidityProvider,
    },
    AddLiquidity {
        liquidity_provider: LiquidityProvider,
    },
    RemoveLiquidity {
        liquidity_provider: LiquidityProvider,
    },
    Swap {
        swap_amount: U256,
        liquidity_fee: U256,
        trade_slip: U256,
    },
    DecommissionPool {
        pool: Pool,
    },
    Message {
        module: String,
        sender: Address,
    },
}

impl Event {
    pub fn message(sender: &Address) -> Self {
        Event::Message {
            module: MODULE_NAME.to_string(),
            sender: sender.clone(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolCreated {
    pub pool: Pool,
    pub provider: LiquidityProvider,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityAdded {
    pub pool: Pool,
    pub provider: LiquidityProvider,
    pub issued_units: U256,
    /// The signer had no provider record for this pool before
    pub new_provider: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityRemoved {
    pub pool: Pool,
    /// Provider after the withdrawal; zero units means the record was destroyed
    pub provider: LiquidityProvider,
    pub native_amount: U256,
    pub external_amount: U256,
    /// Rebalancing swap run for an asymmetric withdrawal
    pub rebalance: Option<SwapOutcome>,
}

impl LiquidityRemoved {
    pub fn provider_destroyed(&self) -> bool {
        self.provider.provider_units.is_zero()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swapped {
    pub sent: Coin,
    pub received: Coin,
    pub route: SwapRoute,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolDecommissioned {
    /// Pool as it was before draining
    pub pool: Pool,
    pub payouts: Vec<Payout>,
}

/// Receipt of any successful request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    PoolCreated(PoolCreated),
    LiquidityAdded(LiquidityAdded),
    LiquidityRemoved(LiquidityRemoved),
    Swapped(Swapped),
    PoolDecommissioned(PoolDecommissioned),
}

impl Response {
    /// Events for this receipt, ending with the `message` event for `signer`
    pub fn events(&self, signer: &Address) -> Vec<Event> {
        let mut events = match self {
            Response::PoolCreated(r) => vec![
                Event::CreatePool {
                    pool: r.pool.clone(),
                },
                Event::CreateLiquidityProvider {
                    liquidity_provider: r.provider.clone(),
                },
            ],
            Response::LiquidityAdded(r) => {
                let mut events = Vec::with_capacity(2);
                if r.new_provider {
                    events.push(Event::CreateLiquidityProvider {
                        liquidity_provider: r.provider.clone(),
                    });
                }
                events.push(Event::AddLiquidity {
                    liquidity_provider: r.provider.clone(),
                });
                events
            }
            Response::LiquidityRemoved(r) => vec![Event::RemoveLiquidity {
                liquidity_provider: r.provider.clone(),
            }],
            Response::Swapped(r) => vec![Event::Swap {
                swap_amount: r.route.received_amount,
                liquidity_fee: r.route.liquidity_fee,
                trade_slip: r.route.trade_slip,
            }],
            Response::PoolDecommissioned(r) => vec![Event::DecommissionPool {
                pool: r.pool.clone(),
            }],
        };
        events.push(Event::message(signer));
        events
    }
}

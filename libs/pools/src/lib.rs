//! # Reservoir Pools - Liquidity Pool Orchestration
//!
//! ## Purpose
//!
//! Invariant-preserving state transitions for settlement-paired liquidity
//! pools: creating and decommissioning pools, adding and removing liquidity,
//! and swapping through one or two pools. Every transition keeps provider
//! units summing to pool units and reserves non-negative, and moves no value
//! except through the liquidity fee retained by the pool.
//!
//! ## Integration Points
//!
//! - **Input Sources**: [`Request`]s decoded and authorised by the host
//! - **Collaborators**: [`PoolStore`] (records), [`Ledger`] (balances),
//!   [`config::ParamsSource`] (module parameters)
//! - **Output Destinations**: typed receipts ([`Response`]) from which hosts
//!   derive [`Event`]s
//!
//! ## Architecture Role
//!
//! ```text
//! Request ──► PoolManager ──► amm math (units, swap, withdrawal)
//!                 │  │
//!                 │  └──► SwapRouter ──► pricing::swap_one (one or two hops)
//!                 │
//!                 ├──► PoolStore  (read snapshot, write back)
//!                 └──► Ledger     (signer <-> pool custody)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use pools::{Address, Asset, CreatePool, MemoryLedger, MemoryStore, PoolManager, Request};
//! use config::Params;
//!
//! let stake = Asset::new("stake").unwrap();
//! let ceth = Asset::new("ceth").unwrap();
//! let alice = Address::new("alice");
//!
//! let mut ledger = MemoryLedger::new();
//! ledger.mint(&alice, &stake, 1_000_000u64.into()).unwrap();
//! ledger.mint(&alice, &ceth, 500_000u64.into()).unwrap();
//!
//! let mut manager = PoolManager::new(stake, MemoryStore::new(), ledger, Params::default());
//! let response = manager
//!     .execute(Request::CreatePool(CreatePool {
//!         external_asset: ceth,
//!         native_amount: 1_000_000u64.into(),
//!         external_amount: 500_000u64.into(),
//!         signer: alice.clone(),
//!     }))
//!     .unwrap();
//! assert_eq!(response.events(&alice).len(), 3);
//! ```

pub mod decommission;
pub mod error;
pub mod events;
pub mod ledger;
pub mod manager;
pub mod memory;
pub mod messages;
pub mod pricing;
pub mod router;
pub mod store;
pub mod types;

pub use decommission::{plan_decommission, DrainState, Payout};
pub use error::{ClpError, ErrorKind, Result};
pub use events::{
    Event, LiquidityAdded, LiquidityRemoved, PoolCreated, PoolDecommissioned, Response, Swapped,
    MODULE_NAME,
};
pub use ledger::{Ledger, LedgerError};
pub use manager::PoolManager;
pub use memory::{MemoryLedger, MemoryStore};
pub use messages::{AddLiquidity, CreatePool, DecommissionPool, RemoveLiquidity, Request, Swap};
pub use pricing::swap_one;
pub use router::{Hop, Route, SwapRoute, SwapRouter};
pub use store::{PoolStore, StoreError};
pub use types::{coins, Address, Asset, Coin, LiquidityProvider, Pool};

pub use amm::{Asymmetry, BasisPoints, SwapOutcome, U256};

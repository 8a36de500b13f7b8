//! Shared fixtures for pool integration tests

#![allow(dead_code)]

use config::Params;
use pools::{
    Address, Asset, ClpError, LiquidityProvider, MemoryLedger, MemoryStore, PoolManager, PoolStore,
    U256,
};

pub type Manager = PoolManager<MemoryStore, MemoryLedger, Params>;

pub const SETTLEMENT: &str = "stake";
pub const FUNDING: u64 = 1_000_000_000;

pub fn asset(ticker: &str) -> Asset {
    Asset::new(ticker).unwrap()
}

pub fn settlement() -> Asset {
    asset(SETTLEMENT)
}

pub fn addr(name: &str) -> Address {
    Address::new(name)
}

pub fn u(value: u64) -> U256 {
    U256::from(value)
}

/// Manager with `accounts` each funded with [`FUNDING`] of every asset
pub fn funded_manager(accounts: &[&str], assets: &[&str]) -> Manager {
    let mut ledger = MemoryLedger::new();
    for account in accounts {
        ledger.mint(&addr(account), &settlement(), u(FUNDING)).unwrap();
        for ticker in assets {
            ledger.mint(&addr(account), &asset(ticker), u(FUNDING)).unwrap();
        }
    }
    PoolManager::new(settlement(), MemoryStore::new(), ledger, Params::default())
}

/// Run `op` and restore store and ledger if it fails, the way a host
/// discards a failed transaction
pub fn apply_atomically<T>(
    manager: &mut Manager,
    op: impl FnOnce(&mut Manager) -> Result<T, ClpError>,
) -> Result<T, ClpError> {
    let store = manager.store().clone();
    let ledger = manager.ledger().clone();
    let result = op(manager);
    if result.is_err() {
        *manager.store_mut() = store;
        *manager.ledger_mut() = ledger;
    }
    result
}

pub fn providers(manager: &Manager, ticker: &str) -> Vec<LiquidityProvider> {
    manager.store().liquidity_providers_for_asset(&asset(ticker))
}

/// Provider units of every pool sum to its pool units
pub fn assert_units_consistent(manager: &Manager) {
    for pool in manager.store().pools() {
        let total = providers(manager, pool.external_asset.ticker())
            .iter()
            .fold(U256::zero(), |acc, lp| acc + lp.provider_units);
        assert_eq!(total, pool.pool_units, "unit mismatch in {}", pool);
        assert!(pool.is_consistent(), "inconsistent pool {}", pool);
    }
}

/// Every pool's recorded reserves are held by its custodial address
pub fn assert_custody_matches(manager: &Manager) {
    for pool in manager.store().pools() {
        let ledger = manager.ledger();
        assert_eq!(
            ledger.balance(&pool.pool_address, &settlement()),
            pool.native_balance,
            "native custody mismatch in {}",
            pool
        );
        assert_eq!(
            ledger.balance(&pool.pool_address, &pool.external_asset),
            pool.external_balance,
            "external custody mismatch in {}",
            pool
        );
    }
}

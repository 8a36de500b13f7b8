//! In-memory reference host
//!
//! Ordered maps behind [`PoolStore`] and [`Ledger`]. Iteration order is
//! deterministic, so provider loops and test output are reproducible. Both
//! types are `Clone`; snapshot before an operation and restore on failure to
//! get all-or-nothing semantics.

use crate::ledger::{Ledger, LedgerError};
use crate::store::{PoolStore, StoreError};
use crate::types::{Address, Asset, Coin, LiquidityProvider, Pool};
use amm::U256;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pools: BTreeMap<Asset, Pool>,
    providers: BTreeMap<(Asset, Address), LiquidityProvider>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every write from now on
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn pools(&self) -> impl Iterator<Item = &Pool> {
        self.pools.values()
    }

    pub fn liquidity_providers(&self) -> impl Iterator<Item = &LiquidityProvider> {
        self.providers.values()
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::Write {
                reason: "store is read-only".to_string(),
            });
        }
        Ok(())
    }
}

impl PoolStore for MemoryStore {
    fn get_pool(&self, asset: &Asset) -> Result<Pool, StoreError> {
        self.pools
            .get(asset)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                key: format!("pool/{}", asset),
            })
    }

    fn set_pool(&mut self, pool: &Pool) -> Result<(), StoreError> {
        self.check_writable()?;
        self.pools.insert(pool.external_asset.clone(), pool.clone());
        Ok(())
    }

    fn destroy_pool(&mut self, asset: &Asset) -> Result<(), StoreError> {
        self.check_writable()?;
        self.pools
            .remove(asset)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound {
                key: format!("pool/{}", asset),
            })
    }

    fn exists_pool(&self, asset: &Asset) -> bool {
        self.pools.contains_key(asset)
    }

    fn get_liquidity_provider(
        &self,
        asset: &Asset,
        address: &Address,
    ) -> Result<LiquidityProvider, StoreError> {
        self.providers
            .get(&(asset.clone(), address.clone()))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                key: format!("provider/{}/{}", asset, address),
            })
    }

    fn set_liquidity_provider(&mut self, provider: &LiquidityProvider) -> Result<(), StoreError> {
        self.check_writable()?;
        self.providers.insert(
            (provider.asset.clone(), provider.provider_address.clone()),
            provider.clone(),
        );
        Ok(())
    }

    fn destroy_liquidity_provider(
        &mut self,
        asset: &Asset,
        address: &Address,
    ) -> Result<(), StoreError> {
        self.check_writable()?;
        self.providers
            .remove(&(asset.clone(), address.clone()))
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound {
                key: format!("provider/{}/{}", asset, address),
            })
    }

    fn liquidity_providers_for_asset(&self, asset: &Asset) -> Vec<LiquidityProvider> {
        self.providers
            .iter()
            .filter(|((a, _), _)| a == asset)
            .map(|(_, provider)| provider.clone())
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    balances: BTreeMap<(Address, Asset), U256>,
    rejected_recipients: BTreeSet<Address>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` of `asset` to `address` out of thin air
    pub fn mint(&mut self, address: &Address, asset: &Asset, amount: U256) -> Result<(), LedgerError> {
        let balance = credit(self.balance(address, asset), amount, address, asset)?;
        self.balances.insert((address.clone(), asset.clone()), balance);
        Ok(())
    }

    pub fn balance(&self, address: &Address, asset: &Asset) -> U256 {
        self.balances
            .get(&(address.clone(), asset.clone()))
            .copied()
            .unwrap_or_default()
    }

    /// Sum of every address's balance of `asset`
    pub fn total(&self, asset: &Asset) -> U256 {
        self.balances
            .iter()
            .filter(|((_, a), _)| a == asset)
            .fold(U256::zero(), |acc, (_, amount)| acc.saturating_add(*amount))
    }

    /// Fail every transfer paying `address`
    pub fn reject_transfers_to(&mut self, address: &Address) {
        self.rejected_recipients.insert(address.clone());
    }

    pub fn accept_transfers_to(&mut self, address: &Address) {
        self.rejected_recipients.remove(address);
    }
}

impl Ledger for MemoryLedger {
    fn has_coins(&self, address: &Address, amounts: &[Coin]) -> bool {
        amounts
            .iter()
            .all(|coin| self.balance(address, &coin.asset) >= coin.amount)
    }

    fn send_coins(&mut self, from: &Address, to: &Address, amounts: &[Coin]) -> Result<(), LedgerError> {
        if self.rejected_recipients.contains(to) {
            return Err(LedgerError::Rejected {
                reason: format!("{} does not accept transfers", to),
            });
        }
        let mut totals: BTreeMap<&Asset, U256> = BTreeMap::new();
        for coin in amounts {
            let total = totals.entry(&coin.asset).or_default();
            *total = total
                .checked_add(coin.amount)
                .ok_or_else(|| LedgerError::Rejected {
                    reason: format!("transfer total of {} overflows", coin.asset),
                })?;
        }

        let mut debits = Vec::with_capacity(totals.len());
        for (asset, amount) in totals {
            let remaining = self
                .balance(from, asset)
                .checked_sub(amount)
                .ok_or_else(|| LedgerError::InsufficientFunds {
                    address: from.to_string(),
                    missing: Coin::new(asset.clone(), amount).to_string(),
                })?;
            let credited = if from == to {
                self.balance(to, asset)
            } else {
                credit(self.balance(to, asset), amount, to, asset)?
            };
            debits.push((asset.clone(), remaining, credited));
        }

        for (asset, remaining, credited) in debits {
            self.balances.insert((from.clone(), asset.clone()), remaining);
            self.balances.insert((to.clone(), asset), credited);
        }
        Ok(())
    }
}

fn credit(balance: U256, amount: U256, address: &Address, asset: &Asset) -> Result<U256, LedgerError> {
    balance.checked_add(amount).ok_or_else(|| LedgerError::Rejected {
        reason: format!("{} balance of {} overflows", asset, address),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(t: &str) -> Asset {
        Asset::new(t).unwrap()
    }

    #[test]
    fn test_providers_for_asset_are_filtered_and_ordered() {
        let mut store = MemoryStore::new();
        for (t, who) in [("ceth", "bob"), ("cdash", "carol"), ("ceth", "alice")] {
            store
                .set_liquidity_provider(&LiquidityProvider::new(asset(t), 1u8.into(), Address::new(who)))
                .unwrap();
        }
        let owners: Vec<_> = store
            .liquidity_providers_for_asset(&asset("ceth"))
            .into_iter()
            .map(|lp| lp.provider_address)
            .collect();
        assert_eq!(owners, vec![Address::new("alice"), Address::new("bob")]);
    }

    #[test]
    fn test_read_only_store_rejects_writes() {
        let mut store = MemoryStore::new();
        store.set_read_only(true);
        let pool = Pool::new(asset("ceth"), 1u8.into(), 1u8.into(), 1u8.into());
        assert!(matches!(store.set_pool(&pool), Err(StoreError::Write { .. })));
        assert!(store.get_pool(&asset("ceth")).unwrap_err().is_not_found());
    }

    #[test]
    fn test_send_is_all_or_nothing() {
        let mut ledger = MemoryLedger::new();
        let (alice, bob) = (Address::new("alice"), Address::new("bob"));
        ledger.mint(&alice, &asset("ceth"), 10u8.into()).unwrap();
        ledger.mint(&alice, &asset("stake"), 5u8.into()).unwrap();

        let transfer = [
            Coin::new(asset("ceth"), 10u8.into()),
            Coin::new(asset("stake"), 6u8.into()),
        ];
        assert!(!ledger.has_coins(&alice, &transfer));
        assert!(ledger.send_coins(&alice, &bob, &transfer).is_err());
        assert_eq!(ledger.balance(&alice, &asset("ceth")), U256::from(10u8));
        assert_eq!(ledger.balance(&bob, &asset("ceth")), U256::zero());
    }

    #[test]
    fn test_rejected_recipient() {
        let mut ledger = MemoryLedger::new();
        let (alice, bob) = (Address::new("alice"), Address::new("bob"));
        ledger.mint(&alice, &asset("ceth"), 10u8.into()).unwrap();
        ledger.reject_transfers_to(&bob);

        let transfer = [Coin::new(asset("ceth"), 4u8.into())];
        assert!(matches!(
            ledger.send_coins(&alice, &bob, &transfer),
            Err(LedgerError::Rejected { .. })
        ));
        ledger.accept_transfers_to(&bob);
        ledger.send_coins(&alice, &bob, &transfer).unwrap();
        assert_eq!(ledger.balance(&bob, &asset("ceth")), U256::from(4u8));
        assert_eq!(ledger.total(&asset("ceth")), U256::from(10u8));
    }

    #[test]
    fn test_overflowing_credit_is_rejected() {
        let mut ledger = MemoryLedger::new();
        let (alice, bob) = (Address::new("alice"), Address::new("bob"));
        ledger.mint(&alice, &asset("ceth"), U256::MAX).unwrap();
        ledger.mint(&bob, &asset("ceth"), 1u8.into()).unwrap();

        assert!(matches!(
            ledger.mint(&alice, &asset("ceth"), 1u8.into()),
            Err(LedgerError::Rejected { .. })
        ));
        assert_eq!(ledger.balance(&alice, &asset("ceth")), U256::MAX);

        let transfer = [Coin::new(asset("ceth"), 1u8.into())];
        assert!(matches!(
            ledger.send_coins(&bob, &alice, &transfer),
            Err(LedgerError::Rejected { .. })
        ));
        assert_eq!(ledger.balance(&bob, &asset("ceth")), U256::from(1u8));
        assert_eq!(ledger.balance(&alice, &asset("ceth")), U256::MAX);
    }

    #[test]
    fn test_overflowing_transfer_total_is_rejected() {
        let mut ledger = MemoryLedger::new();
        let (alice, bob) = (Address::new("alice"), Address::new("bob"));
        ledger.mint(&alice, &asset("ceth"), U256::MAX).unwrap();

        let transfer = [
            Coin::new(asset("ceth"), U256::MAX),
            Coin::new(asset("ceth"), 1u8.into()),
        ];
        assert!(matches!(
            ledger.send_coins(&alice, &bob, &transfer),
            Err(LedgerError::Rejected { .. })
        ));
        assert_eq!(ledger.balance(&alice, &asset("ceth")), U256::MAX);
    }

    #[test]
    fn test_send_to_self_keeps_balance() {
        let mut ledger = MemoryLedger::new();
        let alice = Address::new("alice");
        ledger.mint(&alice, &asset("ceth"), 10u8.into()).unwrap();

        ledger
            .send_coins(&alice, &alice, &[Coin::new(asset("ceth"), 4u8.into())])
            .unwrap();
        assert_eq!(ledger.balance(&alice, &asset("ceth")), U256::from(10u8));
    }
}

//! Pool Lifecycle Orchestrator
//!
//! [`PoolManager`] runs the five pool operations against host collaborators:
//! a [`PoolStore`] for records, a [`Ledger`] for balances and a
//! [`ParamsSource`] for module parameters. Each operation reads whole
//! snapshots, computes the new state with the `amm` math, checks pool-health
//! rules, then writes records and moves coins.
//!
//! ## Atomicity
//!
//! Operations stop at the first failure and return it. Writes and transfers
//! made before the failure are not undone here; the host must apply each
//! operation inside a transaction it can discard. DecommissionPool pays
//! providers one by one, so a failed payout leaves earlier payouts in place
//! unless the host rolls them back.

use crate::decommission::plan_decommission;
use crate::error::{ClpError, Result};
use crate::events::{
    LiquidityAdded, LiquidityRemoved, PoolCreated, PoolDecommissioned, Response, Swapped,
};
use crate::ledger::Ledger;
use crate::messages::{AddLiquidity, CreatePool, DecommissionPool, RemoveLiquidity, Request, Swap};
use crate::pricing::swap_one;
use crate::router::{Route, SwapRoute, SwapRouter};
use crate::store::PoolStore;
use crate::types::{coins, Address, Asset, Coin, LiquidityProvider, Pool};
use amm::{calculate_pool_units, calculate_withdrawal, CheckedMath, U256};
use config::ParamsSource;
use tracing::{debug, info, warn};

/// Orchestrates pool operations over host collaborators
pub struct PoolManager<S, L, P> {
    store: S,
    ledger: L,
    params: P,
    router: SwapRouter,
}

impl<S, L, P> PoolManager<S, L, P>
where
    S: PoolStore,
    L: Ledger,
    P: ParamsSource,
{
    pub fn new(settlement: Asset, store: S, ledger: L, params: P) -> Self {
        Self {
            store,
            ledger,
            params,
            router: SwapRouter::new(settlement),
        }
    }

    pub fn settlement(&self) -> &Asset {
        self.router.settlement()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    pub fn pool(&self, asset: &Asset) -> Result<Pool> {
        self.store
            .get_pool(asset)
            .map_err(|_| ClpError::PoolNotFound {
                asset: asset.to_string(),
            })
    }

    pub fn liquidity_provider(&self, asset: &Asset, address: &Address) -> Result<LiquidityProvider> {
        self.store
            .get_liquidity_provider(asset, address)
            .map_err(|_| ClpError::ProviderNotFound {
                asset: asset.to_string(),
                address: address.to_string(),
            })
    }

    /// Dispatch a request to its operation
    pub fn execute(&mut self, request: Request) -> Result<Response> {
        match request {
            Request::CreatePool(msg) => self.create_pool(&msg).map(Response::PoolCreated),
            Request::DecommissionPool(msg) => {
                self.decommission_pool(&msg).map(Response::PoolDecommissioned)
            }
            Request::AddLiquidity(msg) => self.add_liquidity(&msg).map(Response::LiquidityAdded),
            Request::RemoveLiquidity(msg) => {
                self.remove_liquidity(&msg).map(Response::LiquidityRemoved)
            }
            Request::Swap(msg) => self.swap(&msg).map(Response::Swapped),
        }
    }

    pub fn create_pool(&mut self, msg: &CreatePool) -> Result<PoolCreated> {
        self.try_create_pool(msg)
            .map_err(|e| rejected("create_pool", &msg.signer, e))
    }

    pub fn add_liquidity(&mut self, msg: &AddLiquidity) -> Result<LiquidityAdded> {
        self.try_add_liquidity(msg)
            .map_err(|e| rejected("add_liquidity", &msg.signer, e))
    }

    pub fn remove_liquidity(&mut self, msg: &RemoveLiquidity) -> Result<LiquidityRemoved> {
        self.try_remove_liquidity(msg)
            .map_err(|e| rejected("remove_liquidity", &msg.signer, e))
    }

    pub fn swap(&mut self, msg: &Swap) -> Result<Swapped> {
        self.try_swap(msg).map_err(|e| rejected("swap", &msg.signer, e))
    }

    pub fn decommission_pool(&mut self, msg: &DecommissionPool) -> Result<PoolDecommissioned> {
        self.try_decommission_pool(msg)
            .map_err(|e| rejected("decommission_pool", &msg.signer, e))
    }

    /// Price a swap against current pools without writing or moving anything
    pub fn quote_swap(&self, sent: &Asset, amount: U256, received: &Asset) -> Result<SwapRoute> {
        if amount.is_zero() {
            return Err(ClpError::InvalidRequest(
                "sent amount must be positive".to_string(),
            ));
        }
        let (source, destination) = self.route_pools(sent, received)?;
        self.router
            .quote(sent, amount, received, &source, &destination)
    }

    fn try_create_pool(&mut self, msg: &CreatePool) -> Result<PoolCreated> {
        msg.validate(self.settlement())?;

        let threshold = self.params.params().min_create_pool_threshold;
        if msg.native_amount < U256::from(threshold) {
            return Err(ClpError::ContributionBelowMinimum {
                amount: msg.native_amount.to_string(),
                minimum: threshold,
            });
        }
        if self.store.exists_pool(&msg.external_asset) {
            return Err(ClpError::PoolAlreadyExists {
                asset: msg.external_asset.to_string(),
            });
        }

        let deposit = self.pair(msg.native_amount, &msg.external_asset, msg.external_amount);
        self.ensure_signer_funds(&msg.signer, &deposit)?;

        let issuance = calculate_pool_units(
            U256::zero(),
            U256::zero(),
            U256::zero(),
            msg.native_amount,
            msg.external_amount,
        )
        .map_err(ClpError::UnitComputationOverflow)?;
        if issuance.issued_units.is_zero() {
            return Err(ClpError::NoUnitsIssued);
        }

        let pool = Pool::new(
            msg.external_asset.clone(),
            msg.native_amount,
            msg.external_amount,
            issuance.new_pool_units,
        );
        self.ledger
            .send_coins(&msg.signer, &pool.pool_address, &deposit)
            .map_err(ClpError::transfer("Unable to fund pool"))?;

        let provider =
            LiquidityProvider::new(msg.external_asset.clone(), issuance.issued_units, msg.signer.clone());
        self.store
            .set_pool(&pool)
            .map_err(ClpError::storage("Unable to set pool"))?;
        self.store
            .set_liquidity_provider(&provider)
            .map_err(ClpError::storage("Unable to set liquidity provider"))?;

        info!(
            asset = %pool.external_asset,
            signer = %msg.signer,
            native = %pool.native_balance,
            external = %pool.external_balance,
            units = %pool.pool_units,
            "Created pool"
        );
        Ok(PoolCreated { pool, provider })
    }

    fn try_add_liquidity(&mut self, msg: &AddLiquidity) -> Result<LiquidityAdded> {
        msg.validate(self.settlement())?;
        let mut pool = self.pool(&msg.external_asset)?;

        let issuance = calculate_pool_units(
            pool.pool_units,
            pool.native_balance,
            pool.external_balance,
            msg.native_amount,
            msg.external_amount,
        )
        .map_err(ClpError::UnitComputationOverflow)?;
        if issuance.issued_units.is_zero() {
            return Err(ClpError::NoUnitsIssued);
        }

        let existing = match self
            .store
            .get_liquidity_provider(&msg.external_asset, &msg.signer)
        {
            Ok(provider) => Some(provider),
            Err(e) if e.is_not_found() => None,
            Err(e) => return Err(ClpError::storage("Unable to read liquidity provider")(e)),
        };

        let deposit = self.pair(msg.native_amount, &msg.external_asset, msg.external_amount);
        self.ensure_signer_funds(&msg.signer, &deposit)?;
        self.ledger
            .send_coins(&msg.signer, &pool.pool_address, &deposit)
            .map_err(ClpError::transfer("Unable to add liquidity"))?;

        pool.pool_units = issuance.new_pool_units;
        pool.native_balance = pool
            .native_balance
            .safe_add(msg.native_amount, "native reserve")
            .map_err(ClpError::UnitComputationOverflow)?;
        pool.external_balance = pool
            .external_balance
            .safe_add(msg.external_amount, "external reserve")
            .map_err(ClpError::UnitComputationOverflow)?;

        let new_provider = existing.is_none();
        let provider = match existing {
            Some(mut provider) => {
                provider.provider_units = provider
                    .provider_units
                    .safe_add(issuance.issued_units, "provider units")
                    .map_err(ClpError::UnitComputationOverflow)?;
                provider
            }
            None => LiquidityProvider::new(
                msg.external_asset.clone(),
                issuance.issued_units,
                msg.signer.clone(),
            ),
        };

        self.store
            .set_pool(&pool)
            .map_err(ClpError::storage("Unable to set pool"))?;
        self.store
            .set_liquidity_provider(&provider)
            .map_err(ClpError::storage("Unable to set liquidity provider"))?;

        info!(
            asset = %pool.external_asset,
            signer = %msg.signer,
            native = %msg.native_amount,
            external = %msg.external_amount,
            issued = %issuance.issued_units,
            new_provider,
            "Added liquidity"
        );
        Ok(LiquidityAdded {
            pool,
            provider,
            issued_units: issuance.issued_units,
            new_provider,
        })
    }

    fn try_remove_liquidity(&mut self, msg: &RemoveLiquidity) -> Result<LiquidityRemoved> {
        msg.validate(self.settlement())?;
        let original = self.pool(&msg.external_asset)?;
        let mut provider = self.liquidity_provider(&msg.external_asset, &msg.signer)?;

        let withdrawal = calculate_withdrawal(
            original.pool_units,
            original.native_balance,
            original.external_balance,
            provider.provider_units,
            msg.withdraw_basis_points,
            msg.asymmetry,
        )
        .map_err(ClpError::UnitComputationOverflow)?;

        let mut pool = original.clone();
        pool.pool_units = pool
            .pool_units
            .safe_sub(withdrawal.redeemed_units, "pool units")
            .map_err(ClpError::UnitComputationOverflow)?;
        pool.native_balance = pool
            .native_balance
            .safe_sub(withdrawal.native, "native reserve")
            .map_err(ClpError::UnitComputationOverflow)?;
        pool.external_balance = pool
            .external_balance
            .safe_sub(withdrawal.external, "external reserve")
            .map_err(ClpError::UnitComputationOverflow)?;

        if !msg.asymmetry.is_zero()
            && (pool.native_balance.is_zero() || pool.external_balance.is_zero())
        {
            return Err(ClpError::PoolTooShallow(
                "pool balance empty before rebalancing".to_string(),
            ));
        }

        let mut native_out = withdrawal.native;
        let mut external_out = withdrawal.external;
        let mut rebalance = None;
        if !msg.asymmetry.is_zero() && !withdrawal.rebalance_amount.is_zero() {
            let amount = withdrawal.rebalance_amount;
            let settlement = self.settlement().clone();
            let (outcome, swapped) = if msg.asymmetry.is_positive() {
                swap_one(&settlement, &settlement, amount, &msg.external_asset, &pool)?
            } else {
                swap_one(&settlement, &msg.external_asset, amount, &settlement, &pool)?
            };

            if msg.asymmetry.is_positive() {
                native_out = native_out
                    .safe_sub(amount, "rebalanced native")
                    .map_err(ClpError::SwapComputationFailure)?;
                external_out = external_out
                    .safe_add(outcome.emitted, "rebalanced external")
                    .map_err(ClpError::SwapComputationFailure)?;
            } else {
                external_out = external_out
                    .safe_sub(amount, "rebalanced external")
                    .map_err(ClpError::SwapComputationFailure)?;
                native_out = native_out
                    .safe_add(outcome.emitted, "rebalanced native")
                    .map_err(ClpError::SwapComputationFailure)?;
            }
            debug!(
                asset = %msg.external_asset,
                asymmetry = %msg.asymmetry,
                swapped = %amount,
                emitted = %outcome.emitted,
                "Rebalanced withdrawal"
            );
            pool = swapped;
            rebalance = Some(outcome);
        }

        // A sole provider leaving completely takes the whole reserve
        if !pool.is_empty()
            && (external_out >= original.external_balance || native_out >= original.native_balance)
        {
            return Err(ClpError::PoolTooShallow(
                "withdrawal would drain a pool reserve".to_string(),
            ));
        }

        self.store
            .set_pool(&pool)
            .map_err(ClpError::storage("Unable to set pool"))?;

        let payout = self.pair(native_out, &msg.external_asset, external_out);
        if !payout.is_empty() {
            if !self.ledger.has_coins(&pool.pool_address, &payout) {
                return Err(ClpError::InsufficientPoolLiquidity {
                    asset: msg.external_asset.to_string(),
                });
            }
            self.ledger
                .send_coins(&pool.pool_address, &msg.signer, &payout)
                .map_err(ClpError::transfer("Unable to pay out withdrawal"))?;
        }

        provider.provider_units = withdrawal.remaining_provider_units;
        if provider.provider_units.is_zero() {
            self.store
                .destroy_liquidity_provider(&msg.external_asset, &msg.signer)
                .map_err(ClpError::storage("Unable to destroy liquidity provider"))?;
        } else {
            self.store
                .set_liquidity_provider(&provider)
                .map_err(ClpError::storage("Unable to set liquidity provider"))?;
        }

        info!(
            asset = %pool.external_asset,
            signer = %msg.signer,
            basis_points = %msg.withdraw_basis_points,
            native = %native_out,
            external = %external_out,
            remaining_units = %provider.provider_units,
            "Removed liquidity"
        );
        Ok(LiquidityRemoved {
            pool,
            provider,
            native_amount: native_out,
            external_amount: external_out,
            rebalance,
        })
    }

    fn try_swap(&mut self, msg: &Swap) -> Result<Swapped> {
        msg.validate()?;
        let (source, destination) = self.route_pools(&msg.sent_asset, &msg.received_asset)?;

        let sent = Coin::new(msg.sent_asset.clone(), msg.sent_amount);
        let deposit = [sent.clone()];
        self.ensure_signer_funds(&msg.signer, &deposit)?;
        self.ledger
            .send_coins(&msg.signer, &source.pool_address, &deposit)
            .map_err(ClpError::transfer("Unable to deposit swap input"))?;

        let route = self.router.execute(
            &mut self.store,
            &mut self.ledger,
            &msg.sent_asset,
            msg.sent_amount,
            &msg.received_asset,
            &source,
            &destination,
        )?;

        let received = Coin::new(msg.received_asset.clone(), route.received_amount);
        let payout = coins([(received.asset.clone(), received.amount)]);
        if !payout.is_empty() {
            self.ledger
                .send_coins(&destination.pool_address, &msg.signer, &payout)
                .map_err(ClpError::transfer("Unable to pay out swap"))?;
        }

        info!(
            signer = %msg.signer,
            sent = %sent,
            received = %received,
            hops = route.hops.len(),
            liquidity_fee = %route.liquidity_fee,
            trade_slip = %route.trade_slip,
            "Swapped"
        );
        Ok(Swapped {
            sent,
            received,
            route,
        })
    }

    fn try_decommission_pool(&mut self, msg: &DecommissionPool) -> Result<PoolDecommissioned> {
        msg.validate(self.settlement())?;
        let pool = self.pool(&msg.ticker)?;

        let threshold = self.params.params().min_create_pool_threshold;
        if pool.native_balance >= U256::from(threshold) {
            return Err(ClpError::PoolBalanceTooHigh {
                balance: pool.native_balance.to_string(),
                threshold,
            });
        }

        let providers = self.store.liquidity_providers_for_asset(&pool.external_asset);
        let (payouts, remaining) =
            plan_decommission(&pool, &providers).map_err(ClpError::UnitComputationOverflow)?;

        for payout in &payouts {
            let amounts = self.pair(payout.native, &pool.external_asset, payout.external);
            if !amounts.is_empty() {
                self.ledger
                    .send_coins(&pool.pool_address, &payout.provider, &amounts)
                    .map_err(ClpError::transfer("Unable to pay out liquidity provider"))?;
            }
            self.store
                .destroy_liquidity_provider(&pool.external_asset, &payout.provider)
                .map_err(ClpError::storage("Unable to destroy liquidity provider"))?;
            debug!(
                asset = %pool.external_asset,
                provider = %payout.provider,
                native = %payout.native,
                external = %payout.external,
                "Paid out liquidity provider"
            );
        }

        if !remaining.is_drained() {
            warn!(
                asset = %pool.external_asset,
                units = %remaining.pool_units,
                native = %remaining.native_balance,
                external = %remaining.external_balance,
                "Decommissioned pool left residual reserves"
            );
        }

        self.store
            .destroy_pool(&pool.external_asset)
            .map_err(ClpError::storage("Unable to destroy pool"))?;

        info!(
            asset = %pool.external_asset,
            signer = %msg.signer,
            providers = payouts.len(),
            "Decommissioned pool"
        );
        Ok(PoolDecommissioned { pool, payouts })
    }

    /// Load the pools a trade of `sent` into `received` passes through
    fn route_pools(&self, sent: &Asset, received: &Asset) -> Result<(Pool, Pool)> {
        match self.router.plan(sent, received)? {
            Route::Direct { pool } => {
                let pool = self.pool(&pool)?;
                Ok((pool.clone(), pool))
            }
            Route::TwoHop {
                source,
                destination,
            } => Ok((self.pool(&source)?, self.pool(&destination)?)),
        }
    }

    fn ensure_signer_funds(&self, signer: &Address, amounts: &[Coin]) -> Result<()> {
        if !self.ledger.has_coins(signer, amounts) {
            return Err(ClpError::BalanceUnavailable {
                address: signer.to_string(),
            });
        }
        Ok(())
    }

    /// Coin list for a native/external pair, zero amounts dropped
    fn pair(&self, native: U256, external_asset: &Asset, external: U256) -> Vec<Coin> {
        coins([
            (external_asset.clone(), external),
            (self.settlement().clone(), native),
        ])
    }
}

fn rejected(operation: &'static str, signer: &Address, err: ClpError) -> ClpError {
    warn!(
        operation,
        signer = %signer,
        kind = ?err.kind(),
        error = %err,
        "Request rejected"
    );
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryLedger, MemoryStore};
    use config::Params;

    fn asset(t: &str) -> Asset {
        Asset::new(t).unwrap()
    }

    fn manager() -> PoolManager<MemoryStore, MemoryLedger, Params> {
        let mut ledger = MemoryLedger::new();
        let alice = Address::new("alice");
        ledger.mint(&alice, &asset("stake"), 10_000_000u64.into()).unwrap();
        ledger.mint(&alice, &asset("ceth"), 10_000_000u64.into()).unwrap();
        PoolManager::new(asset("stake"), MemoryStore::new(), ledger, Params::default())
    }

    fn create(native: u64, external: u64) -> CreatePool {
        CreatePool {
            external_asset: asset("ceth"),
            native_amount: native.into(),
            external_amount: external.into(),
            signer: Address::new("alice"),
        }
    }

    #[test]
    fn test_create_pool_below_threshold() {
        let mut m = manager();
        let err = m.create_pool(&create(99, 1_000)).unwrap_err();
        assert!(matches!(err, ClpError::ContributionBelowMinimum { minimum: 100, .. }));
        assert!(!m.store().exists_pool(&asset("ceth")));
    }

    #[test]
    fn test_create_pool_twice() {
        let mut m = manager();
        m.create_pool(&create(1_000, 1_000)).unwrap();
        let err = m.create_pool(&create(1_000, 1_000)).unwrap_err();
        assert!(matches!(err, ClpError::PoolAlreadyExists { .. }));
    }

    #[test]
    fn test_create_pool_without_funds() {
        let mut m = manager();
        let mut msg = create(1_000, 1_000);
        msg.signer = Address::new("bob");
        assert!(matches!(
            m.create_pool(&msg).unwrap_err(),
            ClpError::BalanceUnavailable { .. }
        ));
    }

    #[test]
    fn test_create_pool_moves_funds_into_custody() {
        let mut m = manager();
        let created = m.create_pool(&create(1_000_000, 500_000)).unwrap();
        let custody = &created.pool.pool_address;
        assert_eq!(m.ledger().balance(custody, &asset("stake")), U256::from(1_000_000u64));
        assert_eq!(m.ledger().balance(custody, &asset("ceth")), U256::from(500_000u64));
        // isqrt(1e6 * 5e5)
        assert_eq!(created.pool.pool_units, U256::from(707_106u64));
        assert_eq!(created.provider.provider_units, created.pool.pool_units);
    }

    #[test]
    fn test_add_liquidity_to_missing_pool() {
        let mut m = manager();
        let msg = AddLiquidity {
            external_asset: asset("ceth"),
            native_amount: 10u8.into(),
            external_amount: 10u8.into(),
            signer: Address::new("alice"),
        };
        assert!(matches!(m.add_liquidity(&msg).unwrap_err(), ClpError::PoolNotFound { .. }));
    }

    #[test]
    fn test_add_liquidity_too_small_for_a_unit() {
        let mut m = manager();
        let created = m.create_pool(&create(1_000_000, 500_000)).unwrap();
        let msg = AddLiquidity {
            external_asset: asset("ceth"),
            native_amount: 1u8.into(),
            external_amount: U256::zero(),
            signer: Address::new("alice"),
        };
        assert!(matches!(m.add_liquidity(&msg).unwrap_err(), ClpError::NoUnitsIssued));
        assert_eq!(m.pool(&asset("ceth")).unwrap(), created.pool);
        assert_eq!(
            m.ledger().balance(&created.pool.pool_address, &asset("stake")),
            U256::from(1_000_000u64)
        );
    }

    #[test]
    fn test_add_liquidity_without_funds() {
        let mut m = manager();
        let created = m.create_pool(&create(1_000_000, 500_000)).unwrap();
        let msg = AddLiquidity {
            external_asset: asset("ceth"),
            native_amount: 1_000u64.into(),
            external_amount: 500u64.into(),
            signer: Address::new("bob"),
        };
        assert!(matches!(
            m.add_liquidity(&msg).unwrap_err(),
            ClpError::BalanceUnavailable { .. }
        ));
        assert_eq!(m.pool(&asset("ceth")).unwrap(), created.pool);
        assert!(m
            .store()
            .get_liquidity_provider(&asset("ceth"), &Address::new("bob"))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_add_liquidity_accumulates_units() {
        let mut m = manager();
        let created = m.create_pool(&create(1_000_000, 500_000)).unwrap();
        let added = m
            .add_liquidity(&AddLiquidity {
                external_asset: asset("ceth"),
                native_amount: 100_000u64.into(),
                external_amount: 50_000u64.into(),
                signer: Address::new("alice"),
            })
            .unwrap();

        assert!(!added.new_provider);
        // Balanced deposit: P * a / A
        assert_eq!(added.issued_units, U256::from(70_710u64));
        assert_eq!(
            added.provider.provider_units,
            created.provider.provider_units + added.issued_units
        );
        assert_eq!(added.pool.pool_units, added.provider.provider_units);
    }

    #[test]
    fn test_remove_liquidity_without_provider() {
        let mut m = manager();
        m.create_pool(&create(1_000_000, 500_000)).unwrap();
        let msg = RemoveLiquidity {
            external_asset: asset("ceth"),
            withdraw_basis_points: amm::BasisPoints::FULL,
            asymmetry: amm::Asymmetry::SYMMETRIC,
            signer: Address::new("bob"),
        };
        assert!(matches!(
            m.remove_liquidity(&msg).unwrap_err(),
            ClpError::ProviderNotFound { .. }
        ));
    }

    #[test]
    fn test_decommission_live_pool_rejected() {
        let mut m = manager();
        m.create_pool(&create(1_000_000, 500_000)).unwrap();
        let msg = DecommissionPool {
            ticker: asset("ceth"),
            signer: Address::new("alice"),
        };
        assert!(matches!(
            m.decommission_pool(&msg).unwrap_err(),
            ClpError::PoolBalanceTooHigh { threshold: 100, .. }
        ));
    }

    #[test]
    fn test_quote_matches_swap() {
        let mut m = manager();
        m.create_pool(&create(1_000_000, 500_000)).unwrap();
        let quote = m
            .quote_swap(&asset("stake"), 1_000u64.into(), &asset("ceth"))
            .unwrap();
        let swapped = m
            .swap(&Swap {
                sent_asset: asset("stake"),
                sent_amount: 1_000u64.into(),
                received_asset: asset("ceth"),
                signer: Address::new("alice"),
            })
            .unwrap();
        assert_eq!(swapped.route, quote);
    }

    #[test]
    fn test_failed_write_surfaces_context() {
        let mut m = manager();
        m.store_mut().set_read_only(true);
        let err = m.create_pool(&create(1_000, 1_000)).unwrap_err();
        assert!(matches!(err, ClpError::StorageWriteFailure { .. }));
        assert!(err.to_string().starts_with("Unable to set pool"));
    }
}

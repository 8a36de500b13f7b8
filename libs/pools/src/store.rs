//! Pool and provider storage collaborator
//!
//! The host owns persistence. Reads return whole records; writes replace
//! whole records. The core never relies on a write being visible before the
//! operation that made it completes.

use crate::types::{Address, Asset, LiquidityProvider, Pool};
use thiserror::Error;

/// Storage failures reported by the host
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Record not found: {key}")]
    NotFound { key: String },

    #[error("Storage write failed: {reason}")]
    Write { reason: String },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Keyed access to pool and liquidity-provider records
pub trait PoolStore {
    fn get_pool(&self, asset: &Asset) -> Result<Pool, StoreError>;

    fn set_pool(&mut self, pool: &Pool) -> Result<(), StoreError>;

    fn destroy_pool(&mut self, asset: &Asset) -> Result<(), StoreError>;

    fn exists_pool(&self, asset: &Asset) -> bool;

    fn get_liquidity_provider(
        &self,
        asset: &Asset,
        address: &Address,
    ) -> Result<LiquidityProvider, StoreError>;

    fn set_liquidity_provider(&mut self, provider: &LiquidityProvider) -> Result<(), StoreError>;

    fn destroy_liquidity_provider(
        &mut self,
        asset: &Asset,
        address: &Address,
    ) -> Result<(), StoreError>;

    /// Every provider of the pool for `asset`, in a stable host-defined order
    fn liquidity_providers_for_asset(&self, asset: &Asset) -> Vec<LiquidityProvider>;
}

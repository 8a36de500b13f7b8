//! Pool Domain Records
//!
//! Assets, addresses, coins and the two persisted records: [`Pool`] and
//! [`LiquidityProvider`]. Records are plain snapshots; the orchestrator
//! reads them whole, computes a new snapshot and writes it back.

use crate::error::ClpError;
use amm::U256;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use std::fmt;

pub use config::MAX_TICKER_LEN;

const POOL_ADDRESS_DOMAIN: &[u8] = b"reservoir/pool/";

/// Asset identifier (ticker), 1-64 ASCII alphanumerics, compared exactly
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Asset(String);

impl Asset {
    pub fn new(ticker: impl Into<String>) -> Result<Self, ClpError> {
        let ticker = ticker.into();
        if ticker.is_empty() || ticker.len() > MAX_TICKER_LEN {
            return Err(ClpError::InvalidRequest(format!(
                "ticker '{}' must be 1-{} characters",
                ticker, MAX_TICKER_LEN
            )));
        }
        if !ticker.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ClpError::InvalidRequest(format!(
                "ticker '{}' must be alphanumeric",
                ticker
            )));
        }
        Ok(Self(ticker))
    }

    pub fn ticker(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Asset {
    type Error = ClpError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Asset> for String {
    fn from(asset: Asset) -> String {
        asset.0
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Account identity on the host ledger
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Custodial address of the pool for `asset`.
    ///
    /// Keccak-256 over a domain-separated ticker, truncated to 20 bytes.
    /// Deterministic, so a re-created pool reuses its old address.
    pub fn for_pool(asset: &Asset) -> Self {
        let mut hasher = Keccak256::new();
        hasher.update(POOL_ADDRESS_DOMAIN);
        hasher.update(asset.ticker().as_bytes());
        let digest = hasher.finalize();
        Self(format!("pool{}", hex::encode(&digest[..20])))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An amount of one asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub asset: Asset,
    pub amount: U256,
}

impl Coin {
    pub fn new(asset: Asset, amount: U256) -> Self {
        Self { asset, amount }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.asset)
    }
}

/// Build a coin list, dropping zero amounts
pub fn coins(entries: impl IntoIterator<Item = (Asset, U256)>) -> Vec<Coin> {
    entries
        .into_iter()
        .filter(|(_, amount)| !amount.is_zero())
        .map(|(asset, amount)| Coin::new(asset, amount))
        .collect()
}

/// Reserve pool pairing one external asset with the settlement asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub external_asset: Asset,
    pub native_balance: U256,
    pub external_balance: U256,
    pub pool_units: U256,
    pub pool_address: Address,
}

impl Pool {
    pub fn new(
        external_asset: Asset,
        native_balance: U256,
        external_balance: U256,
        pool_units: U256,
    ) -> Self {
        let pool_address = Address::for_pool(&external_asset);
        Self {
            external_asset,
            native_balance,
            external_balance,
            pool_units,
            pool_address,
        }
    }

    /// `pool_units == 0` exactly when both reserves are empty
    pub fn is_consistent(&self) -> bool {
        self.pool_units.is_zero() == (self.native_balance.is_zero() && self.external_balance.is_zero())
    }

    /// No units outstanding, as after the last provider withdraws
    pub fn is_empty(&self) -> bool {
        self.pool_units.is_zero()
    }
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pool({} native={} external={} units={} address={})",
            self.external_asset,
            self.native_balance,
            self.external_balance,
            self.pool_units,
            self.pool_address
        )
    }
}

/// One owner's claim on a pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityProvider {
    pub asset: Asset,
    pub provider_address: Address,
    pub provider_units: U256,
}

impl LiquidityProvider {
    pub fn new(asset: Asset, provider_units: U256, provider_address: Address) -> Self {
        Self {
            asset,
            provider_address,
            provider_units,
        }
    }
}

impl fmt::Display for LiquidityProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LiquidityProvider({} {} units={})",
            self.asset, self.provider_address, self.provider_units
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_validation() {
        assert!(Asset::new("ceth").is_ok());
        assert!(Asset::new("USDC2").is_ok());
        assert!(Asset::new("").is_err());
        assert!(Asset::new("c-eth").is_err());
        assert!(Asset::new("x".repeat(MAX_TICKER_LEN + 1)).is_err());
    }

    #[test]
    fn test_asset_deserialize_validates() {
        let asset: Asset = serde_json::from_str("\"ceth\"").unwrap();
        assert_eq!(asset.ticker(), "ceth");
        assert!(serde_json::from_str::<Asset>("\"bad ticker\"").is_err());
    }

    #[test]
    fn test_pool_address_is_deterministic_and_distinct() {
        let eth = Asset::new("ceth").unwrap();
        let dash = Asset::new("cdash").unwrap();
        assert_eq!(Address::for_pool(&eth), Address::for_pool(&eth));
        assert_ne!(Address::for_pool(&eth), Address::for_pool(&dash));
        // "pool" + 40 hex chars
        assert_eq!(Address::for_pool(&eth).as_str().len(), 44);
    }

    #[test]
    fn test_coins_drop_zero_amounts() {
        let eth = Asset::new("ceth").unwrap();
        let native = Asset::new("stake").unwrap();
        let list = coins([(eth.clone(), U256::from(5u8)), (native, U256::zero())]);
        assert_eq!(list, vec![Coin::new(eth, U256::from(5u8))]);
    }

    #[test]
    fn test_pool_consistency() {
        let asset = Asset::new("ceth").unwrap();
        assert!(Pool::new(asset.clone(), U256::zero(), U256::zero(), U256::zero()).is_consistent());
        assert!(Pool::new(asset.clone(), 10u8.into(), 10u8.into(), 10u8.into()).is_consistent());
        assert!(!Pool::new(asset, 10u8.into(), 10u8.into(), U256::zero()).is_consistent());
    }
}

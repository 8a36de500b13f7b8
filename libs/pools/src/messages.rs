//! Requests accepted by the pool core
//!
//! Transport-agnostic request shapes. Decoding, signature checks and
//! authorisation happen in the host before a request reaches
//! [`PoolManager`](crate::PoolManager); [`Request::validate`] only checks
//! what can be checked without reading state.

use crate::error::{ClpError, Result};
use crate::types::{Address, Asset};
use amm::{Asymmetry, BasisPoints, U256};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePool {
    pub external_asset: Asset,
    pub native_amount: U256,
    pub external_amount: U256,
    pub signer: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecommissionPool {
    pub ticker: Asset,
    pub signer: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddLiquidity {
    pub external_asset: Asset,
    pub native_amount: U256,
    pub external_amount: U256,
    pub signer: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveLiquidity {
    pub external_asset: Asset,
    pub withdraw_basis_points: BasisPoints,
    pub asymmetry: Asymmetry,
    pub signer: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swap {
    pub sent_asset: Asset,
    pub sent_amount: U256,
    pub received_asset: Asset,
    pub signer: Address,
}

/// Any request the core accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    CreatePool(CreatePool),
    DecommissionPool(DecommissionPool),
    AddLiquidity(AddLiquidity),
    RemoveLiquidity(RemoveLiquidity),
    Swap(Swap),
}

impl Request {
    pub fn signer(&self) -> &Address {
        match self {
            Request::CreatePool(m) => &m.signer,
            Request::DecommissionPool(m) => &m.signer,
            Request::AddLiquidity(m) => &m.signer,
            Request::RemoveLiquidity(m) => &m.signer,
            Request::Swap(m) => &m.signer,
        }
    }

    /// Stateless checks, run before any storage read
    pub fn validate(&self, settlement: &Asset) -> Result<()> {
        match self {
            Request::CreatePool(m) => m.validate(settlement),
            Request::DecommissionPool(m) => m.validate(settlement),
            Request::AddLiquidity(m) => m.validate(settlement),
            Request::RemoveLiquidity(m) => m.validate(settlement),
            Request::Swap(m) => m.validate(),
        }
    }
}

fn ensure_external(asset: &Asset, settlement: &Asset) -> Result<()> {
    if asset == settlement {
        return Err(ClpError::InvalidRequest(format!(
            "{} is the settlement asset and has no pool",
            asset
        )));
    }
    Ok(())
}

impl CreatePool {
    pub fn validate(&self, settlement: &Asset) -> Result<()> {
        ensure_external(&self.external_asset, settlement)?;
        if self.native_amount.is_zero() || self.external_amount.is_zero() {
            return Err(ClpError::InvalidRequest(
                "pool must be seeded with both assets".to_string(),
            ));
        }
        Ok(())
    }
}

impl DecommissionPool {
    pub fn validate(&self, settlement: &Asset) -> Result<()> {
        ensure_external(&self.ticker, settlement)
    }
}

impl AddLiquidity {
    pub fn validate(&self, settlement: &Asset) -> Result<()> {
        ensure_external(&self.external_asset, settlement)?;
        if self.native_amount.is_zero() && self.external_amount.is_zero() {
            return Err(ClpError::InvalidRequest(
                "contribution must include at least one asset".to_string(),
            ));
        }
        Ok(())
    }
}

impl RemoveLiquidity {
    pub fn validate(&self, settlement: &Asset) -> Result<()> {
        ensure_external(&self.external_asset, settlement)?;
        if self.withdraw_basis_points.is_zero() {
            return Err(ClpError::InvalidRequest(
                "withdraw basis points must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Swap {
    pub fn validate(&self) -> Result<()> {
        if self.sent_asset == self.received_asset {
            return Err(ClpError::InvalidRequest(format!(
                "cannot swap {} into itself",
                self.sent_asset
            )));
        }
        if self.sent_amount.is_zero() {
            return Err(ClpError::InvalidRequest(
                "sent amount must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(t: &str) -> Asset {
        Asset::new(t).unwrap()
    }

    #[test]
    fn test_create_pool_for_settlement_rejected() {
        let msg = CreatePool {
            external_asset: asset("stake"),
            native_amount: 1_000u64.into(),
            external_amount: 1_000u64.into(),
            signer: Address::new("alice"),
        };
        assert!(matches!(
            msg.validate(&asset("stake")),
            Err(ClpError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_create_pool_needs_both_assets() {
        let msg = CreatePool {
            external_asset: asset("ceth"),
            native_amount: 1_000u64.into(),
            external_amount: U256::zero(),
            signer: Address::new("alice"),
        };
        assert!(msg.validate(&asset("stake")).is_err());
    }

    #[test]
    fn test_remove_liquidity_needs_positive_basis_points() {
        let msg = RemoveLiquidity {
            external_asset: asset("ceth"),
            withdraw_basis_points: BasisPoints::ZERO,
            asymmetry: Asymmetry::SYMMETRIC,
            signer: Address::new("alice"),
        };
        assert!(msg.validate(&asset("stake")).is_err());
    }

    #[test]
    fn test_swap_validation() {
        let mut msg = Swap {
            sent_asset: asset("ceth"),
            sent_amount: 10u64.into(),
            received_asset: asset("ceth"),
            signer: Address::new("alice"),
        };
        assert!(msg.validate().is_err());
        msg.received_asset = asset("cdash");
        assert!(msg.validate().is_ok());
        msg.sent_amount = U256::zero();
        assert!(msg.validate().is_err());
    }

    #[test]
    fn test_request_deserializes_with_bounds() {
        let json = r#"{
            "type": "remove_liquidity",
            "external_asset": "ceth",
            "withdraw_basis_points": 10000,
            "asymmetry": -10000,
            "signer": "alice"
        }"#;
        let request: Request = serde_json::from_str(json).unwrap();
        assert_eq!(request.signer(), &Address::new("alice"));

        let out_of_range = json.replace("-10000", "-10001");
        assert!(serde_json::from_str::<Request>(&out_of_range).is_err());
    }
}

//! Pool operation errors
//!
//! Every failure is terminal for the operation that raised it; nothing is
//! retried internally. Collaborator failures keep their original error as
//! the `source` and add a description of the step that failed.

use crate::ledger::LedgerError;
use crate::store::StoreError;
use amm::MathError;
use serde::Serialize;
use thiserror::Error;

/// Failure of a pool operation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClpError {
    #[error("Pool does not exist: {asset}")]
    PoolNotFound { asset: String },

    #[error("Pool already exists: {asset}")]
    PoolAlreadyExists { asset: String },

    #[error("Native contribution {amount} is below the minimum of {minimum}")]
    ContributionBelowMinimum { amount: String, minimum: u64 },

    #[error("Balance not available for {address}")]
    BalanceUnavailable { address: String },

    #[error("Pool unit computation failed: {0}")]
    UnitComputationOverflow(#[source] MathError),

    #[error("Swap computation failed: {0}")]
    SwapComputationFailure(#[source] MathError),

    #[error("Pool too shallow: {0}")]
    PoolTooShallow(String),

    #[error("Not enough liquidity in pool {asset}")]
    InsufficientPoolLiquidity { asset: String },

    #[error("Liquidity provider {address} does not exist for {asset}")]
    ProviderNotFound { asset: String, address: String },

    #[error("{context}: {source}")]
    StorageWriteFailure {
        context: String,
        #[source]
        source: StoreError,
    },

    #[error("{context}: {source}")]
    TransferFailure {
        context: String,
        #[source]
        source: LedgerError,
    },

    #[error("Native balance {balance} is not below the decommission threshold {threshold}")]
    PoolBalanceTooHigh { balance: String, threshold: u64 },

    #[error("Contribution would issue no pool units")]
    NoUnitsIssued,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Stable discriminant of a [`ClpError`], for hosts mapping failures to codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    PoolNotFound,
    PoolAlreadyExists,
    ContributionBelowMinimum,
    BalanceUnavailable,
    UnitComputationOverflow,
    SwapComputationFailure,
    PoolTooShallow,
    InsufficientPoolLiquidity,
    ProviderNotFound,
    StorageWriteFailure,
    TransferFailure,
    PoolBalanceTooHigh,
    NoUnitsIssued,
    InvalidRequest,
}

impl ClpError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClpError::PoolNotFound { .. } => ErrorKind::PoolNotFound,
            ClpError::PoolAlreadyExists { .. } => ErrorKind::PoolAlreadyExists,
            ClpError::ContributionBelowMinimum { .. } => ErrorKind::ContributionBelowMinimum,
            ClpError::BalanceUnavailable { .. } => ErrorKind::BalanceUnavailable,
            ClpError::UnitComputationOverflow(_) => ErrorKind::UnitComputationOverflow,
            ClpError::SwapComputationFailure(_) => ErrorKind::SwapComputationFailure,
            ClpError::PoolTooShallow(_) => ErrorKind::PoolTooShallow,
            ClpError::InsufficientPoolLiquidity { .. } => ErrorKind::InsufficientPoolLiquidity,
            ClpError::ProviderNotFound { .. } => ErrorKind::ProviderNotFound,
            ClpError::StorageWriteFailure { .. } => ErrorKind::StorageWriteFailure,
            ClpError::TransferFailure { .. } => ErrorKind::TransferFailure,
            ClpError::PoolBalanceTooHigh { .. } => ErrorKind::PoolBalanceTooHigh,
            ClpError::NoUnitsIssued => ErrorKind::NoUnitsIssued,
            ClpError::InvalidRequest(_) => ErrorKind::InvalidRequest,
        }
    }

    pub(crate) fn storage(context: impl Into<String>) -> impl FnOnce(StoreError) -> ClpError {
        let context = context.into();
        move |source| ClpError::StorageWriteFailure { context, source }
    }

    pub(crate) fn transfer(context: impl Into<String>) -> impl FnOnce(LedgerError) -> ClpError {
        let context = context.into();
        move |source| ClpError::TransferFailure { context, source }
    }
}

pub type Result<T> = std::result::Result<T, ClpError>;

//! Balance-transfer collaborator

use crate::types::{Address, Coin};
use thiserror::Error;

/// Transfer failures reported by the host ledger
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Insufficient funds: {address} cannot cover {missing}")]
    InsufficientFunds { address: String, missing: String },

    #[error("Transfer rejected: {reason}")]
    Rejected { reason: String },
}

/// Host ledger moving fungible balances between addresses
pub trait Ledger {
    /// True if `address` can spend every coin in `amounts`
    fn has_coins(&self, address: &Address, amounts: &[Coin]) -> bool;

    /// Move every coin in `amounts` from `from` to `to`, all or nothing
    fn send_coins(&mut self, from: &Address, to: &Address, amounts: &[Coin]) -> Result<(), LedgerError>;
}

//! # Reservoir AMM Library - Pool Accounting Mathematics
//!
//! ## Purpose
//!
//! Pure, checked arithmetic for settlement-paired liquidity pools: how many
//! pool units a contribution mints, what a trade pays out and what fee it
//! leaves behind, and what a provider receives when redeeming units. Every
//! routine works on 256-bit unsigned integers and reports overflow, underflow
//! and division by zero as errors rather than wrapping.
//!
//! ## Integration Points
//!
//! - **Input Sources**: Pool snapshots (reserves, unit supply) read by the
//!   pool orchestrator
//! - **Output Destinations**: The orchestrator, which validates the results
//!   against pool-health rules, persists them and moves balances
//! - **Side Effects**: None. Nothing here reads storage or moves funds
//!
//! ## Architecture Role
//!
//! ```text
//! Orchestrator ──► units::calculate_pool_units      (create / add liquidity)
//!              ──► swap::calculate_swap             (swap, rebalance swap)
//!              ──► withdrawal::calculate_withdrawal (remove / decommission)
//!                          │
//!                          ▼
//!                  checked::CheckedMath over U256
//! ```
//!
//! ## Rounding
//!
//! All divisions floor. Flooring always rounds in the pool's favour: payouts
//! and minted units are never larger than the exact rational result, so
//! rounding dust stays in the reserves.

pub mod bounds;
pub mod checked;
pub mod error;
pub mod swap;
pub mod units;
pub mod withdrawal;

pub use bounds::{Asymmetry, BasisPoints, MAX_BASIS_POINTS};
pub use checked::CheckedMath;
pub use error::{MathError, Result};
pub use swap::{apply_swap, calculate_swap, calculate_trade_slip, Reserves, SwapOutcome};
pub use units::{calculate_pool_units, UnitIssuance};
pub use withdrawal::{calculate_withdrawal, Withdrawal};

/// The single unsigned integer type used for amounts, balances and units
pub use ethereum_types::U256;

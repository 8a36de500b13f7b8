//! # Reservoir Configuration
//!
//! Process-wide parameters and settlement-asset configuration for the pool
//! core, plus the tracing setup hosts install at start-up.
//!
//! ## Features
//!
//! - **Params**: the `GetParams()` collaborator ([`ParamsSource`]) and its
//!   default values
//! - **Pool configuration**: TOML file plus `RESERVOIR_` environment
//!   overrides, loaded with the `config` crate
//! - **Logging**: `tracing-subscriber` initialisation honouring `RUST_LOG`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use reservoir_config::{init_tracing, PoolConfig};
//!
//! let config = PoolConfig::load(Some("config/pools.toml".as_ref())).unwrap();
//! init_tracing(&config.log_level).unwrap();
//! let threshold = config.params.min_create_pool_threshold;
//! ```

pub mod logging;
pub mod params;
pub mod pool_config;

pub use logging::init_tracing;
pub use params::{Params, ParamsSource, DEFAULT_MIN_CREATE_POOL_THRESHOLD};
pub use pool_config::{PoolConfig, ENV_PREFIX, MAX_TICKER_LEN};

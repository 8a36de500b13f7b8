//! Process parameters consumed by the pool core

use serde::{Deserialize, Serialize};

/// Native amount a new pool must be seeded with, and the native reserve
/// below which a pool may be decommissioned
pub const DEFAULT_MIN_CREATE_POOL_THRESHOLD: u64 = 100;

/// Module parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    pub min_create_pool_threshold: u64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            min_create_pool_threshold: DEFAULT_MIN_CREATE_POOL_THRESHOLD,
        }
    }
}

/// Host-provided parameter lookup.
///
/// Parameters may change between operations (governance), so the core asks
/// for them per operation instead of caching them.
pub trait ParamsSource {
    fn params(&self) -> Params;
}

impl ParamsSource for Params {
    fn params(&self) -> Params {
        *self
    }
}

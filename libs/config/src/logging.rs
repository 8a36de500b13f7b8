//! Tracing subscriber setup

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber at `level`.
///
/// `RUST_LOG` takes precedence over `level` when set. Calling this more
/// than once is harmless; only the first call installs a subscriber.
pub fn init_tracing(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| anyhow!("Invalid log level '{}': {}", level, e))?;

    // An already-installed subscriber is not an error
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    Ok(())
}

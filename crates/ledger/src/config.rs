//! Ledger configuration.

use std::str::FromStr;
use std::time::Duration;

use vshares_core::{LedgerError, LedgerResult};

/// Environment variable holding the fixed share supply.
pub const TOTAL_SUPPLY_ENV: &str = "VSHARES_TOTAL_SUPPLY";
/// Environment variable holding the lock wait bound, in milliseconds.
pub const LOCK_TIMEOUT_ENV: &str = "VSHARES_LOCK_TIMEOUT_MS";

/// Share pool configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Fixed number of shares in circulation. Never changes after the pool is built.
    pub total_supply: u64,
    /// Upper bound on how long any operation waits for a pool or account lock.
    pub lock_timeout: Duration,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            total_supply: 1_000_000,
            lock_timeout: Duration::from_millis(250),
        }
    }
}

impl LedgerConfig {
    pub fn with_total_supply(mut self, total_supply: u64) -> Self {
        self.total_supply = total_supply;
        self
    }

    pub fn with_lock_timeout(mut self, lock_timeout: Duration) -> Self {
        self.lock_timeout = lock_timeout;
        self
    }

    /// Load from `VSHARES_TOTAL_SUPPLY` / `VSHARES_LOCK_TIMEOUT_MS`, falling back to
    /// defaults for unset variables.
    pub fn from_env() -> LedgerResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`LedgerConfig::from_env`], with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> LedgerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(total) = parse_var::<u64>(&lookup, TOTAL_SUPPLY_ENV)? {
            config.total_supply = total;
        }
        if let Some(ms) = parse_var::<u64>(&lookup, LOCK_TIMEOUT_ENV)? {
            config.lock_timeout = Duration::from_millis(ms);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> LedgerResult<()> {
        if self.total_supply == 0 {
            return Err(LedgerError::configuration("total supply must be positive"));
        }
        if self.lock_timeout.is_zero() {
            return Err(LedgerError::configuration("lock timeout must be positive"));
        }
        Ok(())
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> LedgerResult<Option<T>>
where
    T: FromStr,
    T::Err: core::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| LedgerError::configuration(format!("{key}={raw:?}: {e}"))),
    }
}

//! The share pool: fixed total supply split into free (unissued) and issued shares.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use parking_lot::{Mutex, MutexGuard};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use vshares_core::{LedgerError, LedgerResult, Shares};
use vshares_events::Subscription;

use crate::config::LedgerConfig;
use crate::journal::{Journal, JournalEntry, ShareEvent};
use crate::lock;

static GLOBAL_POOL: OnceLock<Arc<SharePool>> = OnceLock::new();

/// Read-only snapshot of the pool counters.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolOverview {
    pub total_supply: u64,
    pub free: Shares,
    pub issued: Shares,
}

impl core::fmt::Display for PoolOverview {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "TOTAL VIRTUAL SHARES: {} | FREE: {} | BOUGHT: {}",
            self.total_supply, self.free, self.issued
        )
    }
}

#[derive(Debug)]
struct PoolState {
    free: Shares,
    issued: Shares,
}

impl PoolState {
    /// Move `amount` from free to issued. Check-and-update in one step.
    ///
    /// Callers have already checked `amount` against `Shares::MAX_SCALE`, so both
    /// updates are exact.
    fn take(&mut self, amount: Shares) -> LedgerResult<()> {
        if !amount.is_positive() || amount > self.free {
            return Err(LedgerError::InsufficientSupply {
                requested: amount,
                free: self.free,
            });
        }
        self.free -= amount;
        self.issued += amount;
        Ok(())
    }
}

/// Process-lifetime supply tracker shared by every account.
///
/// Accounts hold an `Arc<SharePool>`; the pool does not track which accounts exist.
/// There is no release path: once issued, shares only move between accounts.
#[derive(Debug)]
pub struct SharePool {
    total_supply: u64,
    lock_timeout: Duration,
    state: Mutex<PoolState>,
    journal: Journal,
}

impl SharePool {
    /// Build a standalone pool with default settings and the given supply.
    pub fn new(total_supply: u64) -> LedgerResult<Arc<Self>> {
        Self::with_config(LedgerConfig::default().with_total_supply(total_supply))
    }

    pub fn with_config(config: LedgerConfig) -> LedgerResult<Arc<Self>> {
        config.validate()?;
        info!(total_supply = config.total_supply, "share pool created");

        Ok(Arc::new(Self {
            total_supply: config.total_supply,
            lock_timeout: config.lock_timeout,
            state: Mutex::new(PoolState {
                free: Shares::whole(config.total_supply),
                issued: Shares::ZERO,
            }),
            journal: Journal::default(),
        }))
    }

    /// Install the process-wide pool. Succeeds exactly once.
    pub fn initialize(total_supply: u64) -> LedgerResult<Arc<Self>> {
        Self::initialize_with(LedgerConfig::default().with_total_supply(total_supply))
    }

    pub fn initialize_with(config: LedgerConfig) -> LedgerResult<Arc<Self>> {
        if GLOBAL_POOL.get().is_some() {
            return Err(LedgerError::configuration("share pool already initialized"));
        }
        let pool = Self::with_config(config)?;
        GLOBAL_POOL
            .set(Arc::clone(&pool))
            .map_err(|_| LedgerError::configuration("share pool already initialized"))?;
        Ok(pool)
    }

    /// The process-wide pool, if [`SharePool::initialize`] has run.
    pub fn global() -> Option<Arc<Self>> {
        GLOBAL_POOL.get().cloned()
    }

    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }

    pub fn lock_timeout(&self) -> Duration {
        self.lock_timeout
    }

    /// Move `amount` from free to issued.
    ///
    /// Fails with `InsufficientSupply` when `amount <= 0` or `amount > free`, and
    /// with `InvalidArgument` when `amount` exceeds `Shares::MAX_SCALE`.
    pub fn reserve(&self, amount: Shares) -> LedgerResult<()> {
        amount.ensure_precision()?;
        let mut state = self.lock_state()?;
        state.take(amount)?;
        debug!(%amount, free = %state.free, issued = %state.issued, "shares reserved");
        Ok(())
    }

    /// Reserve for an issuance purchase.
    ///
    /// An empty pool is reported as `NoSupplyAvailable` before the amount is
    /// compared with what is free.
    pub(crate) fn issue(&self, amount: Shares) -> LedgerResult<()> {
        amount.ensure_precision()?;
        let mut state = self.lock_state()?;
        if !state.free.is_positive() {
            return Err(LedgerError::NoSupplyAvailable);
        }
        state.take(amount)?;
        debug!(%amount, free = %state.free, issued = %state.issued, "shares issued");
        Ok(())
    }

    /// Snapshot of the counters. May be stale by the time the caller reads it.
    pub fn overview(&self) -> PoolOverview {
        let state = self.state.lock();
        PoolOverview {
            total_supply: self.total_supply,
            free: state.free,
            issued: state.issued,
        }
    }

    /// Subscribe to journal entries recorded after this call.
    ///
    /// Each subscription buffers entries in an unbounded queue until read. Drain it
    /// regularly or drop it; an abandoned subscription is pruned on the next publish,
    /// a held but unread one grows for the life of the pool.
    pub fn journal(&self) -> Subscription<JournalEntry> {
        self.journal.subscribe()
    }

    pub(crate) fn record(&self, event: ShareEvent) {
        self.journal.record(event);
    }

    fn lock_state(&self) -> LedgerResult<MutexGuard<'_, PoolState>> {
        lock::acquire(&self.state, self.lock_timeout, "share pool")
    }
}

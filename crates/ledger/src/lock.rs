//! Bounded-wait lock acquisition.

use std::fmt::Display;
use std::time::Duration;

use parking_lot::{Mutex, MutexGuard};

use vshares_core::{LedgerError, LedgerResult};

/// Lock `mutex`, giving up with `LedgerError::Contention` after `timeout`.
pub(crate) fn acquire<'a, T>(
    mutex: &'a Mutex<T>,
    timeout: Duration,
    what: impl Display,
) -> LedgerResult<MutexGuard<'a, T>> {
    mutex.try_lock_for(timeout).ok_or_else(|| {
        LedgerError::contention(format!("timed out after {timeout:?} waiting for {what}"))
    })
}

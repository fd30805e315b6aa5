//! Safety net applied to every public transfer operation.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{error, warn};

use vshares_core::{LedgerError, LedgerResult};

use crate::outcome::TxOutcome;

/// Run a transfer operation and translate its result into the public contract.
///
/// - `Ok(outcome)` passes through.
/// - Validation errors and lock contention are returned as `Err`; the caller sent
///   something malformed or may retry.
/// - Business-rule errors become `TxOutcome { status: false, .. }`.
/// - Anything else, including a panic inside `f`, is logged and reported as
///   `"An exception occurred (...)"`.
///
/// Operations must finish every check before their first mutation, so an error
/// surfacing here never leaves a half-applied transfer behind.
pub fn guarded<F>(operation: &'static str, f: F) -> LedgerResult<TxOutcome>
where
    F: FnOnce() -> LedgerResult<TxOutcome>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(outcome)) => Ok(outcome),
        Ok(Err(err)) if err.is_validation() || matches!(err, LedgerError::Contention(_)) => {
            warn!(operation, error = %err, "operation refused");
            Err(err)
        }
        Ok(Err(err)) if err.is_business_rule() => {
            warn!(operation, reason = %err, "transaction rejected");
            Ok(TxOutcome::rejected(&err))
        }
        Ok(Err(err)) => {
            error!(operation, error = %err, "unexpected ledger fault");
            Ok(TxOutcome::exception(err))
        }
        Err(payload) => {
            let cause = panic_message(payload.as_ref());
            error!(operation, cause = %cause, "ledger operation panicked");
            Ok(TxOutcome::exception(cause))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vshares_core::Shares;

    #[test]
    fn success_passes_through() {
        let outcome = guarded("op", || Ok(TxOutcome::success("fine"))).unwrap();
        assert_eq!(outcome, TxOutcome::success("fine"));
    }

    #[test]
    fn validation_errors_are_raised() {
        let err = guarded("op", || Err(LedgerError::invalid_argument("negative"))).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidArgument(_)));
    }

    #[test]
    fn contention_is_raised() {
        let err = guarded("op", || Err(LedgerError::contention("busy"))).unwrap_err();
        assert!(matches!(err, LedgerError::Contention(_)));
    }

    #[test]
    fn business_failures_become_outcomes() {
        let outcome = guarded("op", || {
            Err(LedgerError::InsufficientBalance {
                requested: Shares::from(5u64),
                available: Shares::from(1u64),
            })
        })
        .unwrap();
        assert!(!outcome.status);
        assert_eq!(outcome.message, "insufficient volume of shares to sell");
    }

    #[test]
    fn internal_errors_become_exception_outcomes() {
        let outcome = guarded("op", || Err(LedgerError::internal("overflow"))).unwrap();
        assert_eq!(outcome.message, "An exception occurred (internal error: overflow)");
    }

    #[test]
    fn panics_are_caught() {
        let outcome = guarded("op", || panic!("boom")).unwrap();
        assert!(!outcome.status);
        assert_eq!(outcome.message, "An exception occurred (boom)");
    }

    #[test]
    fn formatted_panics_are_caught() {
        let n = 3;
        let outcome = guarded("op", || panic!("boom {n}")).unwrap();
        assert_eq!(outcome.message, "An exception occurred (boom 3)");
    }
}

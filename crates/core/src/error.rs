//! Ledger error model.
//!
//! Errors fall into two tiers:
//!
//! 1. **Validation** (`InvalidArgument`, `InvalidAmount`, `Configuration`): malformed
//!    input, reported before any state is touched and always surfaced to the caller.
//! 2. **Business rules** (`InsufficientSupply`, `NoSupplyAvailable`,
//!    `InsufficientBalance`): expected, recoverable outcomes. The ledger converts these
//!    into a failed transaction outcome at its public boundary.
//!
//! `Contention` and `Internal` are operational faults and sit outside both tiers.

use thiserror::Error;

use crate::shares::Shares;

/// Result type used across the ledger.
pub type LedgerResult<T> = Result<T, LedgerError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Malformed input (e.g. a non-positive amount).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An account could not be opened with the requested amount.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// The pool was configured incorrectly or initialized more than once.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The requested amount exceeds the unissued supply.
    #[error("insufficient supply: requested {requested}, free {free}")]
    InsufficientSupply { requested: Shares, free: Shares },

    /// The pool has no unissued shares left at all.
    #[error("no supply available")]
    NoSupplyAvailable,

    /// The seller does not hold enough shares.
    #[error("insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: Shares, available: Shares },

    /// A lock could not be acquired within the configured timeout.
    #[error("contention: {0}")]
    Contention(String),

    /// Anything the ledger did not anticipate.
    #[error("internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn invalid_amount(msg: impl Into<String>) -> Self {
        Self::InvalidAmount(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn contention(msg: impl Into<String>) -> Self {
        Self::Contention(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Tier 1: malformed input detected at entry.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument(_) | Self::InvalidAmount(_) | Self::Configuration(_)
        )
    }

    /// Tier 2: expected, recoverable business-rule failure.
    pub fn is_business_rule(&self) -> bool {
        matches!(
            self,
            Self::InsufficientSupply { .. }
                | Self::NoSupplyAvailable
                | Self::InsufficientBalance { .. }
        )
    }
}

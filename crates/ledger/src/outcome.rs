//! Structured transaction result.

use serde::{Deserialize, Serialize};

use vshares_core::LedgerError;

/// Human-readable reasons for business-rule rejections.
pub const NO_SUPPLY_MESSAGE: &str =
    "There are no available shares at the moment. Kindly check back later or consider buying from a user.";
pub const INSUFFICIENT_SUPPLY_MESSAGE: &str = "The requested amount of shares are not available.";
pub const INSUFFICIENT_BALANCE_MESSAGE: &str = "insufficient volume of shares to sell";

/// Outcome of a transfer operation.
///
/// A failed transaction is an expected result, not an error: callers inspect
/// `status` rather than matching on `Err`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutcome {
    pub status: bool,
    pub message: String,
}

impl TxOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: false,
            message: message.into(),
        }
    }

    /// Failure for a business-rule rejection.
    pub fn rejected(err: &LedgerError) -> Self {
        let message = match err {
            LedgerError::NoSupplyAvailable => NO_SUPPLY_MESSAGE.to_string(),
            LedgerError::InsufficientSupply { .. } => INSUFFICIENT_SUPPLY_MESSAGE.to_string(),
            LedgerError::InsufficientBalance { .. } => INSUFFICIENT_BALANCE_MESSAGE.to_string(),
            other => other.to_string(),
        };
        Self::failure(message)
    }

    /// Failure for a fault nothing anticipated.
    pub fn exception(cause: impl core::fmt::Display) -> Self {
        Self::failure(format!("An exception occurred ({cause})"))
    }

    pub fn is_success(&self) -> bool {
        self.status
    }
}

impl core::fmt::Display for TxOutcome {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let tag = if self.status { "ok" } else { "failed" };
        write!(f, "[{tag}] {}", self.message)
    }
}

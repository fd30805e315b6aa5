//! Share quantity value object.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::value_object::ValueObject;

/// A quantity of virtual shares.
///
/// Backed by an exact decimal so fractional holdings add and subtract without drift;
/// the conservation checks in the ledger compare with strict equality.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Shares(Decimal);

impl ValueObject for Shares {}

impl Shares {
    pub const ZERO: Shares = Shares(Decimal::ZERO);

    /// Most fractional digits an amount may carry.
    ///
    /// A `u64` supply needs at most 20 integer digits; with 8 fractional digits every
    /// balance and counter stays within the 28 significant digits a `Decimal` holds
    /// exactly, so sums never round.
    pub const MAX_SCALE: u32 = 8;

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn whole(value: u64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Fractional digits after dropping trailing zeros.
    pub fn scale(&self) -> u32 {
        self.0.normalize().scale()
    }

    pub fn fits_precision(&self) -> bool {
        self.scale() <= Self::MAX_SCALE
    }

    /// `InvalidArgument` when the amount carries more than [`Shares::MAX_SCALE`]
    /// fractional digits.
    pub fn ensure_precision(&self) -> LedgerResult<()> {
        if self.fits_precision() {
            Ok(())
        } else {
            Err(LedgerError::invalid_argument(format!(
                "amount {self} has more than {} decimal places",
                Self::MAX_SCALE
            )))
        }
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn checked_add(self, rhs: Shares) -> Option<Shares> {
        self.0.checked_add(rhs.0).map(Shares)
    }

    pub fn checked_sub(self, rhs: Shares) -> Option<Shares> {
        self.0.checked_sub(rhs.0).map(Shares)
    }
}

impl fmt::Display for Shares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.normalize(), f)
    }
}

impl From<Decimal> for Shares {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<u64> for Shares {
    fn from(value: u64) -> Self {
        Self::whole(value)
    }
}

impl From<i64> for Shares {
    fn from(value: i64) -> Self {
        Self(Decimal::from(value))
    }
}

impl From<Shares> for Decimal {
    fn from(value: Shares) -> Self {
        value.0
    }
}

impl Add for Shares {
    type Output = Shares;

    fn add(self, rhs: Shares) -> Shares {
        Shares(self.0 + rhs.0)
    }
}

impl Sub for Shares {
    type Output = Shares;

    fn sub(self, rhs: Shares) -> Shares {
        Shares(self.0 - rhs.0)
    }
}

impl AddAssign for Shares {
    fn add_assign(&mut self, rhs: Shares) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Shares {
    fn sub_assign(&mut self, rhs: Shares) {
        self.0 -= rhs.0;
    }
}

impl Sum for Shares {
    fn sum<I: Iterator<Item = Shares>>(iter: I) -> Shares {
        iter.fold(Shares::ZERO, Add::add)
    }
}

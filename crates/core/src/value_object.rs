//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. A share quantity of
/// `10` is the same quantity wherever it appears; an account holding 10 shares is
/// still a distinct account from another one holding 10 shares.
///
/// The trait requires:
/// - **Clone**: value objects are cheap to copy
/// - **PartialEq**: compared by their attribute values
/// - **Debug**: needed for logging and test assertions
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
